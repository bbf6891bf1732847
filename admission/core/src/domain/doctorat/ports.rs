// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Doctorate Side-Effect Ports
//!
//! Notification and history ports of the doctorate context. Handlers call them
//! after the aggregate was saved; a failure never undoes the saved change.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer (ports)
//! - **Adapters:** `infrastructure::notification`, `infrastructure::historique`

use crate::domain::doctorat::groupe_de_supervision::{GroupeDeSupervision, RoleSignataire};
use crate::domain::doctorat::proposition::PropositionDoctorat;
use crate::domain::shared::decision::{EmailMessage, EtatAuthentificationParcours};
use crate::domain::shared::exceptions::AdmissionError;
use async_trait::async_trait;

/// Office performing a staff action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acteur {
    /// Doctoral committee
    Cdd,
    /// Central enrolment office
    Sic,
}

#[async_trait]
pub trait INotificationDoctorat: Send + Sync {
    /// One message per invited signatory.
    async fn envoyer_invitations_signature(
        &self,
        proposition: &PropositionDoctorat,
        invites: &[String],
    ) -> Result<Vec<EmailMessage>, AdmissionError>;

    async fn notifier_avis_signataire(
        &self,
        proposition: &PropositionDoctorat,
        signataire: &str,
        role: RoleSignataire,
        approuve: bool,
    ) -> Result<EmailMessage, AdmissionError>;

    async fn notifier_soumission(
        &self,
        proposition: &PropositionDoctorat,
        groupe: &GroupeDeSupervision,
    ) -> Result<EmailMessage, AdmissionError>;

    async fn notifier_reclamation_documents(
        &self,
        proposition: &PropositionDoctorat,
        acteur: Acteur,
    ) -> Result<EmailMessage, AdmissionError>;

    async fn notifier_etat_authentification(
        &self,
        proposition: &PropositionDoctorat,
        uuid_experience: &str,
        etat: EtatAuthentificationParcours,
    ) -> Result<EmailMessage, AdmissionError>;

    async fn notifier_decision_sic(
        &self,
        proposition: &PropositionDoctorat,
        autorisee: bool,
    ) -> Result<EmailMessage, AdmissionError>;
}

#[async_trait]
pub trait IHistoriqueDoctorat: Send + Sync {
    async fn historiser_initiation(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_demande_signatures(
        &self,
        proposition: &PropositionDoctorat,
        invites: &[String],
    ) -> Result<(), AdmissionError>;

    async fn historiser_avis_signataire(
        &self,
        proposition: &PropositionDoctorat,
        signataire: &str,
        role: RoleSignataire,
        approuve: bool,
    ) -> Result<(), AdmissionError>;

    async fn historiser_soumission(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_suppression(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_reclamation_documents(
        &self,
        proposition: &PropositionDoctorat,
        acteur: Acteur,
    ) -> Result<(), AdmissionError>;

    async fn historiser_annulation_reclamation_documents(
        &self,
        proposition: &PropositionDoctorat,
        acteur: Acteur,
    ) -> Result<(), AdmissionError>;

    async fn historiser_completion_documents(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_authentification_experience(
        &self,
        proposition: &PropositionDoctorat,
        uuid_experience: &str,
        etat: EtatAuthentificationParcours,
    ) -> Result<(), AdmissionError>;

    async fn historiser_envoi_cdd(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_envoi_sic(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_refus_cdd(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_acceptation_cdd(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_cloture_cdd(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_specification_motifs_refus_sic(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_specification_informations_acceptation_sic(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_refus_sic(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;

    async fn historiser_acceptation_sic(
        &self,
        proposition: &PropositionDoctorat,
    ) -> Result<(), AdmissionError>;
}
