// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # General Education Side-Effect Ports
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer (ports)
//! - **Adapters:** `infrastructure::notification`, `infrastructure::historique`

use crate::domain::formation_generale::proposition::PropositionGenerale;
use crate::domain::shared::decision::{EmailMessage, EtatAuthentificationParcours};
use crate::domain::shared::exceptions::AdmissionError;
use async_trait::async_trait;

/// Office performing a staff action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acteur {
    Fac,
    Sic,
}

#[async_trait]
pub trait INotificationGenerale: Send + Sync {
    async fn notifier_soumission(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<EmailMessage, AdmissionError>;

    /// Sent when a manager asks the candidate to pay the application fees.
    async fn notifier_paiement_necessaire(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<EmailMessage, AdmissionError>;

    async fn notifier_reclamation_documents(
        &self,
        proposition: &PropositionGenerale,
        acteur: Acteur,
    ) -> Result<EmailMessage, AdmissionError>;

    async fn notifier_etat_authentification(
        &self,
        proposition: &PropositionGenerale,
        uuid_experience: &str,
        etat: EtatAuthentificationParcours,
    ) -> Result<EmailMessage, AdmissionError>;

    async fn notifier_decision_sic(
        &self,
        proposition: &PropositionGenerale,
        autorisee: bool,
    ) -> Result<EmailMessage, AdmissionError>;
}

#[async_trait]
pub trait IHistoriqueGenerale: Send + Sync {
    async fn historiser_initiation(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_soumission(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_suppression(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_paiement_frais_dossier(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_demande_paiement_par_gestionnaire(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_annulation_paiement_par_gestionnaire(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_reclamation_documents(
        &self,
        proposition: &PropositionGenerale,
        acteur: Acteur,
    ) -> Result<(), AdmissionError>;

    async fn historiser_annulation_reclamation_documents(
        &self,
        proposition: &PropositionGenerale,
        acteur: Acteur,
    ) -> Result<(), AdmissionError>;

    async fn historiser_completion_documents(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_authentification_experience(
        &self,
        proposition: &PropositionGenerale,
        uuid_experience: &str,
        etat: EtatAuthentificationParcours,
    ) -> Result<(), AdmissionError>;

    async fn historiser_envoi_fac(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_envoi_sic(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_refus_fac(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_acceptation_fac(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_refus_sic(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;

    async fn historiser_acceptation_sic(
        &self,
        proposition: &PropositionGenerale,
    ) -> Result<(), AdmissionError>;
}
