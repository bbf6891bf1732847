// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Proposition History
//!
//! In-memory journal implementing the history ports of the three contexts.
//! Each entry keeps the proposition, the author of the change, a readable
//! message and the tags used by the staff interface to filter the history.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Implements:** `IHistoriqueDoctorat`, `IHistoriqueGenerale`, `IHistoriqueContinue`

use crate::domain::doctorat::groupe_de_supervision::RoleSignataire;
use crate::domain::doctorat::ports::{self as ports_doctorat, IHistoriqueDoctorat};
use crate::domain::doctorat::proposition::PropositionDoctorat;
use crate::domain::formation_continue::ports::{IHistoriqueContinue, MessageDecision};
use crate::domain::formation_continue::proposition::PropositionContinue;
use crate::domain::formation_continue::validators::ActionDecision;
use crate::domain::formation_generale::ports::{self as ports_generale, IHistoriqueGenerale};
use crate::domain::formation_generale::proposition::PropositionGenerale;
use crate::domain::shared::decision::EtatAuthentificationParcours;
use crate::domain::shared::exceptions::AdmissionError;
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::repository::PropositionAggregate;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntreeHistorique {
    pub proposition_id: PropositionIdentity,
    pub contexte: &'static str,
    pub auteur: String,
    pub message: String,
    pub tags: Vec<String>,
    pub cree_le: DateTime<Utc>,
}

/// Message and tags recorded for an authentication state.
pub fn entree_authentification(
    etat: EtatAuthentificationParcours,
) -> (&'static str, &'static [&'static str]) {
    use EtatAuthentificationParcours::*;
    match etat {
        NonConcerne => (
            "The experience no longer needs to be authenticated.",
            &["proposition", "experience-authentication", "authentication-not-concerned"],
        ),
        AuthentificationDemandee => (
            "The authentication of the experience has been requested.",
            &["proposition", "experience-authentication", "authentication-requested"],
        ),
        EtablissementContacte => (
            "The institution of the experience has been contacted.",
            &["proposition", "experience-authentication", "institution-contacted"],
        ),
        Vrai => (
            "The experience has been authenticated.",
            &["proposition", "experience-authentication", "authentication-true"],
        ),
        Faux => (
            "The experience has been found to be forged.",
            &["proposition", "experience-authentication", "authentication-false"],
        ),
    }
}

#[derive(Clone, Default)]
pub struct InMemoryHistorique {
    entrees: Arc<RwLock<Vec<EntreeHistorique>>>,
    en_panne: Arc<AtomicBool>,
}

impl InMemoryHistorique {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail until switched back.
    pub fn simuler_panne(&self, en_panne: bool) {
        self.en_panne.store(en_panne, Ordering::SeqCst);
    }

    pub async fn entrees(&self) -> Vec<EntreeHistorique> {
        self.entrees.read().await.clone()
    }

    pub async fn entrees_de(&self, proposition_id: &PropositionIdentity) -> Vec<EntreeHistorique> {
        self.entrees
            .read()
            .await
            .iter()
            .filter(|entree| &entree.proposition_id == proposition_id)
            .cloned()
            .collect()
    }

    pub async fn reset(&self) {
        self.entrees.write().await.clear();
        self.en_panne.store(false, Ordering::SeqCst);
    }

    async fn ajouter<P: PropositionAggregate>(
        &self,
        proposition: &P,
        auteur: &str,
        message: impl Into<String>,
        tags: &[&str],
    ) -> Result<(), AdmissionError> {
        if self.en_panne.load(Ordering::SeqCst) {
            return Err(AdmissionError::Integration {
                port: "historique".to_string(),
                reference: proposition.entity_id().to_string(),
                message: "history store unavailable".to_string(),
            });
        }
        let entree = EntreeHistorique {
            proposition_id: proposition.entity_id(),
            contexte: P::CONTEXTE,
            auteur: auteur.to_string(),
            message: message.into(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            cree_le: Utc::now(),
        };
        debug!(
            proposition_id = %entree.proposition_id,
            tags = ?entree.tags,
            "History entry recorded"
        );
        self.entrees.write().await.push(entree);
        Ok(())
    }
}

// ============================================================================
// Doctorate
// ============================================================================

fn office_doctorat(acteur: ports_doctorat::Acteur) -> &'static str {
    match acteur {
        ports_doctorat::Acteur::Cdd => "CDD",
        ports_doctorat::Acteur::Sic => "SIC",
    }
}

#[async_trait]
impl IHistoriqueDoctorat for InMemoryHistorique {
    async fn historiser_initiation(&self, p: &PropositionDoctorat) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.matricule_candidat,
            "The proposition has been initiated.",
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_demande_signatures(
        &self,
        p: &PropositionDoctorat,
        invites: &[String],
    ) -> Result<(), AdmissionError> {
        let message = format!("Signatures requested from {}.", invites.join(", "));
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            message,
            &["proposition", "supervision", "status-changed"],
        )
        .await
    }

    async fn historiser_avis_signataire(
        &self,
        p: &PropositionDoctorat,
        signataire: &str,
        role: RoleSignataire,
        approuve: bool,
    ) -> Result<(), AdmissionError> {
        let avis = if approuve { "approved" } else { "declined" };
        let message = format!("{} ({}) {} the proposition.", signataire, role, avis);
        self.ajouter(p, signataire, message, &["proposition", "supervision"]).await
    }

    async fn historiser_soumission(&self, p: &PropositionDoctorat) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The proposition has been submitted.",
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_suppression(&self, p: &PropositionDoctorat) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The proposition has been cancelled.",
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_reclamation_documents(
        &self,
        p: &PropositionDoctorat,
        acteur: ports_doctorat::Acteur,
    ) -> Result<(), AdmissionError> {
        let message = format!(
            "The {} requested documents from the candidate.",
            office_doctorat(acteur)
        );
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            message,
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_annulation_reclamation_documents(
        &self,
        p: &PropositionDoctorat,
        acteur: ports_doctorat::Acteur,
    ) -> Result<(), AdmissionError> {
        let message = format!("The {} cancelled the document request.", office_doctorat(acteur));
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            message,
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_completion_documents(
        &self,
        p: &PropositionDoctorat,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.matricule_candidat,
            "The candidate completed the requested documents.",
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_authentification_experience(
        &self,
        p: &PropositionDoctorat,
        uuid_experience: &str,
        etat: EtatAuthentificationParcours,
    ) -> Result<(), AdmissionError> {
        let (message, tags) = entree_authentification(etat);
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            format!("{} ({})", message, uuid_experience),
            tags,
        )
        .await
    }

    async fn historiser_envoi_cdd(&self, p: &PropositionDoctorat) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The proposition has been sent to the CDD.",
            &["proposition", "cdd-decision", "status-changed"],
        )
        .await
    }

    async fn historiser_envoi_sic(&self, p: &PropositionDoctorat) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The proposition has been sent back to the SIC.",
            &["proposition", "cdd-decision", "status-changed"],
        )
        .await
    }

    async fn historiser_refus_cdd(&self, p: &PropositionDoctorat) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The CDD refused the proposition.",
            &["proposition", "cdd-decision", "refusal"],
        )
        .await
    }

    async fn historiser_acceptation_cdd(
        &self,
        p: &PropositionDoctorat,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The CDD approved the proposition.",
            &["proposition", "cdd-decision", "approval"],
        )
        .await
    }

    async fn historiser_cloture_cdd(&self, p: &PropositionDoctorat) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The CDD closed the proposition.",
            &["proposition", "cdd-decision", "closure"],
        )
        .await
    }

    async fn historiser_specification_motifs_refus_sic(
        &self,
        p: &PropositionDoctorat,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The SIC specified the refusal reasons.",
            &["proposition", "sic-decision", "status-changed"],
        )
        .await
    }

    async fn historiser_specification_informations_acceptation_sic(
        &self,
        p: &PropositionDoctorat,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The SIC specified the acceptance information.",
            &["proposition", "sic-decision", "status-changed"],
        )
        .await
    }

    async fn historiser_refus_sic(&self, p: &PropositionDoctorat) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The SIC refused the admission.",
            &["proposition", "sic-decision", "refusal"],
        )
        .await
    }

    async fn historiser_acceptation_sic(
        &self,
        p: &PropositionDoctorat,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The SIC approved the admission.",
            &["proposition", "sic-decision", "approval"],
        )
        .await
    }
}

// ============================================================================
// General education
// ============================================================================

fn office_generale(acteur: ports_generale::Acteur) -> &'static str {
    match acteur {
        ports_generale::Acteur::Fac => "faculty",
        ports_generale::Acteur::Sic => "SIC",
    }
}

#[async_trait]
impl IHistoriqueGenerale for InMemoryHistorique {
    async fn historiser_initiation(&self, p: &PropositionGenerale) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.matricule_candidat,
            "The proposition has been initiated.",
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_soumission(&self, p: &PropositionGenerale) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The proposition has been submitted.",
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_suppression(&self, p: &PropositionGenerale) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The proposition has been cancelled.",
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_paiement_frais_dossier(
        &self,
        p: &PropositionGenerale,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.matricule_candidat,
            "The application fees have been paid.",
            &["proposition", "application-fees-payment"],
        )
        .await
    }

    async fn historiser_demande_paiement_par_gestionnaire(
        &self,
        p: &PropositionGenerale,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The candidate has been asked to pay the application fees.",
            &["proposition", "application-fees-payment", "request"],
        )
        .await
    }

    async fn historiser_annulation_paiement_par_gestionnaire(
        &self,
        p: &PropositionGenerale,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The application fees payment is no longer needed.",
            &["proposition", "application-fees-payment", "cancel-request"],
        )
        .await
    }

    async fn historiser_reclamation_documents(
        &self,
        p: &PropositionGenerale,
        acteur: ports_generale::Acteur,
    ) -> Result<(), AdmissionError> {
        let message = format!(
            "The {} requested documents from the candidate.",
            office_generale(acteur)
        );
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            message,
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_annulation_reclamation_documents(
        &self,
        p: &PropositionGenerale,
        acteur: ports_generale::Acteur,
    ) -> Result<(), AdmissionError> {
        let message = format!("The {} cancelled the document request.", office_generale(acteur));
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            message,
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_completion_documents(
        &self,
        p: &PropositionGenerale,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.matricule_candidat,
            "The candidate completed the requested documents.",
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_authentification_experience(
        &self,
        p: &PropositionGenerale,
        uuid_experience: &str,
        etat: EtatAuthentificationParcours,
    ) -> Result<(), AdmissionError> {
        let (message, tags) = entree_authentification(etat);
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            format!("{} ({})", message, uuid_experience),
            tags,
        )
        .await
    }

    async fn historiser_envoi_fac(&self, p: &PropositionGenerale) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The proposition has been sent to the faculty.",
            &["proposition", "fac-decision", "status-changed"],
        )
        .await
    }

    async fn historiser_envoi_sic(&self, p: &PropositionGenerale) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The proposition has been sent back to the SIC.",
            &["proposition", "fac-decision", "status-changed"],
        )
        .await
    }

    async fn historiser_refus_fac(&self, p: &PropositionGenerale) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The faculty refused the proposition.",
            &["proposition", "fac-decision", "refusal"],
        )
        .await
    }

    async fn historiser_acceptation_fac(
        &self,
        p: &PropositionGenerale,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The faculty approved the proposition.",
            &["proposition", "fac-decision", "approval"],
        )
        .await
    }

    async fn historiser_refus_sic(&self, p: &PropositionGenerale) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The SIC refused the admission.",
            &["proposition", "sic-decision", "refusal"],
        )
        .await
    }

    async fn historiser_acceptation_sic(
        &self,
        p: &PropositionGenerale,
    ) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.auteur_derniere_modification,
            "The SIC approved the admission.",
            &["proposition", "sic-decision", "approval"],
        )
        .await
    }
}

// ============================================================================
// Continuing education
// ============================================================================

#[async_trait]
impl IHistoriqueContinue for InMemoryHistorique {
    async fn historiser_soumission(&self, p: &PropositionContinue) -> Result<(), AdmissionError> {
        self.ajouter(
            p,
            &p.matricule_candidat,
            "The proposition has been submitted.",
            &["proposition", "status-changed"],
        )
        .await
    }

    async fn historiser_decision(
        &self,
        p: &PropositionContinue,
        action: ActionDecision,
        gestionnaire: &str,
        message: &MessageDecision,
    ) -> Result<(), AdmissionError> {
        let mut texte = format!("Decision {} taken.", action.cible());
        if !message.est_vide() {
            texte.push_str(&format!(" Message sent: {}", message.objet));
        }
        self.ajouter(p, gestionnaire, texte, &["proposition", "decision", "status-changed"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_authentication_state_has_its_own_tag() {
        let mut tags: Vec<&str> = EtatAuthentificationParcours::ALL
            .iter()
            .map(|etat| entree_authentification(*etat).1[2])
            .collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), EtatAuthentificationParcours::ALL.len());
    }
}
