// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Outgoing Notifications
//!
//! In-memory outbox implementing the notification ports of the three
//! contexts. Messages are addressed to the candidate's or signatory's
//! registration number; the mail gateway resolves the address.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Implements:** `INotificationDoctorat`, `INotificationGenerale`, `INotificationContinue`

use crate::domain::doctorat::groupe_de_supervision::{GroupeDeSupervision, RoleSignataire};
use crate::domain::doctorat::ports::{self as ports_doctorat, INotificationDoctorat};
use crate::domain::doctorat::proposition::PropositionDoctorat;
use crate::domain::formation_continue::ports::{INotificationContinue, MessageDecision};
use crate::domain::formation_continue::proposition::PropositionContinue;
use crate::domain::formation_generale::ports::{self as ports_generale, INotificationGenerale};
use crate::domain::formation_generale::proposition::PropositionGenerale;
use crate::domain::shared::decision::{EmailMessage, EtatAuthentificationParcours};
use crate::domain::shared::exceptions::AdmissionError;
use crate::domain::shared::identite::PropositionIdentity;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A message handed over to the mail gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEnvoyee {
    pub proposition_id: PropositionIdentity,
    pub message: EmailMessage,
}

#[derive(Clone, Default)]
pub struct InMemoryNotification {
    envoyees: Arc<RwLock<Vec<NotificationEnvoyee>>>,
    en_panne: Arc<AtomicBool>,
}

impl InMemoryNotification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail until switched back.
    pub fn simuler_panne(&self, en_panne: bool) {
        self.en_panne.store(en_panne, Ordering::SeqCst);
    }

    pub async fn envoyees(&self) -> Vec<NotificationEnvoyee> {
        self.envoyees.read().await.clone()
    }

    pub async fn envoyees_a(&self, destinataire: &str) -> Vec<EmailMessage> {
        self.envoyees
            .read()
            .await
            .iter()
            .filter(|n| n.message.destinataire == destinataire)
            .map(|n| n.message.clone())
            .collect()
    }

    pub async fn reset(&self) {
        self.envoyees.write().await.clear();
        self.en_panne.store(false, Ordering::SeqCst);
    }

    async fn envoyer(
        &self,
        proposition_id: PropositionIdentity,
        destinataire: &str,
        objet: String,
    ) -> Result<EmailMessage, AdmissionError> {
        if self.en_panne.load(Ordering::SeqCst) {
            return Err(AdmissionError::Integration {
                port: "notification".to_string(),
                reference: proposition_id.to_string(),
                message: "mail gateway unavailable".to_string(),
            });
        }
        let message = EmailMessage {
            destinataire: destinataire.to_string(),
            objet,
        };
        debug!(%proposition_id, destinataire, objet = %message.objet, "Notification queued");
        self.envoyees.write().await.push(NotificationEnvoyee {
            proposition_id,
            message: message.clone(),
        });
        Ok(message)
    }
}

fn objet_authentification(etat: EtatAuthentificationParcours, reference: u64) -> String {
    format!("Admission {}: authentication of your experience ({})", reference, etat.libelle())
}

#[async_trait]
impl INotificationDoctorat for InMemoryNotification {
    async fn envoyer_invitations_signature(
        &self,
        p: &PropositionDoctorat,
        invites: &[String],
    ) -> Result<Vec<EmailMessage>, AdmissionError> {
        let mut messages = Vec::with_capacity(invites.len());
        for invite in invites {
            let objet = format!("Doctorate admission {}: your signature is requested", p.reference);
            messages.push(self.envoyer(p.entity_id, invite, objet).await?);
        }
        Ok(messages)
    }

    async fn notifier_avis_signataire(
        &self,
        p: &PropositionDoctorat,
        signataire: &str,
        role: RoleSignataire,
        approuve: bool,
    ) -> Result<EmailMessage, AdmissionError> {
        let avis = if approuve { "approved" } else { "declined" };
        let objet = format!(
            "Doctorate admission {}: {} {} {} your proposition",
            p.reference,
            role,
            signataire,
            avis
        );
        self.envoyer(p.entity_id, &p.matricule_candidat, objet).await
    }

    async fn notifier_soumission(
        &self,
        p: &PropositionDoctorat,
        groupe: &GroupeDeSupervision,
    ) -> Result<EmailMessage, AdmissionError> {
        let objet = format!(
            "Doctorate admission {} submitted ({} promoters, {} CA members)",
            p.reference,
            groupe.signatures_promoteurs.len(),
            groupe.signatures_membres_ca.len()
        );
        self.envoyer(p.entity_id, &p.matricule_candidat, objet).await
    }

    async fn notifier_reclamation_documents(
        &self,
        p: &PropositionDoctorat,
        acteur: ports_doctorat::Acteur,
    ) -> Result<EmailMessage, AdmissionError> {
        let office = match acteur {
            ports_doctorat::Acteur::Cdd => "CDD",
            ports_doctorat::Acteur::Sic => "SIC",
        };
        let objet = format!(
            "Doctorate admission {}: documents requested by the {}",
            p.reference,
            office
        );
        self.envoyer(p.entity_id, &p.matricule_candidat, objet).await
    }

    async fn notifier_etat_authentification(
        &self,
        p: &PropositionDoctorat,
        _uuid_experience: &str,
        etat: EtatAuthentificationParcours,
    ) -> Result<EmailMessage, AdmissionError> {
        self.envoyer(p.entity_id, &p.matricule_candidat, objet_authentification(etat, p.reference))
            .await
    }

    async fn notifier_decision_sic(
        &self,
        p: &PropositionDoctorat,
        autorisee: bool,
    ) -> Result<EmailMessage, AdmissionError> {
        let decision = if autorisee { "approved" } else { "refused" };
        let objet = format!(
            "Doctorate admission {}: your application has been {}",
            p.reference,
            decision
        );
        self.envoyer(p.entity_id, &p.matricule_candidat, objet).await
    }
}

#[async_trait]
impl INotificationGenerale for InMemoryNotification {
    async fn notifier_soumission(
        &self,
        p: &PropositionGenerale,
    ) -> Result<EmailMessage, AdmissionError> {
        let objet = format!("Admission {} to {} submitted", p.reference, p.formation.sigle);
        self.envoyer(p.entity_id, &p.matricule_candidat, objet).await
    }

    async fn notifier_paiement_necessaire(
        &self,
        p: &PropositionGenerale,
    ) -> Result<EmailMessage, AdmissionError> {
        let objet = format!("Admission {}: application fees to be paid", p.reference);
        self.envoyer(p.entity_id, &p.matricule_candidat, objet).await
    }

    async fn notifier_reclamation_documents(
        &self,
        p: &PropositionGenerale,
        acteur: ports_generale::Acteur,
    ) -> Result<EmailMessage, AdmissionError> {
        let office = match acteur {
            ports_generale::Acteur::Fac => "faculty",
            ports_generale::Acteur::Sic => "SIC",
        };
        let objet = format!("Admission {}: documents requested by the {}", p.reference, office);
        self.envoyer(p.entity_id, &p.matricule_candidat, objet).await
    }

    async fn notifier_etat_authentification(
        &self,
        p: &PropositionGenerale,
        _uuid_experience: &str,
        etat: EtatAuthentificationParcours,
    ) -> Result<EmailMessage, AdmissionError> {
        self.envoyer(p.entity_id, &p.matricule_candidat, objet_authentification(etat, p.reference))
            .await
    }

    async fn notifier_decision_sic(
        &self,
        p: &PropositionGenerale,
        autorisee: bool,
    ) -> Result<EmailMessage, AdmissionError> {
        let decision = if autorisee { "approved" } else { "refused" };
        let objet = format!("Admission {}: your application has been {}", p.reference, decision);
        self.envoyer(p.entity_id, &p.matricule_candidat, objet).await
    }
}

#[async_trait]
impl INotificationContinue for InMemoryNotification {
    async fn notifier_soumission(
        &self,
        p: &PropositionContinue,
    ) -> Result<EmailMessage, AdmissionError> {
        let objet = format!("Registration {} to {} confirmed", p.reference, p.formation.sigle);
        self.envoyer(p.entity_id, &p.matricule_candidat, objet).await
    }

    async fn notifier_decision(
        &self,
        p: &PropositionContinue,
        message: &MessageDecision,
    ) -> Result<EmailMessage, AdmissionError> {
        self.envoyer(p.entity_id, &p.matricule_candidat, message.objet.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outage_is_reported_as_integration_error() {
        let outbox = InMemoryNotification::new();
        let id = PropositionIdentity::new();

        outbox.envoyer(id, "0001", "first".to_string()).await.unwrap();
        outbox.simuler_panne(true);
        let erreur = outbox.envoyer(id, "0001", "second".to_string()).await.unwrap_err();

        assert!(
            matches!(erreur, AdmissionError::Integration { ref port, .. } if port == "notification")
        );
        assert_eq!(outbox.envoyees_a("0001").await.len(), 1);

        outbox.reset().await;
        assert!(outbox.envoyees().await.is_empty());
    }
}
