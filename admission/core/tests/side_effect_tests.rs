// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! History and notification failures after a save.
//!
//! The command result stands; the failure is reported on the event bus and
//! the proposition keeps its new state.

use admission_core::application::formation_continue::commands::{
    InitierPropositionCommand, SoumettrePropositionCommand,
};
use admission_core::application::formation_continue::queries::GetPropositionQuery;
use admission_core::application::AdmissionContainer;
use admission_core::domain::events::PropositionEvent;
use admission_core::domain::formation_continue::proposition::FormationContinue;
use admission_core::domain::shared::identite::PropositionIdentity;
use admission_core::domain::shared::titres_acces::TrainingType;
use admission_core::infrastructure::event_bus::DomainEvent;
use admission_core::infrastructure::fixtures::CANDIDAT_BELGE;

async fn initier(container: &AdmissionContainer) -> PropositionIdentity {
    container
        .bus
        .invoke(InitierPropositionCommand {
            matricule_candidat: CANDIDAT_BELGE.to_string(),
            formation: FormationContinue {
                sigle: "USCS037".to_string(),
                annee: 2024,
                training_type: TrainingType::CertificateOfParticipation,
            },
            motivations: String::new(),
            moyens_decouverte_formation: Vec::new(),
            marque_d_interet: None,
        })
        .await
        .unwrap()
}

async fn soumettre(container: &AdmissionContainer, id: PropositionIdentity) {
    container
        .bus
        .invoke(SoumettrePropositionCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_BELGE.to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_history_outage_does_not_fail_the_command() {
    let container = AdmissionContainer::in_memory();
    let id = initier(&container).await;
    let mut events = container.event_bus.subscribe_proposition(id);
    container.historique.simuler_panne(true);

    soumettre(&container, id).await;

    let statut = container
        .bus
        .invoke(GetPropositionQuery { uuid_proposition: id })
        .await
        .unwrap()
        .statut;
    assert_eq!(statut, "CONFIRMEE");

    let port = loop {
        if let DomainEvent::SideEffectFailed { port, .. } = events.recv().await.unwrap() {
            break port;
        }
    };
    assert_eq!(port, "historique");

    // The notification port was still reached.
    assert_eq!(container.notification.envoyees_a(CANDIDAT_BELGE).await.len(), 1);
}

#[tokio::test]
async fn test_notification_outage_is_reported() {
    let container = AdmissionContainer::in_memory();
    let id = initier(&container).await;
    let mut events = container.event_bus.subscribe_proposition(id);
    container.notification.simuler_panne(true);

    soumettre(&container, id).await;

    let (port, message) = loop {
        if let DomainEvent::SideEffectFailed { port, message, .. } = events.recv().await.unwrap() {
            break (port, message);
        }
    };
    assert_eq!(port, "notification");
    assert!(!message.is_empty());
    assert!(container.notification.envoyees().await.is_empty());
    assert!(!container.historique.entrees_de(&id).await.is_empty());
}

#[tokio::test]
async fn test_status_change_event_follows_submission() {
    let container = AdmissionContainer::in_memory();
    let id = initier(&container).await;
    let mut events = container.event_bus.subscribe_proposition(id);

    soumettre(&container, id).await;

    let (ancien, nouveau) = loop {
        if let DomainEvent::Proposition(PropositionEvent::StatutModifie {
            ancien_statut,
            nouveau_statut,
            ..
        }) = events.recv().await.unwrap()
        {
            break (ancien_statut, nouveau_statut);
        }
    };
    assert_eq!(ancien, "EN_BROUILLON");
    assert_eq!(nouveau, "CONFIRMEE");
}

#[tokio::test]
async fn test_reset_forgets_propositions_and_side_effects() {
    let container = AdmissionContainer::in_memory();
    let id = initier(&container).await;
    soumettre(&container, id).await;

    container.reset().await;

    assert!(container
        .bus
        .invoke(GetPropositionQuery { uuid_proposition: id })
        .await
        .is_err());
    assert!(container.historique.entrees().await.is_empty());
    assert!(container.notification.envoyees().await.is_empty());
}
