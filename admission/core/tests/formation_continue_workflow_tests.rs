// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for the continuing education decision workflow.
//!
//! The decision tab moves A_TRAITER → PRISE_EN_CHARGE → FAC_VALIDE →
//! A_VALIDER → VALIDE; each step is a separate manager command.

use admission_core::application::formation_continue::commands::*;
use admission_core::application::formation_continue::queries::{
    GetPropositionQuery, PropositionContinueDTO,
};
use admission_core::application::AdmissionContainer;
use admission_core::domain::formation_continue::ports::MessageDecision;
use admission_core::domain::formation_continue::proposition::FormationContinue;
use admission_core::domain::formation_continue::validators::Motif;
use admission_core::domain::shared::exceptions::BusinessException;
use admission_core::domain::shared::identite::PropositionIdentity;
use admission_core::domain::shared::titres_acces::TrainingType;
use admission_core::infrastructure::fixtures::CANDIDAT_BELGE;

const GESTIONNAIRE: &str = "gestionnaire-iufc";

async fn proposition_confirmee(container: &AdmissionContainer) -> PropositionIdentity {
    let id = container
        .bus
        .invoke(InitierPropositionCommand {
            matricule_candidat: CANDIDAT_BELGE.to_string(),
            formation: FormationContinue {
                sigle: "USCS037".to_string(),
                annee: 2024,
                training_type: TrainingType::CertificateOfParticipation,
            },
            motivations: "Career change".to_string(),
            moyens_decouverte_formation: vec!["SITE_WEB".to_string()],
            marque_d_interet: None,
        })
        .await
        .unwrap();
    container
        .bus
        .invoke(SoumettrePropositionCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_BELGE.to_string(),
        })
        .await
        .unwrap();
    id
}

async fn proposition(
    container: &AdmissionContainer,
    id: PropositionIdentity,
) -> PropositionContinueDTO {
    container
        .bus
        .invoke(GetPropositionQuery { uuid_proposition: id })
        .await
        .unwrap()
}

fn message(objet: &str) -> MessageDecision {
    MessageDecision {
        objet: objet.to_string(),
        corps: "Dear candidate".to_string(),
    }
}

#[tokio::test]
async fn test_full_decision_path_authorises_enrolment() {
    let container = AdmissionContainer::in_memory();
    let bus = &container.bus;
    let id = proposition_confirmee(&container).await;
    assert_eq!(proposition(&container, id).await.decision.as_deref(), Some("A_TRAITER"));

    bus.invoke(PrendreEnChargeCommand {
        uuid_proposition: id,
        gestionnaire: GESTIONNAIRE.to_string(),
    })
    .await
    .unwrap();
    bus.invoke(ApprouverParFacCommand {
        uuid_proposition: id,
        gestionnaire: GESTIONNAIRE.to_string(),
        condition: "Attend the introduction module".to_string(),
        message: MessageDecision::default(),
    })
    .await
    .unwrap();
    bus.invoke(MettreAValiderCommand {
        uuid_proposition: id,
        gestionnaire: GESTIONNAIRE.to_string(),
    })
    .await
    .unwrap();
    assert_eq!(proposition(&container, id).await.decision.as_deref(), Some("A_VALIDER"));

    bus.invoke(ValiderPropositionCommand {
        uuid_proposition: id,
        gestionnaire: GESTIONNAIRE.to_string(),
        message: message("Your registration is validated"),
    })
    .await
    .unwrap();

    let dto = proposition(&container, id).await;
    assert_eq!(dto.statut, "INSCRIPTION_AUTORISEE");
    assert_eq!(dto.decision.as_deref(), Some("VALIDE"));
    assert_eq!(dto.condition_approbation_par_fac, "Attend the introduction module");

    // Submission confirmation, then only the decision carrying a message.
    let envoyes = container.notification.envoyees_a(CANDIDAT_BELGE).await;
    assert_eq!(envoyes.len(), 2);
    assert_eq!(envoyes[1].objet, "Your registration is validated");
}

#[tokio::test]
async fn test_validation_requires_a_validation_request() {
    let container = AdmissionContainer::in_memory();
    let id = proposition_confirmee(&container).await;

    let erreur = container
        .bus
        .invoke(ValiderPropositionCommand {
            uuid_proposition: id,
            gestionnaire: GESTIONNAIRE.to_string(),
            message: MessageDecision::default(),
        })
        .await
        .unwrap_err();

    assert_eq!(erreur.exceptions(), &[BusinessException::ValiderPropositionTransitionStatut]);
    assert_eq!(proposition(&container, id).await.statut, "CONFIRMEE");
}

#[tokio::test]
async fn test_on_hold_then_faculty_approval_reconfirms() {
    let container = AdmissionContainer::in_memory();
    let id = proposition_confirmee(&container).await;

    container
        .bus
        .invoke(MettreEnAttenteCommand {
            uuid_proposition: id,
            gestionnaire: GESTIONNAIRE.to_string(),
            motif: Motif {
                motif: "MISSING_DOCUMENTS".to_string(),
                autre_motif: String::new(),
            },
            message: message("Your registration is on hold"),
        })
        .await
        .unwrap();
    let en_attente = proposition(&container, id).await;
    assert_eq!(en_attente.statut, "EN_ATTENTE");
    assert_eq!(
        en_attente.motif_mise_en_attente.map(|motif| motif.motif),
        Some("MISSING_DOCUMENTS".to_string())
    );

    container
        .bus
        .invoke(ApprouverParFacCommand {
            uuid_proposition: id,
            gestionnaire: GESTIONNAIRE.to_string(),
            condition: String::new(),
            message: MessageDecision::default(),
        })
        .await
        .unwrap();

    let dto = proposition(&container, id).await;
    assert_eq!(dto.statut, "CONFIRMEE");
    assert_eq!(dto.decision.as_deref(), Some("FAC_VALIDE"));
}

#[tokio::test]
async fn test_refusal_requires_a_reason() {
    let container = AdmissionContainer::in_memory();
    let id = proposition_confirmee(&container).await;

    let erreur = container
        .bus
        .invoke(RefuserPropositionCommand {
            uuid_proposition: id,
            gestionnaire: GESTIONNAIRE.to_string(),
            motif: Motif::default(),
            message: MessageDecision::default(),
        })
        .await
        .unwrap_err();
    assert_eq!(erreur.exceptions(), &[BusinessException::MotifNonSpecifie]);

    container
        .bus
        .invoke(RefuserPropositionCommand {
            uuid_proposition: id,
            gestionnaire: GESTIONNAIRE.to_string(),
            motif: Motif {
                motif: String::new(),
                autre_motif: "Course is full".to_string(),
            },
            message: MessageDecision::default(),
        })
        .await
        .unwrap();

    let dto = proposition(&container, id).await;
    assert_eq!(dto.statut, "INSCRIPTION_REFUSEE");
    assert_eq!(dto.decision.as_deref(), Some("REFUSE"));
    assert_eq!(container.notification.envoyees_a(CANDIDAT_BELGE).await.len(), 1);
}

#[tokio::test]
async fn test_decisions_stop_after_validation() {
    let container = AdmissionContainer::in_memory();
    let bus = &container.bus;
    let id = proposition_confirmee(&container).await;
    bus.invoke(ApprouverParFacCommand {
        uuid_proposition: id,
        gestionnaire: GESTIONNAIRE.to_string(),
        condition: String::new(),
        message: MessageDecision::default(),
    })
    .await
    .unwrap();
    bus.invoke(MettreAValiderCommand {
        uuid_proposition: id,
        gestionnaire: GESTIONNAIRE.to_string(),
    })
    .await
    .unwrap();
    bus.invoke(ValiderPropositionCommand {
        uuid_proposition: id,
        gestionnaire: GESTIONNAIRE.to_string(),
        message: MessageDecision::default(),
    })
    .await
    .unwrap();

    let erreur = bus
        .invoke(CloturerPropositionCommand {
            uuid_proposition: id,
            gestionnaire: GESTIONNAIRE.to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(erreur.exceptions(), &[BusinessException::SituationPropositionNonFAC]);
}
