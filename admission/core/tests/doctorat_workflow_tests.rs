// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for the doctorate workflow, driven through the message bus.
//!
//! Covers:
//! - Supervision group setup, signature requests and signatory opinions
//! - Submission after every signatory approved
//! - Doctoral committee (CDD) refusal and closure

use admission_core::application::doctorat::commands::*;
use admission_core::application::doctorat::queries::{
    GetGroupeDeSupervisionQuery, GetPropositionQuery,
};
use admission_core::application::AdmissionContainer;
use admission_core::domain::doctorat::groupe_de_supervision::Cotutelle;
use admission_core::domain::doctorat::proposition::{DetailProjet, FormationDoctorale};
use admission_core::domain::doctorat::statuts::{ChoixTypeAdmission, ChoixTypeDemande};
use admission_core::domain::events::SupervisionEvent;
use admission_core::domain::shared::decision::MotifsRefus;
use admission_core::domain::shared::exceptions::{AdmissionError, BusinessException};
use admission_core::domain::shared::identite::PropositionIdentity;
use admission_core::domain::shared::titres_acces::TrainingType;
use admission_core::infrastructure::event_bus::DomainEvent;
use admission_core::infrastructure::fixtures::{CANDIDAT_BELGE, MEMBRE_CA_1, PROMOTEUR_1};

const GESTIONNAIRE_CDD: &str = "gestionnaire-cdd";

async fn initier(container: &AdmissionContainer) -> PropositionIdentity {
    let id = container
        .bus
        .invoke(InitierPropositionCommand {
            matricule_candidat: CANDIDAT_BELGE.to_string(),
            formation: FormationDoctorale {
                sigle: "SC3DP".to_string(),
                annee: 2024,
                training_type: TrainingType::Phd,
            },
            type_admission: ChoixTypeAdmission::Admission,
            justification: String::new(),
            commission_proximite: None,
        })
        .await
        .unwrap();

    container
        .bus
        .invoke(CompleterPropositionCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_BELGE.to_string(),
            type_admission: ChoixTypeAdmission::Admission,
            justification: String::new(),
            commission_proximite: None,
            financement: Default::default(),
            projet: DetailProjet {
                titre: "Graph rewriting".to_string(),
                resume: "Confluence of term graph rewriting".to_string(),
                langue_redaction_these: "FR".to_string(),
                institut_these: Some("ICTEAM".to_string()),
                documents: vec!["projet.pdf".to_string()],
                ..Default::default()
            },
            experience_precedente_recherche: Default::default(),
        })
        .await
        .unwrap();
    id
}

async fn constituer_groupe(container: &AdmissionContainer, id: PropositionIdentity) {
    let bus = &container.bus;
    bus.invoke(IdentifierPromoteurCommand {
        uuid_proposition: id,
        matricule: PROMOTEUR_1.to_string(),
    })
    .await
    .unwrap();
    bus.invoke(IdentifierMembreCACommand {
        uuid_proposition: id,
        matricule: MEMBRE_CA_1.to_string(),
    })
    .await
    .unwrap();
    bus.invoke(DesignerPromoteurReferenceCommand {
        uuid_proposition: id,
        matricule: PROMOTEUR_1.to_string(),
    })
    .await
    .unwrap();
    bus.invoke(DefinirCotutelleCommand {
        uuid_proposition: id,
        cotutelle: Cotutelle {
            cotutelle: Some(false),
            ..Default::default()
        },
    })
    .await
    .unwrap();
}

async fn approuver(container: &AdmissionContainer, id: PropositionIdentity, matricule: &str) {
    container
        .bus
        .invoke(ApprouverPropositionCommand {
            uuid_proposition: id,
            matricule: matricule.to_string(),
            commentaire_interne: String::new(),
            commentaire_externe: String::new(),
            institut_these: None,
        })
        .await
        .unwrap();
}

/// Proposition signed by the whole group and submitted.
async fn proposition_soumise(container: &AdmissionContainer) -> PropositionIdentity {
    let id = initier(container).await;
    constituer_groupe(container, id).await;
    container
        .bus
        .invoke(DemanderSignaturesCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_BELGE.to_string(),
        })
        .await
        .unwrap();
    approuver(container, id, PROMOTEUR_1).await;
    approuver(container, id, MEMBRE_CA_1).await;
    container
        .bus
        .invoke(SoumettrePropositionCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_BELGE.to_string(),
            type_demande: ChoixTypeDemande::Admission,
        })
        .await
        .unwrap();
    id
}

async fn statut(container: &AdmissionContainer, id: PropositionIdentity) -> String {
    container
        .bus
        .invoke(GetPropositionQuery { uuid_proposition: id })
        .await
        .unwrap()
        .statut
}

#[tokio::test]
async fn test_signature_request_requires_a_complete_group() {
    let container = AdmissionContainer::in_memory();
    let id = initier(&container).await;

    let erreur = container
        .bus
        .invoke(DemanderSignaturesCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_BELGE.to_string(),
        })
        .await
        .unwrap_err();

    let exceptions = erreur.exceptions();
    assert!(exceptions.contains(&BusinessException::CotutelleNonComplete));
    assert!(exceptions.contains(&BusinessException::MembreCAManquant));
    assert!(exceptions.contains(&BusinessException::PromoteurManquant));
    assert!(exceptions.contains(&BusinessException::PromoteurDeReferenceManquant));
    assert_eq!(statut(&container, id).await, "EN_BROUILLON");
}

#[tokio::test]
async fn test_signature_request_invites_every_member() {
    let container = AdmissionContainer::in_memory();
    let id = initier(&container).await;
    constituer_groupe(&container, id).await;
    let mut events = container.event_bus.subscribe_proposition(id);

    container
        .bus
        .invoke(DemanderSignaturesCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_BELGE.to_string(),
        })
        .await
        .unwrap();

    assert_eq!(statut(&container, id).await, "EN_ATTENTE_DE_SIGNATURE");
    let groupe = container
        .bus
        .invoke(GetGroupeDeSupervisionQuery { uuid_proposition: id })
        .await
        .unwrap();
    assert_eq!(groupe.statut_signature, "SIGNING_IN_PROGRESS");

    let invites = loop {
        if let DomainEvent::Supervision(SupervisionEvent::SignaturesDemandees { invites, .. }) =
            events.recv().await.unwrap()
        {
            break invites;
        }
    };
    assert_eq!(invites, vec![PROMOTEUR_1.to_string(), MEMBRE_CA_1.to_string()]);
    assert_eq!(container.notification.envoyees_a(PROMOTEUR_1).await.len(), 1);
    assert_eq!(container.notification.envoyees_a(MEMBRE_CA_1).await.len(), 1);
}

#[tokio::test]
async fn test_group_cannot_change_once_signatures_requested() {
    let container = AdmissionContainer::in_memory();
    let id = initier(&container).await;
    constituer_groupe(&container, id).await;
    container
        .bus
        .invoke(DemanderSignaturesCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_BELGE.to_string(),
        })
        .await
        .unwrap();

    let erreur = container
        .bus
        .invoke(SupprimerMembreCACommand {
            uuid_proposition: id,
            matricule: MEMBRE_CA_1.to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(erreur.exceptions(), &[BusinessException::ProcedureDemandeSignatureLancee]);

    let reference = container
        .bus
        .invoke(DesignerPromoteurReferenceCommand {
            uuid_proposition: id,
            matricule: PROMOTEUR_1.to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(reference.exceptions(), &[BusinessException::ProcedureDemandeSignatureLancee]);

    let cotutelle = container
        .bus
        .invoke(DefinirCotutelleCommand {
            uuid_proposition: id,
            cotutelle: Cotutelle {
                cotutelle: Some(true),
                motivation: "Joint supervision with Leuven".to_string(),
                institution: "KU Leuven".to_string(),
                ..Default::default()
            },
        })
        .await
        .unwrap_err();
    assert_eq!(cotutelle.exceptions(), &[BusinessException::ProcedureDemandeSignatureLancee]);
}

#[tokio::test]
async fn test_promoter_refusal_sends_proposition_back_to_draft() {
    let container = AdmissionContainer::in_memory();
    let id = initier(&container).await;
    constituer_groupe(&container, id).await;
    container
        .bus
        .invoke(DemanderSignaturesCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_BELGE.to_string(),
        })
        .await
        .unwrap();

    let sans_motif = container
        .bus
        .invoke(RefuserPropositionCommand {
            uuid_proposition: id,
            matricule: PROMOTEUR_1.to_string(),
            motif_refus: String::new(),
            commentaire_interne: String::new(),
            commentaire_externe: String::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(sans_motif.exceptions(), &[BusinessException::MotifRefusSignataireNonSpecifie]);

    container
        .bus
        .invoke(RefuserPropositionCommand {
            uuid_proposition: id,
            matricule: PROMOTEUR_1.to_string(),
            motif_refus: "Project out of scope".to_string(),
            commentaire_interne: String::new(),
            commentaire_externe: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(statut(&container, id).await, "EN_BROUILLON");
    let avis = container.notification.envoyees_a(CANDIDAT_BELGE).await;
    assert!(avis.iter().any(|message| message.objet.contains("declined")));
}

#[tokio::test]
async fn test_submission_after_full_approval() {
    let container = AdmissionContainer::in_memory();
    let id = proposition_soumise(&container).await;

    let proposition = container
        .bus
        .invoke(GetPropositionQuery { uuid_proposition: id })
        .await
        .unwrap();
    assert_eq!(proposition.statut, "CONFIRMEE");
    assert!(proposition.soumise_le.is_some());
    assert!(proposition.checklist.iter().any(|onglet| {
        onglet.onglet == "decision_cdd" && onglet.configuration.as_deref() == Some("A_TRAITER")
    }));

    let historique = container.historique.entrees_de(&id).await;
    assert!(historique
        .iter()
        .any(|entree| entree.message == "The proposition has been submitted."));
}

#[tokio::test]
async fn test_cdd_closure_is_final() {
    let container = AdmissionContainer::in_memory();
    let id = proposition_soumise(&container).await;

    container
        .bus
        .invoke(EnvoyerPropositionACddLorsDeLaDecisionCddCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE_CDD.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(statut(&container, id).await, "TRAITEMENT_FAC");

    container
        .bus
        .invoke(CloturerPropositionParCddCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE_CDD.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(statut(&container, id).await, "CLOTUREE");

    let encore = container
        .bus
        .invoke(CloturerPropositionParCddCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE_CDD.to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(encore.exceptions(), &[BusinessException::SituationPropositionNonCdd]);

    let historique = container.historique.entrees_de(&id).await;
    assert!(historique
        .iter()
        .any(|entree| entree.tags.contains(&"closure".to_string())));
}

#[tokio::test]
async fn test_cdd_refusal_requires_reasons() {
    let container = AdmissionContainer::in_memory();
    let id = proposition_soumise(&container).await;
    container
        .bus
        .invoke(EnvoyerPropositionACddLorsDeLaDecisionCddCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE_CDD.to_string(),
        })
        .await
        .unwrap();

    let erreur = container
        .bus
        .invoke(RefuserPropositionParCddCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE_CDD.to_string(),
            motifs: MotifsRefus::default(),
        })
        .await
        .unwrap_err();
    assert_eq!(erreur.exceptions(), &[BusinessException::MotifRefusCDDNonSpecifie]);
    assert_eq!(statut(&container, id).await, "TRAITEMENT_FAC");

    container
        .bus
        .invoke(RefuserPropositionParCddCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE_CDD.to_string(),
            motifs: MotifsRefus {
                motifs: vec!["insufficient-background".to_string()],
                autres_motifs: Vec::new(),
            },
        })
        .await
        .unwrap();

    let proposition = container
        .bus
        .invoke(GetPropositionQuery { uuid_proposition: id })
        .await
        .unwrap();
    assert_eq!(proposition.statut, "RETOUR_DE_FAC");
    assert!(proposition.checklist.iter().any(|onglet| {
        onglet.onglet == "decision_cdd" && onglet.configuration.as_deref() == Some("REFUS")
    }));

    // A refused file can no longer be closed by the committee.
    let cloture = container
        .bus
        .invoke(CloturerPropositionParCddCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE_CDD.to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(cloture.exceptions(), &[BusinessException::SituationPropositionNonCdd]);
}

#[tokio::test]
async fn test_unknown_proposition_is_not_found() {
    let container = AdmissionContainer::in_memory();
    let erreur = container
        .bus
        .invoke(CloturerPropositionParCddCommand {
            uuid_proposition: PropositionIdentity::new(),
            auteur: GESTIONNAIRE_CDD.to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(erreur, AdmissionError::PropositionNonTrouvee(_)));
}

fn modification_checklist(
    id: PropositionIdentity,
    onglet: &str,
    statut: &str,
) -> ModifierStatutChecklistCommand {
    ModifierStatutChecklistCommand {
        uuid_proposition: id,
        auteur: GESTIONNAIRE_CDD.to_string(),
        onglet: onglet.to_string(),
        statut: statut.to_string(),
        extra: Default::default(),
    }
}

async fn configuration(
    container: &AdmissionContainer,
    id: PropositionIdentity,
    onglet: &str,
) -> Option<String> {
    container
        .bus
        .invoke(GetPropositionQuery { uuid_proposition: id })
        .await
        .unwrap()
        .checklist
        .into_iter()
        .find(|dto| dto.onglet == onglet)
        .and_then(|dto| dto.configuration)
}

#[tokio::test]
async fn test_generic_checklist_update_cannot_bypass_prior_education_rules() {
    let container = AdmissionContainer::in_memory();
    let id = proposition_soumise(&container).await;

    let refus = container
        .bus
        .invoke(ModifierStatutChecklistParcoursAnterieurCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE_CDD.to_string(),
            configuration: "SUFFISANT".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(refus.exceptions().len(), 3);

    let contournement = container
        .bus
        .invoke(modification_checklist(id, "parcours_anterieur", "GEST_REUSSITE"))
        .await
        .unwrap_err();
    assert_eq!(
        contournement.exceptions(),
        &[BusinessException::OngletChecklistReserve {
            onglet: "parcours_anterieur".to_string()
        }]
    );
    assert_ne!(
        configuration(&container, id, "parcours_anterieur").await.as_deref(),
        Some("SUFFISANT")
    );

    let cloture = container
        .bus
        .invoke(ModifierStatutChecklistCommand {
            extra: [("decision".to_string(), "CLOTURE".to_string())].into_iter().collect(),
            ..modification_checklist(id, "decision_cdd", "GEST_BLOCAGE")
        })
        .await
        .unwrap_err();
    assert_eq!(
        cloture.exceptions(),
        &[BusinessException::OngletChecklistReserve {
            onglet: "decision_cdd".to_string()
        }]
    );
    assert_eq!(configuration(&container, id, "decision_cdd").await.as_deref(), Some("A_TRAITER"));

    container
        .bus
        .invoke(modification_checklist(id, "projet_recherche", "GEST_REUSSITE"))
        .await
        .unwrap();
    assert_eq!(configuration(&container, id, "projet_recherche").await.as_deref(), Some("VALIDE"));
}

#[tokio::test]
async fn test_generic_checklist_update_refused_on_draft() {
    let container = AdmissionContainer::in_memory();
    let id = initier(&container).await;

    let erreur = container
        .bus
        .invoke(modification_checklist(id, "projet_recherche", "GEST_REUSSITE"))
        .await
        .unwrap_err();

    assert_eq!(erreur.exceptions(), &[BusinessException::SituationPropositionNonSIC]);
}
