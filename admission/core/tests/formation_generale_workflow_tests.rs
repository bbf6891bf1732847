// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for the general education workflow.
//!
//! A bachelor application goes through the faculty decision, then the
//! enrolment office (SIC) checks the prior education before authorising the
//! enrolment. Application fees are covered separately.

use admission_core::application::formation_generale::commands::*;
use admission_core::application::formation_generale::queries::{
    GetPropositionQuery, RecupererTitresAccesQuery,
};
use admission_core::application::titres_acces::SpecifierTitreAccesSelectionneCommand;
use admission_core::application::AdmissionContainer;
use admission_core::domain::doctorat::statuts::ChoixTypeDemande;
use admission_core::domain::formation_generale::proposition::FormationGenerale;
use admission_core::domain::shared::checklist::ChoixStatutChecklist;
use admission_core::domain::shared::decision::{InformationsAcceptation, MotifsRefus};
use admission_core::domain::shared::exceptions::{AdmissionError, BusinessException};
use admission_core::domain::shared::identite::PropositionIdentity;
use admission_core::domain::shared::titres_acces::{
    ConditionAcces, TrainingType, TypeTitreAccesSelectionnable,
};
use admission_core::infrastructure::fixtures::{
    CANDIDAT_BELGE, CANDIDAT_ETRANGER, EXPERIENCE_ACADEMIQUE, EXPERIENCE_NON_ACADEMIQUE,
};

const GESTIONNAIRE: &str = "gestionnaire-sic";

async fn soumettre(container: &AdmissionContainer, matricule: &str) -> PropositionIdentity {
    let id = container
        .bus
        .invoke(InitierPropositionCommand {
            matricule_candidat: matricule.to_string(),
            formation: FormationGenerale {
                sigle: "SINF1BA".to_string(),
                annee: 2024,
                training_type: TrainingType::Bachelor,
            },
        })
        .await
        .unwrap();
    container
        .bus
        .invoke(SoumettrePropositionCommand {
            uuid_proposition: id,
            matricule_auteur: matricule.to_string(),
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

fn informations_completes() -> InformationsAcceptation {
    InformationsAcceptation {
        avec_conditions_complementaires: Some(false),
        avec_complements_formation: Some(false),
        nombre_annees_prevoir_programme: Some(1),
        ..Default::default()
    }
}

async fn selectionner_titre(container: &AdmissionContainer, id: PropositionIdentity) {
    container
        .bus
        .invoke(SpecifierTitreAccesSelectionneCommand {
            uuid_proposition: id,
            uuid_experience: EXPERIENCE_ACADEMIQUE.to_string(),
            type_titre: TypeTitreAccesSelectionnable::ExperiencesAcademiques,
            annee: Some(2022),
            selectionne: true,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_faculty_then_sic_authorise_enrolment() {
    let container = AdmissionContainer::in_memory();
    let bus = &container.bus;
    let id = soumettre(&container, CANDIDAT_BELGE).await;
    assert_eq!(statut(&container, id).await, "CONFIRMEE");

    bus.invoke(EnvoyerPropositionAFacLorsDeLaDecisionFacultaireCommand {
        uuid_proposition: id,
        auteur: GESTIONNAIRE.to_string(),
    })
    .await
    .unwrap();
    assert_eq!(statut(&container, id).await, "TRAITEMENT_FAC");

    let sans_titre = bus
        .invoke(ApprouverPropositionParFaculteCommand {
            uuid_proposition: id,
            auteur: "gestionnaire-fac".to_string(),
            informations: informations_completes(),
        })
        .await
        .unwrap_err();
    assert_eq!(sans_titre.exceptions(), &[BusinessException::TitreAccesEtreSelectionne]);

    selectionner_titre(&container, id).await;
    bus.invoke(ApprouverPropositionParFaculteCommand {
        uuid_proposition: id,
        auteur: "gestionnaire-fac".to_string(),
        informations: informations_completes(),
    })
    .await
    .unwrap();
    assert_eq!(statut(&container, id).await, "RETOUR_DE_FAC");

    let prematuree = bus
        .invoke(ApprouverAdmissionParSicCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE.to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(prematuree.exceptions(), &[BusinessException::ParcoursAnterieurNonSuffisant]);

    for experience in [EXPERIENCE_ACADEMIQUE, EXPERIENCE_NON_ACADEMIQUE] {
        bus.invoke(ModifierStatutChecklistExperienceParcoursAnterieurCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE.to_string(),
            uuid_experience: experience.to_string(),
            configuration: "VALIDEE".to_string(),
        })
        .await
        .unwrap();
    }
    bus.invoke(SpecifierConditionAccesCommand {
        uuid_proposition: id,
        auteur: GESTIONNAIRE.to_string(),
        condition_acces: Some(ConditionAcces::DiplomationAcademiqueBelge),
        millesime_condition_acces: Some(2022),
    })
    .await
    .unwrap();
    bus.invoke(ModifierStatutChecklistParcoursAnterieurCommand {
        uuid_proposition: id,
        auteur: GESTIONNAIRE.to_string(),
        configuration: "SUFFISANT".to_string(),
    })
    .await
    .unwrap();

    bus.invoke(ApprouverAdmissionParSicCommand {
        uuid_proposition: id,
        auteur: GESTIONNAIRE.to_string(),
    })
    .await
    .unwrap();

    assert_eq!(statut(&container, id).await, "INSCRIPTION_AUTORISEE");
    let messages = container.notification.envoyees_a(CANDIDAT_BELGE).await;
    assert!(messages.iter().any(|message| message.objet.ends_with("approved")));
}

#[tokio::test]
async fn test_prior_education_needs_validated_experiences() {
    let container = AdmissionContainer::in_memory();
    let id = soumettre(&container, CANDIDAT_BELGE).await;
    selectionner_titre(&container, id).await;

    let erreur = container
        .bus
        .invoke(ModifierStatutChecklistParcoursAnterieurCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE.to_string(),
            configuration: "SUFFISANT".to_string(),
        })
        .await
        .unwrap_err();

    let exceptions = erreur.exceptions();
    assert!(exceptions.contains(&BusinessException::StatutsChecklistExperiencesEtreValides));
    assert!(exceptions.contains(&BusinessException::ConditionAccesEtreSelectionne));
}

#[tokio::test]
async fn test_faculty_refusal_requires_reasons() {
    let container = AdmissionContainer::in_memory();
    let id = soumettre(&container, CANDIDAT_BELGE).await;
    container
        .bus
        .invoke(EnvoyerPropositionAFacLorsDeLaDecisionFacultaireCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE.to_string(),
        })
        .await
        .unwrap();

    let erreur = container
        .bus
        .invoke(RefuserPropositionParFaculteCommand {
            uuid_proposition: id,
            auteur: "gestionnaire-fac".to_string(),
            motifs: MotifsRefus::default(),
        })
        .await
        .unwrap_err();
    assert_eq!(erreur.exceptions(), &[BusinessException::MotifRefusFacultaireNonSpecifie]);
    assert_eq!(statut(&container, id).await, "TRAITEMENT_FAC");
}

#[tokio::test]
async fn test_foreign_candidate_waits_for_application_fees() {
    let container = AdmissionContainer::in_memory();
    let id = soumettre(&container, CANDIDAT_ETRANGER).await;
    assert_eq!(statut(&container, id).await, "FRAIS_DOSSIER_EN_ATTENTE");

    container
        .bus
        .invoke(PayerFraisDossierCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_ETRANGER.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(statut(&container, id).await, "CONFIRMEE");

    let deja_paye = container
        .bus
        .invoke(PayerFraisDossierCommand {
            uuid_proposition: id,
            matricule_auteur: CANDIDAT_ETRANGER.to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(deja_paye.exceptions(), &[BusinessException::PropositionPourPaiementInvalide]);
}

#[tokio::test]
async fn test_manager_can_waive_requested_fees() {
    let container = AdmissionContainer::in_memory();
    let id = soumettre(&container, CANDIDAT_BELGE).await;

    container
        .bus
        .invoke(SpecifierPaiementNecessaireParGestionnaireCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(statut(&container, id).await, "FRAIS_DOSSIER_EN_ATTENTE");

    container
        .bus
        .invoke(SpecifierPaiementPlusNecessaireCommand {
            uuid_proposition: id,
            auteur: GESTIONNAIRE.to_string(),
            statut_checklist_frais_dossier: ChoixStatutChecklist::GestReussite,
        })
        .await
        .unwrap();

    let proposition = container
        .bus
        .invoke(GetPropositionQuery { uuid_proposition: id })
        .await
        .unwrap();
    assert_eq!(proposition.statut, "CONFIRMEE");
    assert!(proposition.checklist.iter().any(|onglet| {
        onglet.onglet == "frais_dossier" && onglet.configuration.as_deref() == Some("DISPENSE")
    }));
}

#[tokio::test]
async fn test_access_titles_of_a_belgian_candidate() {
    let container = AdmissionContainer::in_memory();
    let id = soumettre(&container, CANDIDAT_BELGE).await;
    selectionner_titre(&container, id).await;

    let titres = container
        .bus
        .invoke(RecupererTitresAccesQuery { uuid_proposition: id })
        .await
        .unwrap();

    assert_eq!(titres.training_type, TrainingType::Bachelor);
    assert!(titres.valide);
    assert!(titres.remplies.contains(&ConditionAcces::DiplomationSecondaireBelge));
    assert!(titres
        .selectionnables
        .iter()
        .any(|titre| titre.uuid_experience == EXPERIENCE_ACADEMIQUE && titre.selectionne));
}

fn checklist(onglet: &str, statut: &str) -> ModifierStatutChecklistCommand {
    ModifierStatutChecklistCommand {
        uuid_proposition: PropositionIdentity::new(),
        auteur: GESTIONNAIRE.to_string(),
        onglet: onglet.to_string(),
        statut: statut.to_string(),
        extra: Default::default(),
    }
}

#[tokio::test]
async fn test_generic_checklist_update_leaves_guarded_tabs_alone() {
    let container = AdmissionContainer::in_memory();
    let bus = &container.bus;
    let id = soumettre(&container, CANDIDAT_BELGE).await;

    for onglet in ["frais_dossier", "parcours_anterieur", "decision_facultaire", "decision_sic"] {
        let erreur = bus
            .invoke(ModifierStatutChecklistCommand {
                uuid_proposition: id,
                ..checklist(onglet, "GEST_REUSSITE")
            })
            .await
            .unwrap_err();
        assert_eq!(
            erreur.exceptions(),
            &[BusinessException::OngletChecklistReserve {
                onglet: onglet.to_string()
            }]
        );
    }

    bus.invoke(ModifierStatutChecklistCommand {
        uuid_proposition: id,
        ..checklist("donnees_personnelles", "GEST_REUSSITE")
    })
    .await
    .unwrap();

    let proposition = bus.invoke(GetPropositionQuery { uuid_proposition: id }).await.unwrap();
    let configuration = |nom: &str| {
        proposition
            .checklist
            .iter()
            .find(|onglet| onglet.onglet == nom)
            .and_then(|onglet| onglet.configuration.clone())
    };
    assert_eq!(configuration("donnees_personnelles").as_deref(), Some("VALIDEES"));
    assert_ne!(configuration("parcours_anterieur").as_deref(), Some("SUFFISANT"));
}

#[tokio::test]
async fn test_generic_checklist_update_requires_a_submitted_proposition() {
    let container = AdmissionContainer::in_memory();
    let id = container
        .bus
        .invoke(InitierPropositionCommand {
            matricule_candidat: CANDIDAT_BELGE.to_string(),
            formation: FormationGenerale {
                sigle: "SINF1BA".to_string(),
                annee: 2024,
                training_type: TrainingType::Bachelor,
            },
        })
        .await
        .unwrap();

    let erreur = container
        .bus
        .invoke(ModifierStatutChecklistCommand {
            uuid_proposition: id,
            ..checklist("donnees_personnelles", "GEST_REUSSITE")
        })
        .await
        .unwrap_err();

    assert_eq!(erreur.exceptions(), &[BusinessException::SituationPropositionNonSIC]);
}

#[tokio::test]
async fn test_access_title_selection_needs_an_existing_proposition() {
    let container = AdmissionContainer::in_memory();
    let inconnue = PropositionIdentity::new();

    let erreur = container
        .bus
        .invoke(SpecifierTitreAccesSelectionneCommand {
            uuid_proposition: inconnue,
            uuid_experience: EXPERIENCE_ACADEMIQUE.to_string(),
            type_titre: TypeTitreAccesSelectionnable::ExperiencesAcademiques,
            annee: Some(2022),
            selectionne: true,
        })
        .await
        .unwrap_err();

    assert!(matches!(erreur, AdmissionError::PropositionNonTrouvee(_)));
}
