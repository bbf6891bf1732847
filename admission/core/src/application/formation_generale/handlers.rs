// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # General Education Command Handlers
//!
//! Same load, validate, save, side effects, publish sequence as the doctorate
//! handlers. The faculty (FAC) takes the place of the doctoral committee and
//! the application fees add a payment gate after submission.

use super::commands::*;
use super::ServicesGenerale;
use crate::application::services::{
    charger, configuration_cible, enregistrer, nombre_propositions_en_cours,
};
use crate::domain::events::Contexte;
use crate::domain::formation_generale::checklist::{
    catalogue, configuration, configuration_experience, InitialiserChecklistGenerale,
    OngletsChecklistGenerale,
};
use crate::domain::formation_generale::ports::Acteur;
use crate::domain::formation_generale::proposition::PropositionGenerale;
use crate::domain::formation_generale::statuts::ChoixStatutPropositionGenerale;
use crate::domain::shared::exceptions::{
    AdmissionError, BusinessException, MultipleBusinessExceptions,
};
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::profil::ANNEES_PARCOURS_ANTERIEUR;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

const CONTEXTE: Contexte = Contexte::FormationGenerale;

async fn modifier<F>(
    s: &ServicesGenerale,
    proposition_id: PropositionIdentity,
    commande: &str,
    auteur: &str,
    action: F,
) -> Result<PropositionGenerale, AdmissionError>
where
    F: FnOnce(&mut PropositionGenerale) -> Result<(), MultipleBusinessExceptions> + Send,
{
    let mut proposition = charger(s.propositions.as_ref(), &proposition_id).await?;
    let ancien_statut = proposition.statut;
    debug!(%proposition_id, commande, "Validating command");
    action(&mut proposition)?;
    enregistrer(s.propositions.as_ref(), &mut proposition).await?;
    publier(s, &proposition, ancien_statut, commande, auteur);
    Ok(proposition)
}

fn publier(
    s: &ServicesGenerale,
    proposition: &PropositionGenerale,
    ancien_statut: ChoixStatutPropositionGenerale,
    commande: &str,
    auteur: &str,
) {
    if ancien_statut != proposition.statut {
        s.commun.publier_transition(
            CONTEXTE,
            proposition.entity_id,
            commande,
            ancien_statut.name(),
            proposition.statut.name(),
            auteur,
        );
    } else {
        s.commun.publier_modification(CONTEXTE, proposition.entity_id, commande, auteur);
    }
}

// ============================================================================
// Candidate
// ============================================================================

pub async fn initier_proposition(
    s: Arc<ServicesGenerale>,
    cmd: InitierPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let en_cours = nombre_propositions_en_cours(
        s.propositions.as_ref(),
        &cmd.matricule_candidat,
    )
    .await?;
    let reference = s.propositions.get_next_reference().await?;
    let mut proposition = PropositionGenerale::initier(
        cmd.matricule_candidat,
        cmd.formation,
        reference,
        en_cours,
        s.commun.maximum_propositions,
    )?;
    enregistrer(s.propositions.as_ref(), &mut proposition).await?;

    s.commun
        .publier_initiation(CONTEXTE, proposition.entity_id, &proposition.matricule_candidat);
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_initiation(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn completer_curriculum(
    s: Arc<ServicesGenerale>,
    cmd: CompleterCurriculumCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let auteur = cmd.matricule_auteur.clone();
    let proposition = modifier(&s, cmd.uuid_proposition, "CompleterCurriculum", &auteur, |p| {
        p.completer_curriculum(
            cmd.curriculum,
            cmd.equivalence_diplome,
            cmd.est_reorientation_inscription_externe,
            &cmd.matricule_auteur,
        )
    })
    .await?;
    Ok(proposition.entity_id)
}

pub async fn soumettre_proposition(
    s: Arc<ServicesGenerale>,
    cmd: SoumettrePropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let mut proposition = charger(s.propositions.as_ref(), &cmd.uuid_proposition).await?;
    let ancien_statut = proposition.statut;

    let profil = s.commun.profils.get_identification(&proposition.matricule_candidat).await?;
    let annee_courante = s.commun.annee_academique.annee_courante().await?;
    let experiences = s
        .commun
        .curriculum
        .get_experiences(
            &proposition.matricule_candidat,
            annee_courante.saturating_sub(ANNEES_PARCOURS_ANTERIEUR),
        )
        .await?;
    let checklist = InitialiserChecklistGenerale::initialiser(
        proposition.formation.training_type,
        &profil,
        &experiences,
        annee_courante,
    )?;

    proposition.soumettre(
        cmd.type_demande,
        checklist,
        profil.doit_payer_frais_dossier,
        Utc::now(),
        &cmd.matricule_auteur,
    )?;
    enregistrer(s.propositions.as_ref(), &mut proposition).await?;
    publier(&s, &proposition, ancien_statut, "SoumettreProposition", &cmd.matricule_auteur);

    let id = proposition.entity_id;
    s.commun
        .effet_secondaire(id, "historique", s.historique.historiser_soumission(&proposition))
        .await;
    s.commun
        .effet_secondaire(id, "notification", s.notification.notifier_soumission(&proposition))
        .await;
    Ok(id)
}

pub async fn supprimer_proposition(
    s: Arc<ServicesGenerale>,
    cmd: SupprimerPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "SupprimerProposition",
        &cmd.matricule_auteur,
        |p| p.supprimer(&cmd.matricule_auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_suppression(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn payer_frais_dossier(
    s: Arc<ServicesGenerale>,
    cmd: PayerFraisDossierCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "PayerFraisDossier",
        &cmd.matricule_auteur,
        |p| p.payer_frais_dossier(&cmd.matricule_auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_paiement_frais_dossier(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn completer_documents_par_candidat(
    s: Arc<ServicesGenerale>,
    cmd: CompleterDocumentsParCandidatCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "CompleterDocumentsParCandidat",
        &cmd.matricule_auteur,
        |p| p.completer_documents_par_candidat(&cmd.matricule_auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_completion_documents(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

// ============================================================================
// Application fees
// ============================================================================

pub async fn specifier_paiement_necessaire_par_gestionnaire(
    s: Arc<ServicesGenerale>,
    cmd: SpecifierPaiementNecessaireParGestionnaireCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "SpecifierPaiementNecessaireParGestionnaire",
        &cmd.auteur,
        |p| p.specifier_paiement_necessaire_par_gestionnaire(&cmd.auteur),
    )
    .await?;
    let id = proposition.entity_id;
    s.commun
        .effet_secondaire(
            id,
            "historique",
            s.historique.historiser_demande_paiement_par_gestionnaire(&proposition),
        )
        .await;
    s.commun
        .effet_secondaire(
            id,
            "notification",
            s.notification.notifier_paiement_necessaire(&proposition),
        )
        .await;
    Ok(id)
}

pub async fn specifier_paiement_plus_necessaire(
    s: Arc<ServicesGenerale>,
    cmd: SpecifierPaiementPlusNecessaireCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "SpecifierPaiementPlusNecessaire",
        &cmd.auteur,
        |p| p.specifier_paiement_plus_necessaire(cmd.statut_checklist_frais_dossier, &cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_annulation_paiement_par_gestionnaire(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

// ============================================================================
// Documents
// ============================================================================

pub async fn reclamer_documents_par_fac(
    s: Arc<ServicesGenerale>,
    cmd: ReclamerDocumentsAuCandidatParFacCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ReclamerDocumentsAuCandidatParFac",
        &cmd.auteur,
        |p| p.reclamer_documents_par_fac(cmd.documents, &cmd.auteur),
    )
    .await?;
    notifier_reclamation(&s, &proposition, Acteur::Fac).await;
    Ok(proposition.entity_id)
}

pub async fn reclamer_documents_par_sic(
    s: Arc<ServicesGenerale>,
    cmd: ReclamerDocumentsAuCandidatParSicCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ReclamerDocumentsAuCandidatParSic",
        &cmd.auteur,
        |p| p.reclamer_documents_par_sic(cmd.documents, &cmd.auteur),
    )
    .await?;
    notifier_reclamation(&s, &proposition, Acteur::Sic).await;
    Ok(proposition.entity_id)
}

async fn notifier_reclamation(
    s: &ServicesGenerale,
    proposition: &PropositionGenerale,
    acteur: Acteur,
) {
    let id = proposition.entity_id;
    s.commun
        .effet_secondaire(
            id,
            "historique",
            s.historique.historiser_reclamation_documents(proposition, acteur),
        )
        .await;
    s.commun
        .effet_secondaire(
            id,
            "notification",
            s.notification.notifier_reclamation_documents(proposition, acteur),
        )
        .await;
}

pub async fn annuler_reclamation_documents_par_fac(
    s: Arc<ServicesGenerale>,
    cmd: AnnulerReclamationDocumentsAuCandidatParFacCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "AnnulerReclamationDocumentsAuCandidatParFac",
        &cmd.auteur,
        |p| p.annuler_reclamation_documents_par_fac(&cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_annulation_reclamation_documents(&proposition, Acteur::Fac),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn annuler_reclamation_documents_par_sic(
    s: Arc<ServicesGenerale>,
    cmd: AnnulerReclamationDocumentsAuCandidatParSicCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "AnnulerReclamationDocumentsAuCandidatParSic",
        &cmd.auteur,
        |p| p.annuler_reclamation_documents_par_sic(&cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_annulation_reclamation_documents(&proposition, Acteur::Sic),
        )
        .await;
    Ok(proposition.entity_id)
}

// ============================================================================
// Checklist
// ============================================================================

pub async fn modifier_statut_checklist(
    s: Arc<ServicesGenerale>,
    cmd: ModifierStatutChecklistCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let onglet = OngletsChecklistGenerale::from_name(&cmd.onglet).ok_or_else(|| {
        BusinessException::OngletChecklistInconnu {
            onglet: cmd.onglet.clone(),
        }
    })?;
    let cible = configuration_cible(catalogue(), onglet.name(), &cmd.statut, &cmd.extra)?;

    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ModifierStatutChecklist",
        &cmd.auteur,
        |p| Ok(p.modifier_statut_checklist(onglet, &cible, &cmd.auteur)?),
    )
    .await?;
    s.commun
        .publier_checklist(
            CONTEXTE,
            proposition.entity_id,
            onglet.name(),
            &cible.identifiant,
            &cmd.auteur,
        );
    Ok(proposition.entity_id)
}

pub async fn modifier_statut_checklist_parcours_anterieur(
    s: Arc<ServicesGenerale>,
    cmd: ModifierStatutChecklistParcoursAnterieurCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let cible = configuration(OngletsChecklistGenerale::ParcoursAnterieur, &cmd.configuration)?;
    let titres = s.commun.titres_acces_de(&cmd.uuid_proposition).await?;

    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ModifierStatutChecklistParcoursAnterieur",
        &cmd.auteur,
        |p| p.modifier_statut_checklist_parcours_anterieur(cible, &titres, &cmd.auteur),
    )
    .await?;
    s.commun.publier_checklist(
        CONTEXTE,
        proposition.entity_id,
        OngletsChecklistGenerale::ParcoursAnterieur.name(),
        &cible.identifiant,
        &cmd.auteur,
    );
    Ok(proposition.entity_id)
}

pub async fn modifier_statut_checklist_experience(
    s: Arc<ServicesGenerale>,
    cmd: ModifierStatutChecklistExperienceParcoursAnterieurCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let cible = configuration_experience(&cmd.configuration)?;
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ModifierStatutChecklistExperienceParcoursAnterieur",
        &cmd.auteur,
        |p| Ok(p.modifier_statut_checklist_experience(&cmd.uuid_experience, cible, &cmd.auteur)?),
    )
    .await?;
    Ok(proposition.entity_id)
}

pub async fn modifier_authentification_experience(
    s: Arc<ServicesGenerale>,
    cmd: ModifierAuthentificationExperienceParcoursAnterieurCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let etat = cmd.etat_authentification;
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ModifierAuthentificationExperienceParcoursAnterieur",
        &cmd.auteur,
        |p| Ok(p.modifier_authentification_experience(&cmd.uuid_experience, etat, &cmd.auteur)?),
    )
    .await?;

    let id = proposition.entity_id;
    s.commun
        .effet_secondaire(
            id,
            "historique",
            s.historique
                .historiser_authentification_experience(&proposition, &cmd.uuid_experience, etat),
        )
        .await;
    if etat.doit_notifier_candidat() {
        s.commun
            .effet_secondaire(
                id,
                "notification",
                s.notification
                    .notifier_etat_authentification(&proposition, &cmd.uuid_experience, etat),
            )
            .await;
    }
    Ok(id)
}

pub async fn specifier_condition_acces(
    s: Arc<ServicesGenerale>,
    cmd: SpecifierConditionAccesCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "SpecifierConditionAcces",
        &cmd.auteur,
        |p| {
            p.specifier_condition_acces(
                cmd.condition_acces,
                cmd.millesime_condition_acces,
                &cmd.auteur,
            )
        },
    )
    .await?;
    Ok(proposition.entity_id)
}

// ============================================================================
// Faculty decision
// ============================================================================

pub async fn envoyer_proposition_a_fac(
    s: Arc<ServicesGenerale>,
    cmd: EnvoyerPropositionAFacLorsDeLaDecisionFacultaireCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "EnvoyerPropositionAFacLorsDeLaDecisionFacultaire",
        &cmd.auteur,
        |p| p.envoyer_a_fac_lors_de_la_decision_facultaire(&cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_envoi_fac(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn envoyer_proposition_au_sic(
    s: Arc<ServicesGenerale>,
    cmd: EnvoyerPropositionAuSicLorsDeLaDecisionFacultaireCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "EnvoyerPropositionAuSicLorsDeLaDecisionFacultaire",
        &cmd.auteur,
        |p| p.envoyer_au_sic_lors_de_la_decision_facultaire(&cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_envoi_sic(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn refuser_proposition_par_faculte(
    s: Arc<ServicesGenerale>,
    cmd: RefuserPropositionParFaculteCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "RefuserPropositionParFaculte",
        &cmd.auteur,
        |p| p.refuser_par_fac(cmd.motifs, &cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_refus_fac(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn approuver_proposition_par_faculte(
    s: Arc<ServicesGenerale>,
    cmd: ApprouverPropositionParFaculteCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let titres = s.commun.titres_acces_de(&cmd.uuid_proposition).await?;
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ApprouverPropositionParFaculte",
        &cmd.auteur,
        |p| p.approuver_par_fac(cmd.informations, &titres, &cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_acceptation_fac(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn approuver_reorientation_externe_par_faculte(
    s: Arc<ServicesGenerale>,
    cmd: ApprouverReorientationExterneParFaculteCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let titres = s.commun.titres_acces_de(&cmd.uuid_proposition).await?;
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ApprouverReorientationExterneParFaculte",
        &cmd.auteur,
        |p| p.approuver_reorientation_externe_par_fac(&titres, &cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_acceptation_fac(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

// ============================================================================
// Central enrolment office decision
// ============================================================================

pub async fn approuver_admission_par_sic(
    s: Arc<ServicesGenerale>,
    cmd: ApprouverAdmissionParSicCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let titres = s.commun.titres_acces_de(&cmd.uuid_proposition).await?;
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ApprouverAdmissionParSic",
        &cmd.auteur,
        |p| p.approuver_admission_par_sic(&titres, &cmd.auteur),
    )
    .await?;
    let id = proposition.entity_id;
    s.commun
        .effet_secondaire(id, "historique", s.historique.historiser_acceptation_sic(&proposition))
        .await;
    s.commun
        .effet_secondaire(
            id,
            "notification",
            s.notification.notifier_decision_sic(&proposition, true),
        )
        .await;
    Ok(id)
}

pub async fn refuser_admission_par_sic(
    s: Arc<ServicesGenerale>,
    cmd: RefuserAdmissionParSicCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "RefuserAdmissionParSic",
        &cmd.auteur,
        |p| p.refuser_admission_par_sic(cmd.motifs, &cmd.auteur),
    )
    .await?;
    let id = proposition.entity_id;
    s.commun
        .effet_secondaire(id, "historique", s.historique.historiser_refus_sic(&proposition))
        .await;
    s.commun
        .effet_secondaire(
            id,
            "notification",
            s.notification.notifier_decision_sic(&proposition, false),
        )
        .await;
    Ok(id)
}
