// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Doctorate Command Handlers
//!
//! Every handler follows the same shape:
//!
//! 1. **Given**: load the proposition (and supervision group); an unknown
//!    identity fails before any rule runs
//! 2. **When**: the aggregate validates and mutates itself
//! 3. **Then**: save, historise, notify, publish; return the identity
//!
//! Handlers never call each other.

use super::commands::*;
use super::ServicesDoctorat;
use crate::application::services::{
    charger, configuration_cible, enregistrer, nombre_propositions_en_cours,
};
use crate::domain::doctorat::checklist::{
    catalogue, configuration, configuration_experience, InitialiserChecklist,
    OngletsChecklistDoctorat,
};
use crate::domain::doctorat::groupe_de_supervision::{GroupeDeSupervision, RoleSignataire};
use crate::domain::doctorat::ports::Acteur;
use crate::domain::doctorat::proposition::{NouvellePropositionDoctorat, PropositionDoctorat};
use crate::domain::doctorat::statuts::ChoixStatutPropositionDoctorale;
use crate::domain::events::{Contexte, SupervisionEvent};
use crate::domain::shared::exceptions::{
    AdmissionError, BusinessException, MultipleBusinessExceptions,
};
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::profil::ANNEES_PARCOURS_ANTERIEUR;
use crate::domain::shared::repository::{AggregateVersionne, RepositoryError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

const CONTEXTE: Contexte = Contexte::Doctorat;

// ============================================================================
// Shared steps
// ============================================================================

async fn charger_groupe(
    s: &ServicesDoctorat,
    proposition_id: &PropositionIdentity,
) -> Result<GroupeDeSupervision, AdmissionError> {
    s.groupes
        .get_by_proposition_id(proposition_id)
        .await
        .map_err(|erreur| match erreur {
            RepositoryError::NotFound(_) => AdmissionError::GroupeDeSupervisionNonTrouve(
                proposition_id.to_string(),
            ),
            autre => AdmissionError::Repository(autre),
        })
}

async fn enregistrer_groupe(
    s: &ServicesDoctorat,
    groupe: &mut GroupeDeSupervision,
) -> Result<(), AdmissionError> {
    let version = s.groupes.save(groupe).await?;
    groupe.definir_version(version);
    Ok(())
}

/// Load, mutate and save a proposition, then publish the change.
async fn modifier<F>(
    s: &ServicesDoctorat,
    proposition_id: PropositionIdentity,
    commande: &str,
    auteur: &str,
    action: F,
) -> Result<PropositionDoctorat, AdmissionError>
where
    F: FnOnce(&mut PropositionDoctorat) -> Result<(), MultipleBusinessExceptions> + Send,
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
    s: &ServicesDoctorat,
    proposition: &PropositionDoctorat,
    ancien_statut: ChoixStatutPropositionDoctorale,
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
    s: Arc<ServicesDoctorat>,
    cmd: InitierPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let en_cours = nombre_propositions_en_cours(
        s.propositions.as_ref(),
        &cmd.matricule_candidat,
    )
    .await?;
    let reference = s.propositions.get_next_reference().await?;

    let mut proposition = PropositionDoctorat::initier(
        NouvellePropositionDoctorat {
            matricule_candidat: cmd.matricule_candidat,
            formation: cmd.formation,
            type_admission: cmd.type_admission,
            justification: cmd.justification,
            commission_proximite: cmd.commission_proximite,
        },
        reference,
        en_cours,
        s.commun.maximum_propositions,
    )?;
    let mut groupe = GroupeDeSupervision::new(proposition.entity_id);

    enregistrer(s.propositions.as_ref(), &mut proposition).await?;
    enregistrer_groupe(&s, &mut groupe).await?;

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

pub async fn completer_proposition(
    s: Arc<ServicesDoctorat>,
    cmd: CompleterPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let auteur = cmd.matricule_auteur.clone();
    let proposition = modifier(&s, cmd.uuid_proposition, "CompleterProposition", &auteur, |p| {
        p.completer(
            cmd.type_admission,
            cmd.justification,
            cmd.commission_proximite,
            cmd.financement,
            cmd.projet,
            cmd.experience_precedente_recherche,
            &cmd.matricule_auteur,
        )
    })
    .await?;
    Ok(proposition.entity_id)
}

pub async fn modifier_type_admission(
    s: Arc<ServicesDoctorat>,
    cmd: ModifierTypeAdmissionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let auteur = cmd.matricule_auteur.clone();
    let proposition = modifier(&s, cmd.uuid_proposition, "ModifierTypeAdmission", &auteur, |p| {
        p.modifier_type_admission(cmd.type_admission, cmd.justification, &cmd.matricule_auteur)
    })
    .await?;
    Ok(proposition.entity_id)
}

pub async fn completer_comptabilite(
    s: Arc<ServicesDoctorat>,
    cmd: CompleterComptabiliteCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let auteur = cmd.matricule_auteur.clone();
    let proposition = modifier(&s, cmd.uuid_proposition, "CompleterComptabilite", &auteur, |p| {
        p.completer_comptabilite(cmd.comptabilite, &cmd.matricule_auteur)
    })
    .await?;
    Ok(proposition.entity_id)
}

pub async fn soumettre_proposition(
    s: Arc<ServicesDoctorat>,
    cmd: SoumettrePropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let mut proposition = charger(s.propositions.as_ref(), &cmd.uuid_proposition).await?;
    let groupe = charger_groupe(&s, &cmd.uuid_proposition).await?;
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
    let checklist =
        InitialiserChecklist::initialiser(
            proposition.type_admission,
            &profil,
            &experiences,
            annee_courante,
        )?;

    proposition.soumettre(&groupe, cmd.type_demande, checklist, Utc::now(), &cmd.matricule_auteur)?;
    enregistrer(s.propositions.as_ref(), &mut proposition).await?;
    publier(&s, &proposition, ancien_statut, "SoumettreProposition", &cmd.matricule_auteur);

    let id = proposition.entity_id;
    s.commun
        .effet_secondaire(id, "historique", s.historique.historiser_soumission(&proposition))
        .await;
    s.commun
        .effet_secondaire(
            id,
            "notification",
            s.notification.notifier_soumission(&proposition, &groupe),
        )
        .await;
    Ok(id)
}

pub async fn supprimer_proposition(
    s: Arc<ServicesDoctorat>,
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

pub async fn completer_documents_par_candidat(
    s: Arc<ServicesDoctorat>,
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
// Supervision group
// ============================================================================

async fn identifier_membre(
    s: &ServicesDoctorat,
    proposition_id: PropositionIdentity,
    matricule: &str,
    role: RoleSignataire,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = charger(s.propositions.as_ref(), &proposition_id).await?;
    proposition.verifier_groupe_modifiable()?;
    let mut groupe = charger_groupe(s, &proposition_id).await?;
    let personne_connue = s.commun.personnes.get(matricule).await?.is_some();

    groupe.identifier_membre(matricule, role, personne_connue)?;
    enregistrer_groupe(s, &mut groupe).await?;

    info!(%proposition_id, matricule, %role, "Supervision member added");
    s.commun.event_bus.publish_supervision_event(SupervisionEvent::MembreAjoute {
        proposition_id,
        matricule: matricule.to_string(),
        role: role.name().to_string(),
    });
    Ok(proposition_id)
}

pub async fn identifier_promoteur(
    s: Arc<ServicesDoctorat>,
    cmd: IdentifierPromoteurCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    identifier_membre(&s, cmd.uuid_proposition, &cmd.matricule, RoleSignataire::Promoteur).await
}

pub async fn identifier_membre_ca(
    s: Arc<ServicesDoctorat>,
    cmd: IdentifierMembreCACommand,
) -> Result<PropositionIdentity, AdmissionError> {
    identifier_membre(&s, cmd.uuid_proposition, &cmd.matricule, RoleSignataire::MembreCa).await
}

async fn supprimer_membre(
    s: &ServicesDoctorat,
    proposition_id: PropositionIdentity,
    matricule: &str,
    role: RoleSignataire,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = charger(s.propositions.as_ref(), &proposition_id).await?;
    proposition.verifier_groupe_modifiable()?;
    let mut groupe = charger_groupe(s, &proposition_id).await?;

    groupe.supprimer_membre(matricule, role)?;
    enregistrer_groupe(s, &mut groupe).await?;

    info!(%proposition_id, matricule, %role, "Supervision member removed");
    s.commun.event_bus.publish_supervision_event(SupervisionEvent::MembreRetire {
        proposition_id,
        matricule: matricule.to_string(),
        role: role.name().to_string(),
    });
    Ok(proposition_id)
}

pub async fn supprimer_promoteur(
    s: Arc<ServicesDoctorat>,
    cmd: SupprimerPromoteurCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    supprimer_membre(&s, cmd.uuid_proposition, &cmd.matricule, RoleSignataire::Promoteur).await
}

pub async fn supprimer_membre_ca(
    s: Arc<ServicesDoctorat>,
    cmd: SupprimerMembreCACommand,
) -> Result<PropositionIdentity, AdmissionError> {
    supprimer_membre(&s, cmd.uuid_proposition, &cmd.matricule, RoleSignataire::MembreCa).await
}

pub async fn designer_promoteur_reference(
    s: Arc<ServicesDoctorat>,
    cmd: DesignerPromoteurReferenceCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = charger(s.propositions.as_ref(), &cmd.uuid_proposition).await?;
    proposition.verifier_groupe_modifiable()?;
    let mut groupe = charger_groupe(&s, &cmd.uuid_proposition).await?;
    groupe.designer_promoteur_reference(&cmd.matricule)?;
    enregistrer_groupe(&s, &mut groupe).await?;
    info!(
        proposition_id = %cmd.uuid_proposition,
        matricule = %cmd.matricule,
        "Reference promoter designated"
    );
    Ok(cmd.uuid_proposition)
}

pub async fn definir_cotutelle(
    s: Arc<ServicesDoctorat>,
    cmd: DefinirCotutelleCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = charger(s.propositions.as_ref(), &cmd.uuid_proposition).await?;
    proposition.verifier_groupe_modifiable()?;
    let mut groupe = charger_groupe(&s, &cmd.uuid_proposition).await?;
    groupe.definir_cotutelle(cmd.cotutelle)?;
    enregistrer_groupe(&s, &mut groupe).await?;
    info!(proposition_id = %cmd.uuid_proposition, "Cotutelle defined");
    Ok(cmd.uuid_proposition)
}

pub async fn demander_signatures(
    s: Arc<ServicesDoctorat>,
    cmd: DemanderSignaturesCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let mut proposition = charger(s.propositions.as_ref(), &cmd.uuid_proposition).await?;
    let mut groupe = charger_groupe(&s, &cmd.uuid_proposition).await?;
    let ancien_statut = proposition.statut;

    proposition.demander_signatures(&groupe, &cmd.matricule_auteur)?;
    let invites = groupe.inviter_a_signer();

    enregistrer(s.propositions.as_ref(), &mut proposition).await?;
    enregistrer_groupe(&s, &mut groupe).await?;
    publier(&s, &proposition, ancien_statut, "DemanderSignatures", &cmd.matricule_auteur);
    s.commun.event_bus.publish_supervision_event(SupervisionEvent::SignaturesDemandees {
        proposition_id: proposition.entity_id,
        invites: invites.clone(),
        demandees_le: Utc::now(),
    });

    let id = proposition.entity_id;
    s.commun
        .effet_secondaire(
            id,
            "historique",
            s.historique.historiser_demande_signatures(&proposition, &invites),
        )
        .await;
    s.commun
        .effet_secondaire(
            id,
            "notification",
            s.notification.envoyer_invitations_signature(&proposition, &invites),
        )
        .await;
    Ok(id)
}

pub async fn approuver_proposition(
    s: Arc<ServicesDoctorat>,
    cmd: ApprouverPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let mut proposition = charger(s.propositions.as_ref(), &cmd.uuid_proposition).await?;
    proposition.verifier_en_attente_de_signature()?;
    let mut groupe = charger_groupe(&s, &cmd.uuid_proposition).await?;

    let premier_promoteur = groupe.role_de(&cmd.matricule) == Some(RoleSignataire::Promoteur)
        && groupe.aucun_promoteur_n_a_approuve();
    let role = groupe.approuver(
        &cmd.matricule,
        &cmd.commentaire_interne,
        &cmd.commentaire_externe,
        Utc::now(),
    )?;
    if role == RoleSignataire::Promoteur {
        proposition.definir_institut_these(cmd.institut_these.clone(), premier_promoteur)?;
        enregistrer(s.propositions.as_ref(), &mut proposition).await?;
    }
    enregistrer_groupe(&s, &mut groupe).await?;

    info!(
        proposition_id = %cmd.uuid_proposition,
        matricule = %cmd.matricule,
        %role,
        "Proposition approved by signatory"
    );
    s.commun.event_bus.publish_supervision_event(SupervisionEvent::PropositionApprouvee {
        proposition_id: cmd.uuid_proposition,
        matricule: cmd.matricule.clone(),
    });

    let id = proposition.entity_id;
    s.commun
        .effet_secondaire(
            id,
            "historique",
            s.historique.historiser_avis_signataire(&proposition, &cmd.matricule, role, true),
        )
        .await;
    s.commun
        .effet_secondaire(
            id,
            "notification",
            s.notification.notifier_avis_signataire(&proposition, &cmd.matricule, role, true),
        )
        .await;
    Ok(id)
}

pub async fn refuser_proposition(
    s: Arc<ServicesDoctorat>,
    cmd: RefuserPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let mut proposition = charger(s.propositions.as_ref(), &cmd.uuid_proposition).await?;
    proposition.verifier_en_attente_de_signature()?;
    let mut groupe = charger_groupe(&s, &cmd.uuid_proposition).await?;
    let ancien_statut = proposition.statut;

    let role = groupe.refuser(
        &cmd.matricule,
        &cmd.motif_refus,
        &cmd.commentaire_interne,
        &cmd.commentaire_externe,
        Utc::now(),
    )?;
    if role == RoleSignataire::Promoteur {
        proposition.reinitialiser_apres_refus_promoteur(&cmd.matricule);
        enregistrer(s.propositions.as_ref(), &mut proposition).await?;
        publier(&s, &proposition, ancien_statut, "RefuserProposition", &cmd.matricule);
    }
    enregistrer_groupe(&s, &mut groupe).await?;

    info!(
        proposition_id = %cmd.uuid_proposition,
        matricule = %cmd.matricule,
        %role,
        "Proposition declined by signatory"
    );
    s.commun.event_bus.publish_supervision_event(SupervisionEvent::PropositionRefusee {
        proposition_id: cmd.uuid_proposition,
        matricule: cmd.matricule.clone(),
    });

    let id = proposition.entity_id;
    s.commun
        .effet_secondaire(
            id,
            "historique",
            s.historique.historiser_avis_signataire(&proposition, &cmd.matricule, role, false),
        )
        .await;
    s.commun
        .effet_secondaire(
            id,
            "notification",
            s.notification.notifier_avis_signataire(&proposition, &cmd.matricule, role, false),
        )
        .await;
    Ok(id)
}

// ============================================================================
// Document requests
// ============================================================================

pub async fn reclamer_documents_par_cdd(
    s: Arc<ServicesDoctorat>,
    cmd: ReclamerDocumentsAuCandidatParCddCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ReclamerDocumentsAuCandidatParCdd",
        &cmd.auteur,
        |p| p.reclamer_documents_par_fac(cmd.documents, &cmd.auteur),
    )
    .await?;
    notifier_reclamation(&s, &proposition, Acteur::Cdd).await;
    Ok(proposition.entity_id)
}

pub async fn reclamer_documents_par_sic(
    s: Arc<ServicesDoctorat>,
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
    s: &ServicesDoctorat,
    proposition: &PropositionDoctorat,
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

pub async fn annuler_reclamation_documents_par_cdd(
    s: Arc<ServicesDoctorat>,
    cmd: AnnulerReclamationDocumentsAuCandidatParCddCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "AnnulerReclamationDocumentsAuCandidatParCdd",
        &cmd.auteur,
        |p| p.annuler_reclamation_documents_par_fac(&cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_annulation_reclamation_documents(&proposition, Acteur::Cdd),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn annuler_reclamation_documents_par_sic(
    s: Arc<ServicesDoctorat>,
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
    s: Arc<ServicesDoctorat>,
    cmd: ModifierStatutChecklistCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let onglet = OngletsChecklistDoctorat::from_name(&cmd.onglet).ok_or_else(|| {
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
    s: Arc<ServicesDoctorat>,
    cmd: ModifierStatutChecklistParcoursAnterieurCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let cible = configuration(OngletsChecklistDoctorat::ParcoursAnterieur, &cmd.configuration)?;
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
        OngletsChecklistDoctorat::ParcoursAnterieur.name(),
        &cible.identifiant,
        &cmd.auteur,
    );
    Ok(proposition.entity_id)
}

pub async fn modifier_statut_checklist_experience(
    s: Arc<ServicesDoctorat>,
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
    s: Arc<ServicesDoctorat>,
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
    s: Arc<ServicesDoctorat>,
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

pub async fn specifier_financabilite_regle(
    s: Arc<ServicesDoctorat>,
    cmd: SpecifierFinancabiliteRegleCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "SpecifierFinancabiliteRegle",
        &cmd.auteur,
        |p| p.specifier_financabilite_regle(cmd.regle, cmd.financable, &cmd.auteur),
    )
    .await?;
    Ok(proposition.entity_id)
}

pub async fn specifier_financabilite_non_concernee(
    s: Arc<ServicesDoctorat>,
    cmd: SpecifierFinancabiliteNonConcerneeCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "SpecifierFinancabiliteNonConcernee",
        &cmd.auteur,
        |p| p.specifier_financabilite_non_concernee(&cmd.auteur),
    )
    .await?;
    Ok(proposition.entity_id)
}

pub async fn specifier_derogation_financabilite(
    s: Arc<ServicesDoctorat>,
    cmd: SpecifierDerogationFinancabiliteCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "SpecifierDerogationFinancabilite",
        &cmd.auteur,
        |p| p.specifier_derogation_financabilite(cmd.derogation, &cmd.auteur),
    )
    .await?;
    Ok(proposition.entity_id)
}

// ============================================================================
// Doctoral committee
// ============================================================================

pub async fn envoyer_proposition_a_cdd(
    s: Arc<ServicesDoctorat>,
    cmd: EnvoyerPropositionACddLorsDeLaDecisionCddCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "EnvoyerPropositionACddLorsDeLaDecisionCdd",
        &cmd.auteur,
        |p| p.envoyer_en_cdd_pour_decision(&cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_envoi_cdd(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn envoyer_proposition_au_sic(
    s: Arc<ServicesDoctorat>,
    cmd: EnvoyerPropositionAuSicLorsDeLaDecisionCddCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "EnvoyerPropositionAuSicLorsDeLaDecisionCdd",
        &cmd.auteur,
        |p| p.envoyer_au_sic_lors_de_la_decision_cdd(&cmd.auteur),
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

pub async fn refuser_proposition_par_cdd(
    s: Arc<ServicesDoctorat>,
    cmd: RefuserPropositionParCddCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "RefuserPropositionParCdd",
        &cmd.auteur,
        |p| p.refuser_par_cdd(cmd.motifs, &cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_refus_cdd(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn approuver_proposition_par_cdd(
    s: Arc<ServicesDoctorat>,
    cmd: ApprouverPropositionParCddCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let titres = s.commun.titres_acces_de(&cmd.uuid_proposition).await?;
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ApprouverPropositionParCdd",
        &cmd.auteur,
        |p| p.approuver_par_cdd(cmd.informations, &titres, Utc::now(), &cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_acceptation_cdd(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn cloturer_proposition_par_cdd(
    s: Arc<ServicesDoctorat>,
    cmd: CloturerPropositionParCddCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "CloturerPropositionParCdd",
        &cmd.auteur,
        |p| p.cloturer_par_cdd(&cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_cloture_cdd(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

// ============================================================================
// Central enrolment office
// ============================================================================

pub async fn specifier_besoin_de_derogation(
    s: Arc<ServicesDoctorat>,
    cmd: SpecifierBesoinDeDerogationSicCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "SpecifierBesoinDeDerogationSic",
        &cmd.auteur,
        |p| p.specifier_besoin_de_derogation(cmd.besoin_de_derogation, &cmd.auteur),
    )
    .await?;
    Ok(proposition.entity_id)
}

pub async fn specifier_motifs_refus_par_sic(
    s: Arc<ServicesDoctorat>,
    cmd: SpecifierMotifsRefusPropositionParSicCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "SpecifierMotifsRefusPropositionParSic",
        &cmd.auteur,
        |p| p.specifier_motifs_refus_par_sic(cmd.motifs, &cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique.historiser_specification_motifs_refus_sic(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn refuser_admission_par_sic(
    s: Arc<ServicesDoctorat>,
    cmd: RefuserAdmissionParSicCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "RefuserAdmissionParSic",
        &cmd.auteur,
        |p| p.refuser_admission_par_sic(&cmd.auteur),
    )
    .await?;
    notifier_decision_sic(&s, &proposition, false).await;
    Ok(proposition.entity_id)
}

pub async fn specifier_informations_acceptation_par_sic(
    s: Arc<ServicesDoctorat>,
    cmd: SpecifierInformationsAcceptationPropositionParSicCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "SpecifierInformationsAcceptationPropositionParSic",
        &cmd.auteur,
        |p| p.specifier_informations_acceptation_par_sic(cmd.informations, &cmd.auteur),
    )
    .await?;
    s.commun
        .effet_secondaire(
            proposition.entity_id,
            "historique",
            s.historique
                .historiser_specification_informations_acceptation_sic(&proposition),
        )
        .await;
    Ok(proposition.entity_id)
}

pub async fn approuver_admission_par_sic(
    s: Arc<ServicesDoctorat>,
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
    notifier_decision_sic(&s, &proposition, true).await;
    Ok(proposition.entity_id)
}

pub async fn approuver_inscription_par_sic(
    s: Arc<ServicesDoctorat>,
    cmd: ApprouverInscriptionParSicCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let titres = s.commun.titres_acces_de(&cmd.uuid_proposition).await?;
    let proposition = modifier(
        &s,
        cmd.uuid_proposition,
        "ApprouverInscriptionParSic",
        &cmd.auteur,
        |p| p.approuver_inscription_par_sic(&titres, &cmd.auteur),
    )
    .await?;
    notifier_decision_sic(&s, &proposition, true).await;
    Ok(proposition.entity_id)
}

async fn notifier_decision_sic(
    s: &ServicesDoctorat,
    proposition: &PropositionDoctorat,
    autorisee: bool,
) {
    let id = proposition.entity_id;
    let historisation = async {
        if autorisee {
            s.historique.historiser_acceptation_sic(proposition).await
        } else {
            s.historique.historiser_refus_sic(proposition).await
        }
    };
    s.commun.effet_secondaire(id, "historique", historisation).await;
    s.commun
        .effet_secondaire(
            id,
            "notification",
            s.notification.notifier_decision_sic(proposition, autorisee),
        )
        .await;
}
