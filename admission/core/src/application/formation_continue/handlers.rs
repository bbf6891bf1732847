// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Continuing Education Command Handlers
//!
//! Every manager decision goes through [`decider`]: load, apply the decision,
//! save, historise with the message, send the message when there is one.

use super::commands::*;
use super::ServicesContinue;
use crate::application::services::{charger, enregistrer, nombre_propositions_en_cours};
use crate::domain::events::Contexte;
use crate::domain::formation_continue::checklist::DECISION;
use crate::domain::formation_continue::ports::MessageDecision;
use crate::domain::formation_continue::proposition::{
    NouvellePropositionContinue, PropositionContinue,
};
use crate::domain::formation_continue::statuts::ChoixStatutPropositionContinue;
use crate::domain::formation_continue::validators::ActionDecision;
use crate::domain::shared::exceptions::{AdmissionError, MultipleBusinessExceptions};
use crate::domain::shared::identite::PropositionIdentity;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

const CONTEXTE: Contexte = Contexte::FormationContinue;

fn publier(
    s: &ServicesContinue,
    proposition: &PropositionContinue,
    ancien_statut: ChoixStatutPropositionContinue,
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

pub async fn initier_proposition(
    s: Arc<ServicesContinue>,
    cmd: InitierPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let en_cours = nombre_propositions_en_cours(
        s.propositions.as_ref(),
        &cmd.matricule_candidat,
    )
    .await?;
    let reference = s.propositions.get_next_reference().await?;
    let mut proposition = PropositionContinue::initier(
        NouvellePropositionContinue {
            matricule_candidat: cmd.matricule_candidat,
            formation: cmd.formation,
            motivations: cmd.motivations,
            moyens_decouverte_formation: cmd.moyens_decouverte_formation,
            marque_d_interet: cmd.marque_d_interet,
        },
        reference,
        en_cours,
        s.commun.maximum_propositions,
    )?;
    enregistrer(s.propositions.as_ref(), &mut proposition).await?;
    s.commun
        .publier_initiation(CONTEXTE, proposition.entity_id, &proposition.matricule_candidat);
    Ok(proposition.entity_id)
}

pub async fn soumettre_proposition(
    s: Arc<ServicesContinue>,
    cmd: SoumettrePropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let mut proposition = charger(s.propositions.as_ref(), &cmd.uuid_proposition).await?;
    let ancien_statut = proposition.statut;
    proposition.soumettre(Utc::now(), &cmd.matricule_auteur)?;
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
    s: Arc<ServicesContinue>,
    cmd: SupprimerPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    let mut proposition = charger(s.propositions.as_ref(), &cmd.uuid_proposition).await?;
    let ancien_statut = proposition.statut;
    proposition.supprimer(&cmd.matricule_auteur)?;
    enregistrer(s.propositions.as_ref(), &mut proposition).await?;
    publier(&s, &proposition, ancien_statut, "SupprimerProposition", &cmd.matricule_auteur);
    Ok(proposition.entity_id)
}

// ============================================================================
// Manager decisions
// ============================================================================

async fn decider<F>(
    s: &ServicesContinue,
    proposition_id: PropositionIdentity,
    action: ActionDecision,
    gestionnaire: &str,
    message: MessageDecision,
    appliquer: F,
) -> Result<PropositionIdentity, AdmissionError>
where
    F: FnOnce(&mut PropositionContinue) -> Result<(), MultipleBusinessExceptions> + Send,
{
    let mut proposition = charger(s.propositions.as_ref(), &proposition_id).await?;
    let ancien_statut = proposition.statut;
    debug!(%proposition_id, ?action, "Validating manager decision");
    appliquer(&mut proposition)?;
    enregistrer(s.propositions.as_ref(), &mut proposition).await?;

    let commande = format!("{:?}", action);
    publier(s, &proposition, ancien_statut, &commande, gestionnaire);
    s.commun.publier_checklist(
        CONTEXTE,
        proposition_id,
        DECISION,
        action.cible(),
        gestionnaire,
    );

    s.commun
        .effet_secondaire(
            proposition_id,
            "historique",
            s.historique.historiser_decision(&proposition, action, gestionnaire, &message),
        )
        .await;
    if !message.est_vide() {
        s.commun
            .effet_secondaire(
                proposition_id,
                "notification",
                s.notification.notifier_decision(&proposition, &message),
            )
            .await;
    }
    Ok(proposition_id)
}

pub async fn prendre_en_charge(
    s: Arc<ServicesContinue>,
    cmd: PrendreEnChargeCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    decider(
        &s,
        cmd.uuid_proposition,
        ActionDecision::PrendreEnCharge,
        &cmd.gestionnaire,
        MessageDecision::default(),
        |p| p.prendre_en_charge(&cmd.gestionnaire),
    )
    .await
}

pub async fn mettre_en_attente(
    s: Arc<ServicesContinue>,
    cmd: MettreEnAttenteCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    decider(
        &s,
        cmd.uuid_proposition,
        ActionDecision::MettreEnAttente,
        &cmd.gestionnaire,
        cmd.message,
        |p| p.mettre_en_attente(cmd.motif, &cmd.gestionnaire),
    )
    .await
}

pub async fn approuver_par_fac(
    s: Arc<ServicesContinue>,
    cmd: ApprouverParFacCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    decider(
        &s,
        cmd.uuid_proposition,
        ActionDecision::ApprouverParFac,
        &cmd.gestionnaire,
        cmd.message,
        |p| p.approuver_par_fac(cmd.condition, &cmd.gestionnaire),
    )
    .await
}

pub async fn mettre_a_valider(
    s: Arc<ServicesContinue>,
    cmd: MettreAValiderCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    decider(
        &s,
        cmd.uuid_proposition,
        ActionDecision::MettreAValider,
        &cmd.gestionnaire,
        MessageDecision::default(),
        |p| p.mettre_a_valider(&cmd.gestionnaire),
    )
    .await
}

pub async fn refuser_proposition(
    s: Arc<ServicesContinue>,
    cmd: RefuserPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    decider(
        &s,
        cmd.uuid_proposition,
        ActionDecision::Refuser,
        &cmd.gestionnaire,
        cmd.message,
        |p| p.refuser(cmd.motif, &cmd.gestionnaire),
    )
    .await
}

pub async fn annuler_proposition(
    s: Arc<ServicesContinue>,
    cmd: AnnulerPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    decider(
        &s,
        cmd.uuid_proposition,
        ActionDecision::Annuler,
        &cmd.gestionnaire,
        cmd.message,
        |p| p.annuler(cmd.motif, &cmd.gestionnaire),
    )
    .await
}

pub async fn valider_proposition(
    s: Arc<ServicesContinue>,
    cmd: ValiderPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    decider(
        &s,
        cmd.uuid_proposition,
        ActionDecision::Valider,
        &cmd.gestionnaire,
        cmd.message,
        |p| p.valider(&cmd.gestionnaire),
    )
    .await
}

pub async fn cloturer_proposition(
    s: Arc<ServicesContinue>,
    cmd: CloturerPropositionCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    decider(
        &s,
        cmd.uuid_proposition,
        ActionDecision::Cloturer,
        &cmd.gestionnaire,
        MessageDecision::default(),
        |p| p.cloturer(&cmd.gestionnaire),
    )
    .await
}
