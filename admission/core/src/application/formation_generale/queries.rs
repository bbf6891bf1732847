// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # General Education Queries

use super::ServicesGenerale;
use crate::application::message_bus::Command;
use crate::application::services::{charger, OngletChecklistDTO};
use crate::application::titres_acces::{titres_acces_dto, TitresAccesDTO};
use crate::domain::formation_generale::checklist::{catalogue, OngletsChecklistGenerale};
use crate::domain::formation_generale::proposition::PropositionGenerale;
use crate::domain::shared::decision::{DocumentsDemandes, InformationsAcceptation, MotifsRefus};
use crate::domain::shared::exceptions::AdmissionError;
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::titres_acces::ConditionAcces;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPropositionQuery {
    pub uuid_proposition: PropositionIdentity,
}

impl Command for GetPropositionQuery {
    type Output = PropositionGeneraleDTO;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListerPropositionsCandidatQuery {
    pub matricule_candidat: String,
}

impl Command for ListerPropositionsCandidatQuery {
    type Output = Vec<PropositionGeneraleDTO>;
}

/// Access titles evaluated with the diploma equivalences the candidate gave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecupererTitresAccesQuery {
    pub uuid_proposition: PropositionIdentity,
}

impl Command for RecupererTitresAccesQuery {
    type Output = TitresAccesDTO;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropositionGeneraleDTO {
    pub uuid: PropositionIdentity,
    pub reference: u64,
    pub matricule_candidat: String,
    pub statut: String,
    pub sigle_formation: String,
    pub annee_formation: u32,
    pub type_demande: String,
    pub est_reorientation_inscription_externe: Option<bool>,
    pub condition_acces: Option<ConditionAcces>,
    pub millesime_condition_acces: Option<u32>,
    pub motifs_refus: MotifsRefus,
    pub informations_acceptation: Option<InformationsAcceptation>,
    pub documents_demandes: DocumentsDemandes,
    pub soumise_le: Option<DateTime<Utc>>,
    pub checklist: Vec<OngletChecklistDTO>,
    pub version: u64,
}

impl From<&PropositionGenerale> for PropositionGeneraleDTO {
    fn from(p: &PropositionGenerale) -> Self {
        Self {
            uuid: p.entity_id,
            reference: p.reference,
            matricule_candidat: p.matricule_candidat.clone(),
            statut: p.statut.name().to_string(),
            sigle_formation: p.formation.sigle.clone(),
            annee_formation: p.formation.annee,
            type_demande: p.type_demande.name().to_string(),
            est_reorientation_inscription_externe: p.est_reorientation_inscription_externe,
            condition_acces: p.condition_acces,
            millesime_condition_acces: p.millesime_condition_acces,
            motifs_refus: p.motifs_refus.clone(),
            informations_acceptation: p.informations_acceptation.clone(),
            documents_demandes: p.documents_demandes.clone(),
            soumise_le: p.soumise_le,
            checklist: OngletsChecklistGenerale::ALL
                .iter()
                .map(|onglet| {
                    OngletChecklistDTO::depuis(
                        catalogue(),
                        onglet.name(),
                        p.checklist_actuelle.onglet(*onglet),
                    )
                })
                .collect(),
            version: p.version,
        }
    }
}

pub async fn get_proposition(
    s: Arc<ServicesGenerale>,
    query: GetPropositionQuery,
) -> Result<PropositionGeneraleDTO, AdmissionError> {
    let proposition = charger(s.propositions.as_ref(), &query.uuid_proposition).await?;
    Ok(PropositionGeneraleDTO::from(&proposition))
}

pub async fn lister_propositions_candidat(
    s: Arc<ServicesGenerale>,
    query: ListerPropositionsCandidatQuery,
) -> Result<Vec<PropositionGeneraleDTO>, AdmissionError> {
    let propositions = s.propositions.search(Some(&query.matricule_candidat)).await?;
    Ok(propositions.iter().map(PropositionGeneraleDTO::from).collect())
}

pub async fn recuperer_titres_acces(
    s: Arc<ServicesGenerale>,
    query: RecupererTitresAccesQuery,
) -> Result<TitresAccesDTO, AdmissionError> {
    let proposition = charger(s.propositions.as_ref(), &query.uuid_proposition).await?;
    titres_acces_dto(
        &s.commun,
        &proposition.entity_id,
        &proposition.matricule_candidat,
        proposition.formation.training_type,
        &proposition.equivalence_diplome,
    )
    .await
}
