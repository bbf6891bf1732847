// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Continuing Education Queries

use super::ServicesContinue;
use crate::application::message_bus::Command;
use crate::application::services::{charger, OngletChecklistDTO};
use crate::domain::formation_continue::checklist::{catalogue, OngletsChecklistContinue};
use crate::domain::formation_continue::proposition::PropositionContinue;
use crate::domain::formation_continue::validators::Motif;
use crate::domain::shared::exceptions::AdmissionError;
use crate::domain::shared::identite::PropositionIdentity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPropositionQuery {
    pub uuid_proposition: PropositionIdentity,
}

impl Command for GetPropositionQuery {
    type Output = PropositionContinueDTO;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropositionContinueDTO {
    pub uuid: PropositionIdentity,
    pub reference: u64,
    pub matricule_candidat: String,
    pub statut: String,
    pub sigle_formation: String,
    pub annee_formation: u32,
    /// Current configuration of the decision tab
    pub decision: Option<String>,
    pub motif_mise_en_attente: Option<Motif>,
    pub motif_refus: Option<Motif>,
    pub motif_annulation: Option<Motif>,
    pub condition_approbation_par_fac: String,
    pub soumise_le: Option<DateTime<Utc>>,
    pub checklist: Vec<OngletChecklistDTO>,
    pub version: u64,
}

impl From<&PropositionContinue> for PropositionContinueDTO {
    fn from(p: &PropositionContinue) -> Self {
        Self {
            uuid: p.entity_id,
            reference: p.reference,
            matricule_candidat: p.matricule_candidat.clone(),
            statut: p.statut.name().to_string(),
            sigle_formation: p.formation.sigle.clone(),
            annee_formation: p.formation.annee,
            decision: p.checklist_actuelle.decision_courante().map(str::to_string),
            motif_mise_en_attente: p.motif_mise_en_attente.clone(),
            motif_refus: p.motif_refus.clone(),
            motif_annulation: p.motif_annulation.clone(),
            condition_approbation_par_fac: p.condition_approbation_par_fac.clone(),
            soumise_le: p.soumise_le,
            checklist: OngletsChecklistContinue::ALL
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
    s: Arc<ServicesContinue>,
    query: GetPropositionQuery,
) -> Result<PropositionContinueDTO, AdmissionError> {
    let proposition = charger(s.propositions.as_ref(), &query.uuid_proposition).await?;
    Ok(PropositionContinueDTO::from(&proposition))
}
