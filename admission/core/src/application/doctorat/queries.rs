// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Doctorate Queries
//!
//! Read side of the doctorate context. Queries never mutate and never
//! publish; checklist labels are resolved through the catalog.

use super::ServicesDoctorat;
use crate::application::message_bus::Command;
use crate::application::services::{charger, OngletChecklistDTO};
use crate::application::titres_acces::{titres_acces_dto, TitresAccesDTO};
use crate::domain::doctorat::checklist::{
    catalogue, OngletsChecklistDoctorat, StatutsChecklistDoctorale,
};
use crate::domain::doctorat::groupe_de_supervision::{Cotutelle, Signature};
use crate::domain::doctorat::proposition::PropositionDoctorat;
use crate::domain::shared::decision::{DocumentsDemandes, InformationsAcceptation, MotifsRefus};
use crate::domain::shared::exceptions::AdmissionError;
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::repository::RepositoryError;
use crate::domain::shared::titres_acces::ConditionAcces;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Queries
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPropositionQuery {
    pub uuid_proposition: PropositionIdentity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetGroupeDeSupervisionQuery {
    pub uuid_proposition: PropositionIdentity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListerPropositionsCandidatQuery {
    pub matricule_candidat: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecupererTitresAccesQuery {
    pub uuid_proposition: PropositionIdentity,
    #[serde(default)]
    pub equivalence_diplome: Vec<String>,
}

impl Command for GetPropositionQuery {
    type Output = PropositionDoctoratDTO;
}

impl Command for GetGroupeDeSupervisionQuery {
    type Output = GroupeDeSupervisionDTO;
}

impl Command for ListerPropositionsCandidatQuery {
    type Output = Vec<PropositionDoctoratDTO>;
}

impl Command for RecupererTitresAccesQuery {
    type Output = TitresAccesDTO;
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropositionDoctoratDTO {
    pub uuid: PropositionIdentity,
    pub reference: u64,
    pub matricule_candidat: String,
    pub statut: String,
    pub sigle_formation: String,
    pub annee_formation: u32,
    pub type_admission: String,
    pub type_demande: String,
    pub condition_acces: Option<ConditionAcces>,
    pub millesime_condition_acces: Option<u32>,
    pub motifs_refus: MotifsRefus,
    pub informations_acceptation: Option<InformationsAcceptation>,
    pub documents_demandes: DocumentsDemandes,
    pub soumise_le: Option<DateTime<Utc>>,
    pub approuvee_par_cdd_le: Option<DateTime<Utc>>,
    /// Current checklist, one entry per tab in catalog order
    pub checklist: Vec<OngletChecklistDTO>,
    pub version: u64,
}

impl From<&PropositionDoctorat> for PropositionDoctoratDTO {
    fn from(p: &PropositionDoctorat) -> Self {
        Self {
            uuid: p.entity_id,
            reference: p.reference,
            matricule_candidat: p.matricule_candidat.clone(),
            statut: p.statut.name().to_string(),
            sigle_formation: p.formation.sigle.clone(),
            annee_formation: p.formation.annee,
            type_admission: p.type_admission.name().to_string(),
            type_demande: p.type_demande.name().to_string(),
            condition_acces: p.condition_acces,
            millesime_condition_acces: p.millesime_condition_acces,
            motifs_refus: p.motifs_refus.clone(),
            informations_acceptation: p.informations_acceptation.clone(),
            documents_demandes: p.documents_demandes.clone(),
            soumise_le: p.soumise_le,
            approuvee_par_cdd_le: p.approuvee_par_cdd_le,
            checklist: checklist_dto(&p.checklist_actuelle),
            version: p.version,
        }
    }
}

fn checklist_dto(checklist: &StatutsChecklistDoctorale) -> Vec<OngletChecklistDTO> {
    OngletsChecklistDoctorat::ALL
        .iter()
        .map(
            |onglet| OngletChecklistDTO::depuis(
                catalogue(),
                onglet.name(),
                checklist.onglet(*onglet),
            ),
        )
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupeDeSupervisionDTO {
    pub proposition_id: PropositionIdentity,
    pub statut_signature: String,
    pub promoteur_reference: Option<String>,
    pub signatures_promoteurs: Vec<Signature>,
    pub signatures_membres_ca: Vec<Signature>,
    pub cotutelle: Option<Cotutelle>,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn get_proposition(
    s: Arc<ServicesDoctorat>,
    query: GetPropositionQuery,
) -> Result<PropositionDoctoratDTO, AdmissionError> {
    let proposition = charger(s.propositions.as_ref(), &query.uuid_proposition).await?;
    Ok(PropositionDoctoratDTO::from(&proposition))
}

pub async fn get_groupe_de_supervision(
    s: Arc<ServicesDoctorat>,
    query: GetGroupeDeSupervisionQuery,
) -> Result<GroupeDeSupervisionDTO, AdmissionError> {
    let groupe = s
        .groupes
        .get_by_proposition_id(&query.uuid_proposition)
        .await
        .map_err(|erreur| match erreur {
            RepositoryError::NotFound(_) => {
                AdmissionError::GroupeDeSupervisionNonTrouve(query.uuid_proposition.to_string())
            }
            autre => AdmissionError::Repository(autre),
        })?;
    Ok(GroupeDeSupervisionDTO {
        proposition_id: groupe.proposition_id,
        statut_signature: groupe.statut_signature.name().to_string(),
        promoteur_reference: groupe.promoteur_reference,
        signatures_promoteurs: groupe.signatures_promoteurs,
        signatures_membres_ca: groupe.signatures_membres_ca,
        cotutelle: groupe.cotutelle,
    })
}

pub async fn lister_propositions_candidat(
    s: Arc<ServicesDoctorat>,
    query: ListerPropositionsCandidatQuery,
) -> Result<Vec<PropositionDoctoratDTO>, AdmissionError> {
    let propositions = s.propositions.search(Some(&query.matricule_candidat)).await?;
    Ok(propositions.iter().map(PropositionDoctoratDTO::from).collect())
}

pub async fn recuperer_titres_acces(
    s: Arc<ServicesDoctorat>,
    query: RecupererTitresAccesQuery,
) -> Result<TitresAccesDTO, AdmissionError> {
    let proposition = charger(s.propositions.as_ref(), &query.uuid_proposition).await?;
    titres_acces_dto(
        &s.commun,
        &proposition.entity_id,
        &proposition.matricule_candidat,
        proposition.formation.training_type,
        &query.equivalence_diplome,
    )
    .await
}
