// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Access Titles
//!
//! Selection of the prior experiences retained as access titles on a doctorate
//! or general education proposition, and the evaluated title view returned to
//! the staff.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Storage:** [`TitreAccesSelectionnableRepository`](crate::domain::shared::repository::TitreAccesSelectionnableRepository),
//!   upsert on `(proposition, experience, type)`

use crate::application::message_bus::Command;
use crate::application::services::{charger, ServicesCommuns};
use crate::domain::doctorat::proposition::PropositionDoctorat;
use crate::domain::formation_generale::proposition::PropositionGenerale;
use crate::domain::shared::exceptions::AdmissionError;
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::repository::PropositionRepository;
use crate::domain::shared::titres_acces::{
    ConditionAcces, TitreAccesSelectionnable, Titres, TrainingType, TypeTitreAccesSelectionnable,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Marks one prior experience as selected, or not, for a proposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecifierTitreAccesSelectionneCommand {
    pub uuid_proposition: PropositionIdentity,
    pub uuid_experience: String,
    pub type_titre: TypeTitreAccesSelectionnable,
    pub annee: Option<u32>,
    pub selectionne: bool,
}

impl Command for SpecifierTitreAccesSelectionneCommand {
    type Output = PropositionIdentity;
}

/// Shared services and the repositories of the contexts that review prior
/// experience.
pub struct ServicesTitresAcces {
    pub commun: ServicesCommuns,
    pub doctorat: Arc<dyn PropositionRepository<PropositionDoctorat>>,
    pub generale: Arc<dyn PropositionRepository<PropositionGenerale>>,
}

impl ServicesTitresAcces {
    async fn verifier_proposition(
        &self,
        proposition_id: &PropositionIdentity,
    ) -> Result<(), AdmissionError> {
        match charger(self.doctorat.as_ref(), proposition_id).await {
            Err(AdmissionError::PropositionNonTrouvee(_)) => {
                charger(self.generale.as_ref(), proposition_id).await.map(|_| ())
            }
            autre => autre.map(|_| ()),
        }
    }
}

pub async fn specifier_titre_acces_selectionne(
    s: Arc<ServicesTitresAcces>,
    cmd: SpecifierTitreAccesSelectionneCommand,
) -> Result<PropositionIdentity, AdmissionError> {
    s.verifier_proposition(&cmd.uuid_proposition).await?;

    let titre = TitreAccesSelectionnable {
        proposition_id: cmd.uuid_proposition,
        uuid_experience: cmd.uuid_experience,
        type_titre: cmd.type_titre,
        annee: cmd.annee,
        selectionne: cmd.selectionne,
    };
    s.commun.titres_selectionnables.save(&titre).await?;
    info!(
        proposition_id = %titre.proposition_id,
        uuid_experience = %titre.uuid_experience,
        selectionne = titre.selectionne,
        "Access title selection updated"
    );
    Ok(titre.proposition_id)
}

/// Access titles of a candidate for the training of one proposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitresAccesDTO {
    pub training_type: TrainingType,
    pub valide: bool,
    pub sans_condition: bool,
    /// Admissible conditions of the training, in matrix order.
    pub admissibles: Vec<ConditionAcces>,
    /// Admissible conditions the candidate fulfils.
    pub remplies: Vec<ConditionAcces>,
    pub selectionnables: Vec<TitreAccesSelectionnable>,
}

impl TitresAccesDTO {
    pub fn new(
        training_type: TrainingType,
        titres: &Titres,
        selectionnables: Vec<TitreAccesSelectionnable>,
    ) -> Self {
        Self {
            training_type,
            valide: titres.est_valide(),
            sans_condition: titres.sans_condition,
            admissibles: titres.types.clone(),
            remplies: titres.remplies(),
            selectionnables,
        }
    }
}

/// Evaluates the access titles of `matricule` for `training_type` and joins
/// the experiences selectable on the proposition.
pub async fn titres_acces_dto(
    s: &ServicesCommuns,
    proposition_id: &PropositionIdentity,
    matricule: &str,
    training_type: TrainingType,
    equivalence_diplome: &[String],
) -> Result<TitresAccesDTO, AdmissionError> {
    let titres = s
        .titres_acces
        .recuperer_titres_access(matricule, training_type, equivalence_diplome)
        .await?;
    let selectionnables = s.titres_acces_de(proposition_id).await?;
    Ok(TitresAccesDTO::new(training_type, &titres, selectionnables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::titres_acces::{matrix, AdmissionConditionsDTO};

    #[test]
    fn test_dto_lists_fulfilled_conditions() {
        let conditions = AdmissionConditionsDTO::avec(
            &[ConditionAcces::DiplomationSecondaireBelge],
        );
        let titres = matrix().titres(TrainingType::Bachelor, conditions);

        let dto = TitresAccesDTO::new(TrainingType::Bachelor, &titres, Vec::new());

        assert!(dto.valide);
        assert!(!dto.sans_condition);
        assert_eq!(dto.remplies, vec![ConditionAcces::DiplomationSecondaireBelge]);
        assert!(dto.admissibles.contains(&ConditionAcces::PotentielAccesVae));
    }
}
