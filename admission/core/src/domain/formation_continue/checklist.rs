// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Continuing Education Checklist
//!
//! Two tabs only: the student record and the decision. The decision tab
//! drives the whole workflow; every staff action is a move between two of its
//! configurations.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Catalog:** built once by [`CatalogueContinue::init`]

use crate::domain::shared::checklist::{
    extra, CatalogueChecklist, ChoixStatutChecklist::*, ConfigurationOngletChecklist,
    ConfigurationStatutChecklist as Config, StatutChecklist,
};
use crate::domain::shared::exceptions::BusinessException;
use crate::vocabulaire;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

vocabulaire! {
    pub enum OngletsChecklistContinue {
        FicheEtudiant => "fiche_etudiant",
        Decision => "decision",
    }
}

pub const FICHE_ETUDIANT: &str = "fiche_etudiant";
pub const DECISION: &str = "decision";

static CATALOGUE: OnceLock<CatalogueChecklist> = OnceLock::new();

pub fn catalogue() -> &'static CatalogueChecklist {
    CATALOGUE.get_or_init(CatalogueContinue::init)
}

pub struct CatalogueContinue;

impl CatalogueContinue {
    pub fn init() -> CatalogueChecklist {
        CatalogueChecklist {
            contexte: "formation_continue".to_string(),
            onglets: vec![
                ConfigurationOngletChecklist::new(
                    FICHE_ETUDIANT,
                    vec![
                        Config::new("A_TRAITER", "To be processed", InitialCandidat),
                        Config::new("VALIDE", "Validated", GestReussite),
                    ],
                ),
                ConfigurationOngletChecklist::new(
                    DECISION,
                    vec![
                        Config::new("A_TRAITER", "To be processed", InitialCandidat),
                        Config::new("PRISE_EN_CHARGE", "Taken in charge", GestEnCours)
                            .avec_extra(extra([("en_cours", "taken_in_charge")])),
                        Config::new("A_VALIDER", "To validate IUFC", GestEnCours)
                            .avec_extra(extra([("en_cours", "to_validate")])),
                        Config::new("EN_ATTENTE", "On hold", GestEnCours)
                            .avec_extra(extra([("en_cours", "on_hold")])),
                        Config::new("FAC_VALIDE", "Validated by Fac", GestEnCours)
                            .avec_extra(extra([("en_cours", "fac_approval")])),
                        Config::new(
                            "REFUSE",
                            "Denied",
                            GestBlocage,
                        )
                        .avec_extra(extra([("blocage", "denied")])),
                        Config::new("ANNULEE", "Canceled", GestBlocage)
                            .avec_extra(extra([("blocage", "canceled")])),
                        Config::new(
                            "CLOTURE",
                            "Closed",
                            GestBlocage,
                        )
                        .avec_extra(extra([("blocage", "closed")])),
                        Config::new("VALIDE", "Validated", GestReussite),
                    ],
                ),
            ],
        }
    }
}

pub fn configuration(
    onglet: OngletsChecklistContinue,
    identifiant: &str,
) -> Result<&'static Config, BusinessException> {
    catalogue().exiger(onglet.name(), identifiant)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutsChecklistContinue {
    pub fiche_etudiant: StatutChecklist,
    pub decision: StatutChecklist,
}

impl StatutsChecklistContinue {
    pub fn onglet(&self, onglet: OngletsChecklistContinue) -> &StatutChecklist {
        match onglet {
            OngletsChecklistContinue::FicheEtudiant => &self.fiche_etudiant,
            OngletsChecklistContinue::Decision => &self.decision,
        }
    }

    pub fn onglet_mut(&mut self, onglet: OngletsChecklistContinue) -> &mut StatutChecklist {
        match onglet {
            OngletsChecklistContinue::FicheEtudiant => &mut self.fiche_etudiant,
            OngletsChecklistContinue::Decision => &mut self.decision,
        }
    }

    pub fn est_dans(&self, onglet: OngletsChecklistContinue, identifiant: &str) -> bool {
        catalogue()
            .configuration(onglet.name(), identifiant)
            .map(|config| self.onglet(onglet).correspond_a(config))
            .unwrap_or(false)
    }

    /// Identifier of the first configuration the decision tab matches.
    pub fn decision_courante(&self) -> Option<&'static str> {
        catalogue()
            .onglet(DECISION)
            .and_then(|o| o.get_status_of(&self.decision))
            .map(|config| config.identifiant.as_str())
    }

    /// Both tabs in their `A_TRAITER` configuration.
    pub fn initialiser() -> Result<Self, BusinessException> {
        Ok(Self {
            fiche_etudiant: StatutChecklist::depuis_configuration(configuration(
                OngletsChecklistContinue::FicheEtudiant,
                "A_TRAITER",
            )?),
            decision: StatutChecklist::depuis_configuration(configuration(
                OngletsChecklistContinue::Decision,
                "A_TRAITER",
            )?),
        })
    }
}

impl Default for StatutsChecklistContinue {
    fn default() -> Self {
        Self {
            fiche_etudiant: StatutChecklist::new("To be processed", InitialCandidat),
            decision: StatutChecklist::new("To be processed", InitialCandidat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_configurations_are_distinct() {
        let mut checklist = StatutsChecklistContinue::initialiser().unwrap();
        assert_eq!(checklist.decision_courante(), Some("A_TRAITER"));

        checklist
            .decision
            .appliquer(configuration(OngletsChecklistContinue::Decision, "EN_ATTENTE").unwrap());
        assert_eq!(checklist.decision_courante(), Some("EN_ATTENTE"));
        assert!(!checklist.est_dans(OngletsChecklistContinue::Decision, "PRISE_EN_CHARGE"));
    }

    #[test]
    fn test_default_matches_initialisation() {
        assert_eq!(
            StatutsChecklistContinue::default(),
            StatutsChecklistContinue::initialiser().unwrap()
        );
    }
}
