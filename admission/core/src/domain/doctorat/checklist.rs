// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Doctorate Checklist
//!
//! Tabs reviewed by the doctoral committee (CDD) and the central enrolment
//! office (SIC) on a doctorate proposition, the configuration catalog of each
//! tab, and the initialiser producing the checklist of a freshly submitted
//! proposition.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Catalog:** built once by [`CatalogueDoctorat::init`], held in a `OnceLock`

use crate::domain::doctorat::statuts::ChoixTypeAdmission;
use crate::domain::shared::checklist::{
    extra, CatalogueChecklist, ChoixStatutChecklist::*, ConfigurationOngletChecklist,
    ConfigurationStatutChecklist as Config, StatutChecklist,
};
use crate::domain::shared::exceptions::BusinessException;
use crate::domain::shared::onglets_communs::{self, enfants_experiences};
use crate::domain::shared::profil::{ExperienceParcours, ProfilCandidat, ANNEES_PARCOURS_ANTERIEUR};
use crate::vocabulaire;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

vocabulaire! {
    /// Top-level tabs of a doctorate checklist.
    pub enum OngletsChecklistDoctorat {
        DonneesPersonnelles => "donnees_personnelles",
        Assimilation => "assimilation",
        ParcoursAnterieur => "parcours_anterieur",
        Financabilite => "financabilite",
        ChoixFormation => "choix_formation",
        ProjetRecherche => "projet_recherche",
        DecisionCdd => "decision_cdd",
        DecisionSic => "decision_sic",
    }
}

impl OngletsChecklistDoctorat {
    /// Tabs written only by their dedicated commands.
    pub fn a_commande_dediee(self) -> bool {
        matches!(
            self,
            Self::ParcoursAnterieur | Self::Financabilite | Self::DecisionCdd | Self::DecisionSic
        )
    }
}

pub const PROJET_RECHERCHE: &str = "projet_recherche";
pub const DECISION_CDD: &str = "decision_cdd";

// ============================================================================
// Catalog
// ============================================================================

pub struct CatalogueDoctorat;

static CATALOGUE: OnceLock<CatalogueChecklist> = OnceLock::new();

/// Doctorate catalog, built on first access.
pub fn catalogue() -> &'static CatalogueChecklist {
    CATALOGUE.get_or_init(CatalogueDoctorat::init)
}

impl CatalogueDoctorat {
    pub fn init() -> CatalogueChecklist {
        CatalogueChecklist {
            contexte: "doctorat".to_string(),
            onglets: vec![
                onglets_communs::donnees_personnelles(),
                onglets_communs::assimilation(),
                onglets_communs::parcours_anterieur(),
                onglets_communs::experiences_parcours_anterieur(),
                onglets_communs::financabilite(),
                onglets_communs::choix_formation(),
                projet_recherche(),
                decision_cdd(),
                onglets_communs::decision_sic(),
            ],
        }
    }
}

fn projet_recherche() -> ConfigurationOngletChecklist {
    ConfigurationOngletChecklist::new(
        PROJET_RECHERCHE,
        vec![
            Config::new("A_TRAITER", "To be processed", InitialCandidat),
            Config::new("A_COMPLETER", "To be completed", GestBlocage),
            Config::new("VALIDE", "Validated", GestReussite),
        ],
    )
}

fn decision_cdd() -> ConfigurationOngletChecklist {
    ConfigurationOngletChecklist::new(
        DECISION_CDD,
        vec![
            Config::new("A_TRAITER", "To be processed", InitialCandidat),
            Config::new("PRIS_EN_CHARGE", "Taken in charge", GestEnCours),
            Config::new("A_COMPLETER_PAR_SIC", "To be completed by SIC", GestBlocage)
                .avec_extra(extra([("decision", "HORS_DECISION")])),
            Config::new(
                "CLOTURE",
                "Closed",
                GestBlocage,
            )
            .avec_extra(extra([("decision", "CLOTURE")])),
            Config::new("REFUS", "Refusal", GestBlocage).avec_extra(
                extra([("decision", "EN_DECISION")]),
            ),
            Config::new("ACCORD", "Approval", GestReussite),
        ],
    )
}

/// Configuration of a doctorate tab, failing with a business exception.
pub fn configuration(
    onglet: OngletsChecklistDoctorat,
    identifiant: &str,
) -> Result<&'static Config, BusinessException> {
    catalogue().exiger(onglet.name(), identifiant)
}

/// Configuration of an experience child.
pub fn configuration_experience(identifiant: &str) -> Result<&'static Config, BusinessException> {
    catalogue().exiger(onglets_communs::EXPERIENCES_PARCOURS_ANTERIEUR, identifiant)
}

// ============================================================================
// Checklist tree
// ============================================================================

/// Full checklist of a doctorate proposition, one node per tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutsChecklistDoctorale {
    pub donnees_personnelles: StatutChecklist,
    pub assimilation: StatutChecklist,
    /// Children track each experience of the curriculum
    pub parcours_anterieur: StatutChecklist,
    pub financabilite: StatutChecklist,
    pub choix_formation: StatutChecklist,
    pub projet_recherche: StatutChecklist,
    pub decision_cdd: StatutChecklist,
    pub decision_sic: StatutChecklist,
}

impl StatutsChecklistDoctorale {
    pub fn onglet(&self, onglet: OngletsChecklistDoctorat) -> &StatutChecklist {
        use OngletsChecklistDoctorat::*;
        match onglet {
            DonneesPersonnelles => &self.donnees_personnelles,
            Assimilation => &self.assimilation,
            ParcoursAnterieur => &self.parcours_anterieur,
            Financabilite => &self.financabilite,
            ChoixFormation => &self.choix_formation,
            ProjetRecherche => &self.projet_recherche,
            DecisionCdd => &self.decision_cdd,
            DecisionSic => &self.decision_sic,
        }
    }

    pub fn onglet_mut(&mut self, onglet: OngletsChecklistDoctorat) -> &mut StatutChecklist {
        use OngletsChecklistDoctorat::*;
        match onglet {
            DonneesPersonnelles => &mut self.donnees_personnelles,
            Assimilation => &mut self.assimilation,
            ParcoursAnterieur => &mut self.parcours_anterieur,
            Financabilite => &mut self.financabilite,
            ChoixFormation => &mut self.choix_formation,
            ProjetRecherche => &mut self.projet_recherche,
            DecisionCdd => &mut self.decision_cdd,
            DecisionSic => &mut self.decision_sic,
        }
    }

    /// True when tab `onglet` is in configuration `identifiant`.
    pub fn est_dans(&self, onglet: OngletsChecklistDoctorat, identifiant: &str) -> bool {
        catalogue()
            .configuration(onglet.name(), identifiant)
            .map(|config| self.onglet(onglet).correspond_a(config))
            .unwrap_or(false)
    }

    /// Identifier of the configuration tab `onglet` currently matches.
    pub fn configuration_de(&self, onglet: OngletsChecklistDoctorat) -> Option<&'static str> {
        catalogue()
            .onglet(onglet.name())
            .and_then(|o| o.get_status_of(self.onglet(onglet)))
            .map(|config| config.identifiant.as_str())
    }
}

impl Default for StatutsChecklistDoctorale {
    /// Every tab in its first configuration, with no experience children.
    fn default() -> Self {
        let premier = |onglet: OngletsChecklistDoctorat| {
            catalogue()
                .onglet(onglet.name())
                .and_then(|o| o.statuts.first())
                .map(StatutChecklist::depuis_configuration)
                .unwrap_or_else(|| StatutChecklist::new("", InitialCandidat))
        };
        use OngletsChecklistDoctorat::*;
        Self {
            donnees_personnelles: premier(DonneesPersonnelles),
            assimilation: premier(Assimilation),
            parcours_anterieur: premier(ParcoursAnterieur),
            financabilite: premier(Financabilite),
            choix_formation: premier(ChoixFormation),
            projet_recherche: premier(ProjetRecherche),
            decision_cdd: premier(DecisionCdd),
            decision_sic: premier(DecisionSic),
        }
    }
}

/// Builds the initial checklist of a submitted doctorate proposition.
pub struct InitialiserChecklist;

impl InitialiserChecklist {
    pub fn initialiser(
        type_admission: ChoixTypeAdmission,
        profil: &ProfilCandidat,
        experiences: &[ExperienceParcours],
        annee_courante: u32,
    ) -> Result<StatutsChecklistDoctorale, BusinessException> {
        use OngletsChecklistDoctorat::*;
        let noeud = |onglet: OngletsChecklistDoctorat, identifiant: &str| {
            configuration(onglet, identifiant).map(StatutChecklist::depuis_configuration)
        };

        let assimilation = if profil.est_concerne_par_assimilation() {
            noeud(Assimilation, "DECLARE_ASSIMILE_OU_PAS")?
        } else {
            noeud(Assimilation, "NON_CONCERNE")?
        };
        let financabilite = match type_admission {
            ChoixTypeAdmission::PreAdmission => noeud(Financabilite, "NON_CONCERNE")?,
            ChoixTypeAdmission::Admission => noeud(Financabilite, "A_TRAITER")?,
        };

        let onglet_experiences = catalogue()
            .onglet(onglets_communs::EXPERIENCES_PARCOURS_ANTERIEUR)
            .ok_or_else(|| BusinessException::OngletChecklistInconnu {
                onglet: onglets_communs::EXPERIENCES_PARCOURS_ANTERIEUR.to_string(),
            })?;
        let mut parcours_anterieur = noeud(ParcoursAnterieur, "A_TRAITER")?;
        parcours_anterieur.enfants = enfants_experiences(
            onglet_experiences,
            experiences,
            annee_courante.saturating_sub(ANNEES_PARCOURS_ANTERIEUR),
        );

        Ok(StatutsChecklistDoctorale {
            donnees_personnelles: noeud(DonneesPersonnelles, "A_TRAITER")?,
            assimilation,
            parcours_anterieur,
            financabilite,
            choix_formation: noeud(ChoixFormation, "A_TRAITER")?,
            projet_recherche: noeud(ProjetRecherche, "A_TRAITER")?,
            decision_cdd: noeud(DecisionCdd, "A_TRAITER")?,
            decision_sic: noeud(DecisionSic, "A_TRAITER")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::profil::TypeExperience;

    fn profil() -> ProfilCandidat {
        ProfilCandidat {
            matricule: "0123".into(),
            prenom: "Ada".into(),
            nom: "Lovelace".into(),
            pays_nationalite: "CA".into(),
            pays_nationalite_europeen: false,
            langue_contact: "en".into(),
            doit_payer_frais_dossier: false,
        }
    }

    fn experiences() -> Vec<ExperienceParcours> {
        vec![
            ExperienceParcours {
                uuid: "e1".into(),
                type_experience: TypeExperience::Academique,
                libelle: "Master".into(),
                annee: 2022,
            },
            ExperienceParcours {
                uuid: "e2".into(),
                type_experience: TypeExperience::Academique,
                libelle: "Old bachelor".into(),
                annee: 2010,
            },
        ]
    }

    #[test]
    fn test_initialisation_is_idempotent() {
        let a = InitialiserChecklist::initialiser(
            ChoixTypeAdmission::Admission,
            &profil(),
            &experiences(),
            2024,
        )
        .unwrap();
        let b = InitialiserChecklist::initialiser(
            ChoixTypeAdmission::Admission,
            &profil(),
            &experiences(),
            2024,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_initialisation_depends_on_data() {
        let checklist =
            InitialiserChecklist::initialiser(
                ChoixTypeAdmission::PreAdmission,
                &profil(),
                &experiences(),
                2024,
            )
            .unwrap();

        assert!(
            checklist.est_dans(OngletsChecklistDoctorat::Assimilation, "DECLARE_ASSIMILE_OU_PAS")
        );
        assert!(checklist.est_dans(OngletsChecklistDoctorat::Financabilite, "NON_CONCERNE"));
        assert_eq!(checklist.parcours_anterieur.enfants.len(), 1);
        assert!(checklist.parcours_anterieur.recuperer_enfant("e1").is_some());
        assert_eq!(
            checklist.configuration_de(OngletsChecklistDoctorat::DecisionCdd),
            Some("A_TRAITER")
        );
    }

    #[test]
    fn test_cdd_closed_and_refused_are_distinct() {
        let mut checklist = StatutsChecklistDoctorale::default();
        checklist
            .decision_cdd
            .appliquer(configuration(OngletsChecklistDoctorat::DecisionCdd, "CLOTURE").unwrap());

        assert!(checklist.est_dans(OngletsChecklistDoctorat::DecisionCdd, "CLOTURE"));
        assert!(!checklist.est_dans(OngletsChecklistDoctorat::DecisionCdd, "REFUS"));
    }

    #[test]
    fn test_unknown_configuration_is_business_error() {
        assert_eq!(
            configuration(OngletsChecklistDoctorat::DecisionCdd, "NOPE").unwrap_err().status_code(),
            "ADMISSION-41"
        );
    }
}
