// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # General Education Checklist
//!
//! Tabs reviewed by the faculty (FAC) and the central enrolment office (SIC) on
//! a bachelor or master proposition. Shares most tabs with the doctorate; adds
//! the application fees, the training specificities and the faculty decision.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Catalog:** built once by [`CatalogueGenerale::init`]

use crate::domain::shared::checklist::{
    extra, CatalogueChecklist, ChoixStatutChecklist::*, ConfigurationOngletChecklist,
    ConfigurationStatutChecklist as Config, StatutChecklist,
};
use crate::domain::shared::exceptions::BusinessException;
use crate::domain::shared::onglets_communs::{self, enfants_experiences};
use crate::domain::shared::profil::{ExperienceParcours, ProfilCandidat, ANNEES_PARCOURS_ANTERIEUR};
use crate::domain::shared::titres_acces::TrainingType;
use crate::vocabulaire;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

vocabulaire! {
    pub enum OngletsChecklistGenerale {
        DonneesPersonnelles => "donnees_personnelles",
        FraisDossier => "frais_dossier",
        Assimilation => "assimilation",
        ChoixFormation => "choix_formation",
        ParcoursAnterieur => "parcours_anterieur",
        Financabilite => "financabilite",
        SpecificitesFormation => "specificites_formation",
        DecisionFacultaire => "decision_facultaire",
        DecisionSic => "decision_sic",
    }
}

impl OngletsChecklistGenerale {
    /// Tabs written only by their dedicated commands.
    pub fn a_commande_dediee(self) -> bool {
        matches!(
            self,
            Self::FraisDossier
                | Self::ParcoursAnterieur
                | Self::Financabilite
                | Self::DecisionFacultaire
                | Self::DecisionSic
        )
    }
}

pub const FRAIS_DOSSIER: &str = "frais_dossier";
pub const SPECIFICITES_FORMATION: &str = "specificites_formation";
pub const DECISION_FACULTAIRE: &str = "decision_facultaire";

static CATALOGUE: OnceLock<CatalogueChecklist> = OnceLock::new();

pub fn catalogue() -> &'static CatalogueChecklist {
    CATALOGUE.get_or_init(CatalogueGenerale::init)
}

pub struct CatalogueGenerale;

impl CatalogueGenerale {
    pub fn init() -> CatalogueChecklist {
        CatalogueChecklist {
            contexte: "formation_generale".to_string(),
            onglets: vec![
                onglets_communs::donnees_personnelles(),
                frais_dossier(),
                onglets_communs::assimilation(),
                onglets_communs::choix_formation(),
                onglets_communs::parcours_anterieur(),
                onglets_communs::experiences_parcours_anterieur(),
                onglets_communs::financabilite(),
                specificites_formation(),
                decision_facultaire(),
                onglets_communs::decision_sic(),
            ],
        }
    }
}

fn frais_dossier() -> ConfigurationOngletChecklist {
    ConfigurationOngletChecklist::new(
        FRAIS_DOSSIER,
        vec![
            Config::new("NON_CONCERNE", "Not concerned", InitialNonConcerne),
            Config::new("A_PAYER", "Must pay", GestBlocage),
            Config::new("PAYE", "Paid", SystReussite),
            Config::new("DISPENSE", "Dispensed", GestReussite),
        ],
    )
}

fn specificites_formation() -> ConfigurationOngletChecklist {
    ConfigurationOngletChecklist::new(
        SPECIFICITES_FORMATION,
        vec![
            Config::new("NON_CONCERNE", "Not concerned", InitialNonConcerne),
            Config::new("A_TRAITER", "To be processed", InitialCandidat),
            Config::new("A_COMPLETER", "To be completed", GestBlocage),
            Config::new("VALIDE", "Validated", GestReussite),
        ],
    )
}

/// Faculty decision; unlike the doctoral committee, a faculty cannot close a file.
fn decision_facultaire() -> ConfigurationOngletChecklist {
    ConfigurationOngletChecklist::new(
        DECISION_FACULTAIRE,
        vec![
            Config::new("A_TRAITER", "To be processed", InitialCandidat),
            Config::new("PRIS_EN_CHARGE", "Taken in charge", GestEnCours),
            Config::new("A_COMPLETER_PAR_SIC", "To be completed by SIC", GestBlocage)
                .avec_extra(extra([("decision", "HORS_DECISION")])),
            Config::new("REFUS", "Refusal", GestBlocage).avec_extra(
                extra([("decision", "EN_DECISION")]),
            ),
            Config::new("ACCORD", "Approval", GestReussite),
        ],
    )
}

pub fn configuration(
    onglet: OngletsChecklistGenerale,
    identifiant: &str,
) -> Result<&'static Config, BusinessException> {
    catalogue().exiger(onglet.name(), identifiant)
}

pub fn configuration_experience(identifiant: &str) -> Result<&'static Config, BusinessException> {
    catalogue().exiger(onglets_communs::EXPERIENCES_PARCOURS_ANTERIEUR, identifiant)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutsChecklistGenerale {
    pub donnees_personnelles: StatutChecklist,
    pub frais_dossier: StatutChecklist,
    pub assimilation: StatutChecklist,
    pub choix_formation: StatutChecklist,
    pub parcours_anterieur: StatutChecklist,
    pub financabilite: StatutChecklist,
    pub specificites_formation: StatutChecklist,
    pub decision_facultaire: StatutChecklist,
    pub decision_sic: StatutChecklist,
}

impl StatutsChecklistGenerale {
    pub fn onglet(&self, onglet: OngletsChecklistGenerale) -> &StatutChecklist {
        use OngletsChecklistGenerale::*;
        match onglet {
            DonneesPersonnelles => &self.donnees_personnelles,
            FraisDossier => &self.frais_dossier,
            Assimilation => &self.assimilation,
            ChoixFormation => &self.choix_formation,
            ParcoursAnterieur => &self.parcours_anterieur,
            Financabilite => &self.financabilite,
            SpecificitesFormation => &self.specificites_formation,
            DecisionFacultaire => &self.decision_facultaire,
            DecisionSic => &self.decision_sic,
        }
    }

    pub fn onglet_mut(&mut self, onglet: OngletsChecklistGenerale) -> &mut StatutChecklist {
        use OngletsChecklistGenerale::*;
        match onglet {
            DonneesPersonnelles => &mut self.donnees_personnelles,
            FraisDossier => &mut self.frais_dossier,
            Assimilation => &mut self.assimilation,
            ChoixFormation => &mut self.choix_formation,
            ParcoursAnterieur => &mut self.parcours_anterieur,
            Financabilite => &mut self.financabilite,
            SpecificitesFormation => &mut self.specificites_formation,
            DecisionFacultaire => &mut self.decision_facultaire,
            DecisionSic => &mut self.decision_sic,
        }
    }

    pub fn est_dans(&self, onglet: OngletsChecklistGenerale, identifiant: &str) -> bool {
        catalogue()
            .configuration(onglet.name(), identifiant)
            .map(|config| self.onglet(onglet).correspond_a(config))
            .unwrap_or(false)
    }

    pub fn configuration_de(&self, onglet: OngletsChecklistGenerale) -> Option<&'static str> {
        catalogue()
            .onglet(onglet.name())
            .and_then(|o| o.get_status_of(self.onglet(onglet)))
            .map(|config| config.identifiant.as_str())
    }
}

impl Default for StatutsChecklistGenerale {
    fn default() -> Self {
        let premier = |onglet: OngletsChecklistGenerale| {
            catalogue()
                .onglet(onglet.name())
                .and_then(|o| o.statuts.first())
                .map(StatutChecklist::depuis_configuration)
                .unwrap_or_else(|| StatutChecklist::new("", InitialCandidat))
        };
        use OngletsChecklistGenerale::*;
        Self {
            donnees_personnelles: premier(DonneesPersonnelles),
            frais_dossier: premier(FraisDossier),
            assimilation: premier(Assimilation),
            choix_formation: premier(ChoixFormation),
            parcours_anterieur: premier(ParcoursAnterieur),
            financabilite: premier(Financabilite),
            specificites_formation: premier(SpecificitesFormation),
            decision_facultaire: premier(DecisionFacultaire),
            decision_sic: premier(DecisionSic),
        }
    }
}

pub struct InitialiserChecklistGenerale;

impl InitialiserChecklistGenerale {
    pub fn initialiser(
        training_type: TrainingType,
        profil: &ProfilCandidat,
        experiences: &[ExperienceParcours],
        annee_courante: u32,
    ) -> Result<StatutsChecklistGenerale, BusinessException> {
        use OngletsChecklistGenerale::*;
        let noeud = |onglet: OngletsChecklistGenerale, identifiant: &str| {
            configuration(onglet, identifiant).map(StatutChecklist::depuis_configuration)
        };

        let frais_dossier = if profil.doit_payer_frais_dossier {
            noeud(FraisDossier, "A_PAYER")?
        } else {
            noeud(FraisDossier, "NON_CONCERNE")?
        };
        let assimilation = if profil.est_concerne_par_assimilation() {
            noeud(Assimilation, "DECLARE_ASSIMILE_OU_PAS")?
        } else {
            noeud(Assimilation, "NON_CONCERNE")?
        };
        let financabilite = if training_type.est_soumise_a_financabilite() {
            noeud(Financabilite, "A_TRAITER")?
        } else {
            noeud(Financabilite, "NON_CONCERNE")?
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

        Ok(StatutsChecklistGenerale {
            donnees_personnelles: noeud(DonneesPersonnelles, "A_TRAITER")?,
            frais_dossier,
            assimilation,
            choix_formation: noeud(ChoixFormation, "A_TRAITER")?,
            parcours_anterieur,
            financabilite,
            specificites_formation: noeud(SpecificitesFormation, "A_TRAITER")?,
            decision_facultaire: noeud(DecisionFacultaire, "A_TRAITER")?,
            decision_sic: noeud(DecisionSic, "A_TRAITER")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profil(doit_payer: bool) -> ProfilCandidat {
        ProfilCandidat {
            matricule: "0001".into(),
            prenom: "Jean".into(),
            nom: "Dupont".into(),
            pays_nationalite: "BE".into(),
            pays_nationalite_europeen: true,
            langue_contact: "fr-be".into(),
            doit_payer_frais_dossier: doit_payer,
        }
    }

    #[test]
    fn test_fees_tab_follows_profile() {
        let payant = InitialiserChecklistGenerale::initialiser(
            TrainingType::Bachelor,
            &profil(true),
            &[],
            2024,
        )
        .unwrap();
        let dispense = InitialiserChecklistGenerale::initialiser(
            TrainingType::Bachelor,
            &profil(false),
            &[],
            2024,
        )
        .unwrap();

        assert!(payant.est_dans(OngletsChecklistGenerale::FraisDossier, "A_PAYER"));
        assert!(dispense.est_dans(OngletsChecklistGenerale::FraisDossier, "NON_CONCERNE"));
        assert!(payant.est_dans(OngletsChecklistGenerale::Assimilation, "NON_CONCERNE"));
    }

    #[test]
    fn test_faculty_decision_has_no_closure() {
        assert!(configuration(OngletsChecklistGenerale::DecisionFacultaire, "CLOTURE").is_err());
        assert_eq!(
            StatutsChecklistGenerale::default().configuration_de(
                OngletsChecklistGenerale::DecisionFacultaire,
            ),
            Some("A_TRAITER")
        );
    }
}
