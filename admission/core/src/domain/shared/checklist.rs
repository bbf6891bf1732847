// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Checklist Engine
//!
//! Hierarchical review checklist attached to every proposition, and the static
//! configuration catalogs used to decide whether a checklist tab is in an
//! expected shape before a command may proceed.
//!
//! - [`StatutChecklist`]: recursive value object (one per tab, children per
//!   curriculum experience or sub-decision).
//! - [`ConfigurationStatutChecklist`]: named `(statut, extra)` pair, matched
//!   with subset semantics on `extra`.
//! - [`ConfigurationOngletChecklist`]: ordered list of configurations of one
//!   tab; the first matching configuration wins.
//! - [`CatalogueChecklist`]: every tab of one admission context, built once by
//!   the context's `init()` and never mutated afterwards.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer (shared kernel)

use crate::domain::shared::exceptions::BusinessException;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Sub-state mapping stored next to a checklist status.
pub type ExtraChecklist = BTreeMap<String, String>;

/// Key under which a child checklist stores the identity of the entity it tracks.
pub const CLE_IDENTIFIANT: &str = "identifiant";

// ============================================================================
// Value Objects
// ============================================================================

/// Closed vocabulary of checklist statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChoixStatutChecklist {
    /// Not yet handled by staff
    InitialCandidat,
    /// Not applicable for this candidate
    InitialNonConcerne,
    GestEnCours,
    GestBlocage,
    GestBlocageUlterieur,
    GestReussite,
    /// Completed by the system itself (e.g. payment received)
    SystReussite,
}

impl ChoixStatutChecklist {
    pub const ALL: [ChoixStatutChecklist; 7] = [
        Self::InitialCandidat,
        Self::InitialNonConcerne,
        Self::GestEnCours,
        Self::GestBlocage,
        Self::GestBlocageUlterieur,
        Self::GestReussite,
        Self::SystReussite,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::InitialCandidat => "INITIAL_CANDIDAT",
            Self::InitialNonConcerne => "INITIAL_NON_CONCERNE",
            Self::GestEnCours => "GEST_EN_COURS",
            Self::GestBlocage => "GEST_BLOCAGE",
            Self::GestBlocageUlterieur => "GEST_BLOCAGE_ULTERIEUR",
            Self::GestReussite => "GEST_REUSSITE",
            Self::SystReussite => "SYST_REUSSITE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|statut| statut.name() == name)
    }
}

impl fmt::Display for ChoixStatutChecklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns true when every `(key, value)` of `attendu` is present in `candidat`.
///
/// Keys of `candidat` absent from `attendu` are ignored. This is a partial
/// equality: an empty `attendu` is a subset of anything.
pub fn extra_subset(attendu: &ExtraChecklist, candidat: &ExtraChecklist) -> bool {
    attendu
        .iter()
        .all(|(cle, valeur)| candidat.get(cle) == Some(valeur))
}

/// Builds an [`ExtraChecklist`] from string pairs.
pub fn extra<const N: usize>(paires: [(&str, &str); N]) -> ExtraChecklist {
    paires
        .into_iter()
        .map(|(cle, valeur)| (cle.to_string(), valeur.to_string()))
        .collect()
}

/// One node of a proposition checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutChecklist {
    pub libelle: String,
    pub statut: Option<ChoixStatutChecklist>,
    #[serde(default)]
    pub extra: ExtraChecklist,
    #[serde(default)]
    pub enfants: Vec<StatutChecklist>,
}

impl StatutChecklist {
    pub fn new(libelle: impl Into<String>, statut: ChoixStatutChecklist) -> Self {
        Self {
            libelle: libelle.into(),
            statut: Some(statut),
            extra: ExtraChecklist::new(),
            enfants: Vec::new(),
        }
    }

    /// Node carrying exactly the `(statut, extra)` of a configuration.
    pub fn depuis_configuration(configuration: &ConfigurationStatutChecklist) -> Self {
        Self {
            libelle: configuration.libelle.clone(),
            statut: configuration.statut,
            extra: configuration.extra.clone(),
            enfants: Vec::new(),
        }
    }

    /// Child node tracking the entity `identifiant`.
    pub fn enfant(identifiant: &str, configuration: &ConfigurationStatutChecklist) -> Self {
        let mut noeud = Self::depuis_configuration(configuration);
        noeud
            .extra
            .insert(CLE_IDENTIFIANT.to_string(), identifiant.to_string());
        noeud
    }

    pub fn identifiant(&self) -> Option<&str> {
        self.extra.get(CLE_IDENTIFIANT).map(String::as_str)
    }

    pub fn recuperer_enfant(&self, identifiant: &str) -> Option<&StatutChecklist> {
        self.enfants
            .iter()
            .find(|enfant| enfant.identifiant() == Some(identifiant))
    }

    pub fn recuperer_enfant_mut(&mut self, identifiant: &str) -> Option<&mut StatutChecklist> {
        self.enfants
            .iter_mut()
            .find(|enfant| enfant.identifiant() == Some(identifiant))
    }

    /// True when this node is in the given configuration.
    pub fn correspond_a(&self, configuration: &ConfigurationStatutChecklist) -> bool {
        configuration.matches(self.statut, &self.extra)
    }

    /// Replaces `(statut, extra, libelle)` by the configuration's values.
    ///
    /// The `identifiant` key of a child node survives the replacement.
    pub fn appliquer(&mut self, configuration: &ConfigurationStatutChecklist) {
        let identifiant = self.extra.remove(CLE_IDENTIFIANT);
        self.libelle = configuration.libelle.clone();
        self.statut = configuration.statut;
        self.extra = configuration.extra.clone();
        if let Some(identifiant) = identifiant {
            self.extra.insert(CLE_IDENTIFIANT.to_string(), identifiant);
        }
    }

    /// Like [`appliquer`](Self::appliquer) but keeps existing extra keys that
    /// the configuration does not mention.
    pub fn appliquer_en_fusionnant(&mut self, configuration: &ConfigurationStatutChecklist) {
        self.libelle = configuration.libelle.clone();
        if configuration.statut.is_some() {
            self.statut = configuration.statut;
        }
        for (cle, valeur) in &configuration.extra {
            self.extra.insert(cle.clone(), valeur.clone());
        }
    }

    /// Replaces or appends the child with the same identifiant.
    pub fn remplacer_enfant(&mut self, enfant: StatutChecklist) {
        match enfant
            .identifiant()
            .and_then(|id| self.enfants.iter().position(|e| e.identifiant() == Some(id)))
        {
            Some(position) => self.enfants[position] = enfant,
            None => self.enfants.push(enfant),
        }
    }
}

// ============================================================================
// Configuration catalogs
// ============================================================================

/// Named `(statut, extra)` pair a tab may be in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationStatutChecklist {
    pub identifiant: String,
    pub libelle: String,
    pub statut: Option<ChoixStatutChecklist>,
    #[serde(default)]
    pub extra: ExtraChecklist,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiant_parent: Option<String>,
}

impl ConfigurationStatutChecklist {
    pub fn new(
        identifiant: impl Into<String>,
        libelle: impl Into<String>,
        statut: ChoixStatutChecklist,
    ) -> Self {
        Self {
            identifiant: identifiant.into(),
            libelle: libelle.into(),
            statut: Some(statut),
            extra: ExtraChecklist::new(),
            identifiant_parent: None,
        }
    }

    /// Child configuration carrying only extra values (no status of its own).
    pub fn sous_statut(
        parent: &str,
        identifiant: impl Into<String>,
        libelle: impl Into<String>,
        extra: ExtraChecklist,
    ) -> Self {
        Self {
            identifiant: format!("{}.{}", parent, identifiant.into()),
            libelle: libelle.into(),
            statut: None,
            extra,
            identifiant_parent: Some(parent.to_string()),
        }
    }

    pub fn avec_extra(mut self, extra: ExtraChecklist) -> Self {
        self.extra = extra;
        self
    }

    /// Subset match: the configuration must carry a status equal to `statut`,
    /// and each of its extra entries must appear in `extra` with the same value.
    pub fn matches(&self, statut: Option<ChoixStatutChecklist>, extra: &ExtraChecklist) -> bool {
        match (self.statut, statut) {
            (Some(attendu), Some(candidat)) => attendu == candidat && extra_subset(
                &self.extra,
                extra,
            ),
            _ => false,
        }
    }

    /// Same as [`matches`](Self::matches) for a raw status name, as stored by
    /// persistence adapters.
    pub fn matches_raw(&self, statut: &str, extra: &ExtraChecklist) -> bool {
        self.matches(ChoixStatutChecklist::from_name(statut), extra)
    }

    /// Combines a parent configuration with one of its sub-statuses.
    pub fn merge_statuses(
        &self,
        other: &ConfigurationStatutChecklist,
    ) -> ConfigurationStatutChecklist {
        let mut extra = self.extra.clone();
        extra.extend(other.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        ConfigurationStatutChecklist {
            identifiant: self.identifiant.clone(),
            libelle: self.libelle.clone(),
            statut: self.statut.or(other.statut),
            extra,
            identifiant_parent: self.identifiant_parent.clone(),
        }
    }
}

/// Every configuration a tab may be in, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationOngletChecklist {
    pub identifiant: String,
    pub statuts: Vec<ConfigurationStatutChecklist>,
}

impl ConfigurationOngletChecklist {
    pub fn new(identifiant: impl Into<String>, statuts: Vec<ConfigurationStatutChecklist>) -> Self {
        Self {
            identifiant: identifiant.into(),
            statuts,
        }
    }

    /// First configuration matching `(statut, extra)`.
    ///
    /// Several configurations may share a status and differ only by extra,
    /// so declaration order decides ties.
    pub fn get_status(
        &self,
        statut: Option<ChoixStatutChecklist>,
        extra: Option<&ExtraChecklist>,
    ) -> Option<&ConfigurationStatutChecklist> {
        let vide = ExtraChecklist::new();
        let extra = extra.unwrap_or(&vide);
        self.statuts.iter().find(|config| config.matches(statut, extra))
    }

    pub fn get_status_of(&self, noeud: &StatutChecklist) -> Option<&ConfigurationStatutChecklist> {
        self.get_status(noeud.statut, Some(&noeud.extra))
    }

    pub fn configuration(&self, identifiant: &str) -> Option<&ConfigurationStatutChecklist> {
        self.statuts.iter().find(|config| config.identifiant == identifiant)
    }

    /// Top-level configurations only (child configurations excluded).
    pub fn statuts_principaux(&self) -> impl Iterator<Item = &ConfigurationStatutChecklist> {
        self.statuts.iter().filter(|config| config.identifiant_parent.is_none())
    }

    pub fn sous_statuts<'a>(
        &'a self,
        parent: &'a str,
    ) -> impl Iterator<Item = &'a ConfigurationStatutChecklist> + 'a {
        self.statuts
            .iter()
            .filter(move |config| config.identifiant_parent.as_deref() == Some(parent))
    }
}

/// All tabs of one admission context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueChecklist {
    pub contexte: String,
    pub onglets: Vec<ConfigurationOngletChecklist>,
}

impl CatalogueChecklist {
    pub fn onglet(&self, identifiant: &str) -> Option<&ConfigurationOngletChecklist> {
        self.onglets.iter().find(|onglet| onglet.identifiant == identifiant)
    }

    /// Configuration `identifiant` of tab `onglet`.
    pub fn configuration(
        &self,
        onglet: &str,
        identifiant: &str,
    ) -> Option<&ConfigurationStatutChecklist> {
        self.onglet(onglet).and_then(|o| o.configuration(identifiant))
    }

    /// Like [`configuration`](Self::configuration), failing with a business
    /// exception naming the unknown tab or configuration.
    pub fn exiger(
        &self,
        onglet: &str,
        identifiant: &str,
    ) -> Result<&ConfigurationStatutChecklist, BusinessException> {
        self.onglet(onglet)
            .ok_or_else(|| BusinessException::OngletChecklistInconnu {
                onglet: onglet.to_string(),
            })?
            .configuration(identifiant)
            .ok_or_else(|| BusinessException::ConfigurationChecklistInconnue {
                onglet: onglet.to_string(),
            })
    }

    /// Human label of a raw checklist node, if it matches a configuration.
    pub fn libelle_de(&self, onglet: &str, noeud: &StatutChecklist) -> Option<String> {
        self.onglet(onglet)
            .and_then(|o| o.get_status_of(noeud))
            .map(|config| config.libelle.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn onglet_decision() -> ConfigurationOngletChecklist {
        ConfigurationOngletChecklist::new(
            "decision",
            vec![
                ConfigurationStatutChecklist::new(
                    "A_TRAITER",
                    "To be processed",
                    ChoixStatutChecklist::InitialCandidat,
                ),
                ConfigurationStatutChecklist::new(
                    "PRIS_EN_CHARGE",
                    "Taken in charge",
                    ChoixStatutChecklist::GestEnCours,
                ),
                ConfigurationStatutChecklist::new(
                    "CLOTURE",
                    "Closed",
                    ChoixStatutChecklist::GestBlocage,
                )
                .avec_extra(extra([("decision", "CLOTURE")])),
                ConfigurationStatutChecklist::new(
                    "REFUS",
                    "Refusal",
                    ChoixStatutChecklist::GestBlocage,
                )
                .avec_extra(extra([("decision", "EN_DECISION")])),
            ],
        )
    }

    #[test]
    fn test_subset_ignores_additional_candidate_keys() {
        let config = ConfigurationStatutChecklist::new("X", "X", ChoixStatutChecklist::GestBlocage)
            .avec_extra(extra([("decision", "CLOTURE")]));

        let candidat = extra([("decision", "CLOTURE"), ("motif", "autre")]);
        assert!(config.matches(Some(ChoixStatutChecklist::GestBlocage), &candidat));
    }

    #[test]
    fn test_subset_rejects_missing_key() {
        let config = ConfigurationStatutChecklist::new("X", "X", ChoixStatutChecklist::GestBlocage)
            .avec_extra(extra([("decision", "CLOTURE"), ("motif", "autre")]));

        let candidat = extra([("decision", "CLOTURE")]);
        assert!(!config.matches(Some(ChoixStatutChecklist::GestBlocage), &candidat));
    }

    #[test]
    fn test_subset_rejects_different_value_or_status() {
        let config = ConfigurationStatutChecklist::new("X", "X", ChoixStatutChecklist::GestBlocage)
            .avec_extra(extra([("decision", "CLOTURE")]));

        assert!(
            !config.matches(
                Some(ChoixStatutChecklist::GestBlocage),
                &extra([("decision", "EN_DECISION")]),
            )
        );
        assert!(
            !config.matches(
                Some(ChoixStatutChecklist::GestEnCours),
                &extra([("decision", "CLOTURE")]),
            )
        );
        assert!(!config.matches(None, &extra([("decision", "CLOTURE")])));
    }

    #[test]
    fn test_configuration_without_status_never_matches() {
        let config = ConfigurationStatutChecklist::sous_statut(
            "AUTHENTIFICATION",
            "VRAI",
            "True",
            extra([("etat", "VRAI")]),
        );
        assert!(!config.matches(None, &extra([("etat", "VRAI")])));
        assert!(
            !config.matches(Some(ChoixStatutChecklist::GestEnCours), &extra([("etat", "VRAI")]))
        );
    }

    #[test]
    fn test_exhaustive_subset_property() {
        let cles = ["a", "b", "c"];
        let valeurs = ["1", "2"];
        // Every attendu/candidat built over the same small universe.
        let mut univers: Vec<ExtraChecklist> = vec![ExtraChecklist::new()];
        for cle in cles {
            let mut suivant = Vec::new();
            for base in &univers {
                suivant.push(base.clone());
                for valeur in valeurs {
                    let mut e = base.clone();
                    e.insert(cle.to_string(), valeur.to_string());
                    suivant.push(e);
                }
            }
            univers = suivant;
        }

        for attendu in &univers {
            let config = ConfigurationStatutChecklist::new(
                "X",
                "X",
                ChoixStatutChecklist::GestEnCours,
            )
            .avec_extra(attendu.clone());
            for candidat in &univers {
                let attendu_inclus = attendu.iter().all(|(k, v)| candidat.get(k) == Some(v));
                assert_eq!(
                    config.matches(Some(ChoixStatutChecklist::GestEnCours), candidat),
                    attendu_inclus
                );
            }
        }
    }

    #[test]
    fn test_get_status_first_match_wins() {
        let onglet = ConfigurationOngletChecklist::new(
            "t",
            vec![
                ConfigurationStatutChecklist::new(
                    "LARGE",
                    "Large",
                    ChoixStatutChecklist::GestBlocage,
                ),
                ConfigurationStatutChecklist::new(
                    "PRECIS",
                    "Precise",
                    ChoixStatutChecklist::GestBlocage,
                )
                .avec_extra(extra([("decision", "CLOTURE")])),
            ],
        );

        let trouve = onglet
            .get_status(
                Some(ChoixStatutChecklist::GestBlocage),
                Some(&extra([("decision", "CLOTURE")])),
            )
            .map(|c| c.identifiant.as_str());
        assert_eq!(trouve, Some("LARGE"));
    }

    #[test]
    fn test_get_status_discriminates_by_extra() {
        let onglet = onglet_decision();
        let refus = onglet.get_status(
            Some(ChoixStatutChecklist::GestBlocage),
            Some(&extra([("decision", "EN_DECISION")])),
        );
        assert_eq!(refus.map(|c| c.identifiant.as_str()), Some("REFUS"));

        assert!(onglet.get_status(Some(ChoixStatutChecklist::GestBlocage), None).is_none());
        assert!(onglet.get_status(Some(ChoixStatutChecklist::GestReussite), None).is_none());
    }

    #[test]
    fn test_merge_statuses() {
        let parent = ConfigurationStatutChecklist::new(
            "BESOIN_DEROGATION",
            "Derogation",
            ChoixStatutChecklist::GestEnCours,
        )
        .avec_extra(extra([("en_cours", "derogation")]));
        let enfant = ConfigurationStatutChecklist::sous_statut(
            "BESOIN_DEROGATION",
            "ACCORDE",
            "Granted",
            extra([("etat_besoin_derogation", "ACCORDE"), ("en_cours", "autre")]),
        );

        let fusion = parent.merge_statuses(&enfant);
        assert_eq!(fusion.statut, Some(ChoixStatutChecklist::GestEnCours));
        assert_eq!(fusion.identifiant, "BESOIN_DEROGATION");
        assert_eq!(fusion.extra.get("en_cours").map(String::as_str), Some("autre"));
        assert_eq!(fusion.extra.get("etat_besoin_derogation").map(String::as_str), Some("ACCORDE"));

        let sans_statut = enfant.merge_statuses(&parent);
        assert_eq!(sans_statut.statut, Some(ChoixStatutChecklist::GestEnCours));
    }

    #[test]
    fn test_appliquer_preserves_child_identity() {
        let onglet = onglet_decision();
        let a_traiter = onglet.configuration("A_TRAITER").unwrap();
        let cloture = onglet.configuration("CLOTURE").unwrap();

        let mut noeud = StatutChecklist::enfant("uuid-1", a_traiter);
        noeud.extra.insert("obsolete".into(), "x".into());
        noeud.appliquer(cloture);

        assert!(noeud.correspond_a(cloture));
        assert_eq!(noeud.identifiant(), Some("uuid-1"));
        assert!(!noeud.extra.contains_key("obsolete"));
    }

    #[test]
    fn test_appliquer_en_fusionnant_keeps_unrelated_keys() {
        let onglet = onglet_decision();
        let mut noeud = StatutChecklist::new("x", ChoixStatutChecklist::InitialCandidat);
        noeud.extra.insert("commentaire".into(), "ok".into());

        noeud.appliquer_en_fusionnant(onglet.configuration("REFUS").unwrap());

        assert_eq!(noeud.statut, Some(ChoixStatutChecklist::GestBlocage));
        assert_eq!(noeud.extra.get("commentaire").map(String::as_str), Some("ok"));
        assert_eq!(noeud.extra.get("decision").map(String::as_str), Some("EN_DECISION"));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut initiale = StatutChecklist::new("root", ChoixStatutChecklist::InitialCandidat);
        initiale.enfants.push(StatutChecklist::new("child", ChoixStatutChecklist::InitialCandidat));

        let mut actuelle = initiale.clone();
        actuelle.enfants[0].statut = Some(ChoixStatutChecklist::GestReussite);

        assert_eq!(initiale.enfants[0].statut, Some(ChoixStatutChecklist::InitialCandidat));
    }

    #[test]
    fn test_status_names_round_trip() {
        for statut in ChoixStatutChecklist::ALL {
            assert_eq!(ChoixStatutChecklist::from_name(statut.name()), Some(statut));
            let json = serde_json::to_string(&statut).unwrap();
            assert_eq!(json, format!("\"{}\"", statut.name()));
        }
        assert!(ChoixStatutChecklist::from_name("UNKNOWN").is_none());
    }

    #[test]
    fn test_remplacer_enfant() {
        let onglet = onglet_decision();
        let mut racine = StatutChecklist::new("root", ChoixStatutChecklist::InitialCandidat);
        racine.remplacer_enfant(
            StatutChecklist::enfant("a", onglet.configuration("A_TRAITER").unwrap()),
        );
        racine.remplacer_enfant(
            StatutChecklist::enfant("a", onglet.configuration("CLOTURE").unwrap()),
        );
        racine.remplacer_enfant(
            StatutChecklist::enfant("b", onglet.configuration("A_TRAITER").unwrap()),
        );

        assert_eq!(racine.enfants.len(), 2);
        assert!(
            racine.recuperer_enfant("a").unwrap().correspond_a(
                onglet.configuration("CLOTURE").unwrap(),
            )
        );
    }
}
