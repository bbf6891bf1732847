// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Value objects recorded by faculty, doctoral committee and enrolment office
//! decisions. Shared by the doctorate and general education contexts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Documents requested from the candidate, keyed by document identifier, with
/// the reason shown to the candidate.
pub type DocumentsDemandes = BTreeMap<String, String>;

/// Refusal reasons: references to the reason catalog plus free-text reasons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotifsRefus {
    pub motifs: Vec<String>,
    pub autres_motifs: Vec<String>,
}

impl MotifsRefus {
    pub fn est_vide(&self) -> bool {
        self.motifs.is_empty() && self.autres_motifs.iter().all(|m| m.trim().is_empty())
    }
}

/// Approval form filled by the deciding body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InformationsAcceptation {
    pub avec_conditions_complementaires: Option<bool>,
    pub conditions_complementaires: Vec<String>,
    pub avec_complements_formation: Option<bool>,
    pub complements_formation: Vec<String>,
    pub nombre_annees_prevoir_programme: Option<u32>,
    pub commentaire: String,
}

impl InformationsAcceptation {
    /// Every yes/no question answered, and answered "yes" questions detailed.
    pub fn est_complete(&self) -> bool {
        let conditions = match self.avec_conditions_complementaires {
            Some(true) => !self.conditions_complementaires.is_empty(),
            Some(false) => true,
            None => false,
        };
        let complements = match self.avec_complements_formation {
            Some(true) => !self.complements_formation.is_empty(),
            Some(false) => true,
            None => false,
        };
        conditions && complements && self.nombre_annees_prevoir_programme.is_some()
    }
}

/// Sub-state of the "derogation needed" SIC decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BesoinDeDerogation {
    AvisDirectionDemande,
    BesoinDeComplement,
    RefusDirection,
    AccordDirection,
}

impl BesoinDeDerogation {
    pub const ALL: [BesoinDeDerogation; 4] = [
        Self::AvisDirectionDemande,
        Self::BesoinDeComplement,
        Self::RefusDirection,
        Self::AccordDirection,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AvisDirectionDemande => "AVIS_DIRECTION_DEMANDE",
            Self::BesoinDeComplement => "BESOIN_DE_COMPLEMENT",
            Self::RefusDirection => "REFUS_DIRECTION",
            Self::AccordDirection => "ACCORD_DIRECTION",
        }
    }

    pub fn libelle(&self) -> &'static str {
        match self {
            Self::AvisDirectionDemande => "Management opinion requested",
            Self::BesoinDeComplement => "Further information required",
            Self::RefusDirection => "Management refusal",
            Self::AccordDirection => "Management approval",
        }
    }
}

impl fmt::Display for BesoinDeDerogation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sub-state of the financeability derogation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DerogationFinancement {
    #[default]
    NonConcerne,
    CandidatNotifie,
    AbandonDuCandidat,
    RefusDeDerogationFacultaire,
    AccordDeDerogationFacultaire,
}

impl DerogationFinancement {
    pub const ALL: [DerogationFinancement; 5] = [
        Self::NonConcerne,
        Self::CandidatNotifie,
        Self::AbandonDuCandidat,
        Self::RefusDeDerogationFacultaire,
        Self::AccordDeDerogationFacultaire,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NonConcerne => "NON_CONCERNE",
            Self::CandidatNotifie => "CANDIDAT_NOTIFIE",
            Self::AbandonDuCandidat => "ABANDON_DU_CANDIDAT",
            Self::RefusDeDerogationFacultaire => "REFUS_DE_DEROGATION_FACULTAIRE",
            Self::AccordDeDerogationFacultaire => "ACCORD_DE_DEROGATION_FACULTAIRE",
        }
    }

    pub fn libelle(&self) -> &'static str {
        match self {
            Self::NonConcerne => "Not concerned",
            Self::CandidatNotifie => "Candidate notified",
            Self::AbandonDuCandidat => "Candidate withdrawal",
            Self::RefusDeDerogationFacultaire => "Faculty derogation refusal",
            Self::AccordDeDerogationFacultaire => "Faculty derogation approval",
        }
    }
}

/// Progress of the authentication of a curriculum experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EtatAuthentificationParcours {
    #[default]
    NonConcerne,
    AuthentificationDemandee,
    EtablissementContacte,
    Vrai,
    Faux,
}

impl EtatAuthentificationParcours {
    pub const ALL: [EtatAuthentificationParcours; 5] = [
        Self::NonConcerne,
        Self::AuthentificationDemandee,
        Self::EtablissementContacte,
        Self::Vrai,
        Self::Faux,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NonConcerne => "NON_CONCERNE",
            Self::AuthentificationDemandee => "AUTHENTIFICATION_DEMANDEE",
            Self::EtablissementContacte => "ETABLISSEMENT_CONTACTE",
            Self::Vrai => "VRAI",
            Self::Faux => "FAUX",
        }
    }

    pub fn libelle(&self) -> &'static str {
        match self {
            Self::NonConcerne => "Not concerned",
            Self::AuthentificationDemandee => "Authentication requested",
            Self::EtablissementContacte => "Institution contacted",
            Self::Vrai => "Authentic",
            Self::Faux => "Forged",
        }
    }

    /// States the candidate must be told about.
    pub fn doit_notifier_candidat(&self) -> bool {
        matches!(self, Self::EtablissementContacte | Self::Faux)
    }
}

impl fmt::Display for EtatAuthentificationParcours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle of a message handed over to the mail adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub destinataire: String,
    pub objet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_informations_acceptation_completeness() {
        let mut infos = InformationsAcceptation::default();
        assert!(!infos.est_complete());

        infos.avec_conditions_complementaires = Some(false);
        infos.avec_complements_formation = Some(true);
        infos.nombre_annees_prevoir_programme = Some(1);
        assert!(!infos.est_complete());

        infos.complements_formation.push("LSINF1101".into());
        assert!(infos.est_complete());
    }

    #[test]
    fn test_motifs_refus_blank_free_text_is_empty() {
        let motifs = MotifsRefus {
            motifs: vec![],
            autres_motifs: vec!["  ".into()],
        };
        assert!(motifs.est_vide());
    }
}
