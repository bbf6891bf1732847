// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Candidate Profile Ports
//!
//! Read-only translators onto the candidate's profile, curriculum, the
//! academic calendar and the directory of known persons. The admission core
//! never owns this data; adapters fetch it from the surrounding systems.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer (ports)
//! - **Implementations:** `crate::infrastructure::translators`

use crate::domain::shared::exceptions::AdmissionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identification data of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilCandidat {
    pub matricule: String,
    pub prenom: String,
    pub nom: String,
    /// ISO code of the nationality
    pub pays_nationalite: String,
    pub pays_nationalite_europeen: bool,
    pub langue_contact: String,
    /// Whether the candidate has to pay the application fee
    #[serde(default)]
    pub doit_payer_frais_dossier: bool,
}

impl ProfilCandidat {
    /// Belgian and EU nationals are not concerned by the assimilation review.
    pub fn est_concerne_par_assimilation(&self) -> bool {
        !(self.pays_nationalite == "BE" || self.pays_nationalite_europeen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeExperience {
    Academique,
    NonAcademique,
}

/// One curriculum experience of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceParcours {
    pub uuid: String,
    pub type_experience: TypeExperience,
    pub libelle: String,
    /// Most recent academic year covered by the experience
    pub annee: u32,
}

/// Person from the institution directory (supervisors, CA members).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonneConnue {
    pub matricule: String,
    pub prenom: String,
    pub nom: String,
    pub email: String,
    pub langue: String,
}

#[async_trait]
pub trait IProfilCandidatTranslator: Send + Sync {
    async fn get_identification(&self, matricule: &str) -> Result<ProfilCandidat, AdmissionError>;
}

#[async_trait]
pub trait ICurriculumTranslator: Send + Sync {
    /// Experiences whose year is at least `annee_minimale`.
    async fn get_experiences(
        &self,
        matricule: &str,
        annee_minimale: u32,
    ) -> Result<Vec<ExperienceParcours>, AdmissionError>;
}

#[async_trait]
pub trait IAcademicYearTranslator: Send + Sync {
    async fn annee_courante(&self) -> Result<u32, AdmissionError>;
}

#[async_trait]
pub trait IPersonneConnueTranslator: Send + Sync {
    async fn get(&self, matricule: &str) -> Result<Option<PersonneConnue>, AdmissionError>;
}

/// Number of past academic years whose experiences get a checklist entry.
pub const ANNEES_PARCOURS_ANTERIEUR: u32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    fn profil(pays: &str, europeen: bool) -> ProfilCandidat {
        ProfilCandidat {
            matricule: "0001".into(),
            prenom: "Jean".into(),
            nom: "Dupont".into(),
            pays_nationalite: pays.into(),
            pays_nationalite_europeen: europeen,
            langue_contact: "fr-be".into(),
            doit_payer_frais_dossier: false,
        }
    }

    #[test]
    fn test_assimilation_concerns_non_eu_only() {
        assert!(!profil("BE", false).est_concerne_par_assimilation());
        assert!(!profil("FR", true).est_concerne_par_assimilation());
        assert!(profil("CA", false).est_concerne_par_assimilation());
    }
}
