// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # In-Memory Translators
//!
//! Adapters for the ports giving access to data owned by other systems:
//! candidate identification, curriculum, academic calendar, staff directory
//! and the access conditions computed from the candidate's diplomas.
//!
//! Seeded from [`crate::infrastructure::fixtures`] by
//! [`crate::application::container::AdmissionContainer`].
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Implements:** `IProfilCandidatTranslator`, `ICurriculumTranslator`,
//!   `IAcademicYearTranslator`, `IPersonneConnueTranslator`, `ITitresAcces`

use crate::domain::shared::exceptions::AdmissionError;
use crate::domain::shared::profil::{
    ExperienceParcours, IAcademicYearTranslator, ICurriculumTranslator, IPersonneConnueTranslator,
    IProfilCandidatTranslator, PersonneConnue, ProfilCandidat,
};
use crate::domain::shared::titres_acces::{AdmissionConditionsDTO, ConditionAcces, ITitresAcces};
use crate::infrastructure::fixtures;
use async_trait::async_trait;
use std::collections::HashMap;

fn introuvable(port: &str, matricule: &str) -> AdmissionError {
    AdmissionError::Integration {
        port: port.to_string(),
        reference: matricule.to_string(),
        message: "unknown candidate".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryProfilCandidatTranslator {
    profils: HashMap<String, ProfilCandidat>,
}

impl InMemoryProfilCandidatTranslator {
    pub fn new(profils: Vec<ProfilCandidat>) -> Self {
        Self {
            profils: profils.into_iter().map(|p| (p.matricule.clone(), p)).collect(),
        }
    }
}

impl Default for InMemoryProfilCandidatTranslator {
    fn default() -> Self {
        Self::new(fixtures::profils())
    }
}

#[async_trait]
impl IProfilCandidatTranslator for InMemoryProfilCandidatTranslator {
    async fn get_identification(&self, matricule: &str) -> Result<ProfilCandidat, AdmissionError> {
        self.profils
            .get(matricule)
            .cloned()
            .ok_or_else(|| introuvable("profil_candidat", matricule))
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryCurriculumTranslator {
    experiences: Vec<(String, ExperienceParcours)>,
}

impl InMemoryCurriculumTranslator {
    pub fn new(experiences: Vec<(String, ExperienceParcours)>) -> Self {
        Self { experiences }
    }
}

impl Default for InMemoryCurriculumTranslator {
    fn default() -> Self {
        Self::new(fixtures::experiences())
    }
}

#[async_trait]
impl ICurriculumTranslator for InMemoryCurriculumTranslator {
    async fn get_experiences(
        &self,
        matricule: &str,
        annee_minimale: u32,
    ) -> Result<Vec<ExperienceParcours>, AdmissionError> {
        Ok(self
            .experiences
            .iter()
            .filter(|(candidat, experience)| {
                candidat == matricule && experience.annee >= annee_minimale
            })
            .map(|(_, experience)| experience.clone())
            .collect())
    }
}

/// Academic calendar frozen on one year.
#[derive(Debug, Clone, Copy)]
pub struct FixedAcademicYearTranslator {
    pub annee: u32,
}

impl Default for FixedAcademicYearTranslator {
    fn default() -> Self {
        Self {
            annee: fixtures::ANNEE_ACADEMIQUE_COURANTE,
        }
    }
}

#[async_trait]
impl IAcademicYearTranslator for FixedAcademicYearTranslator {
    async fn annee_courante(&self) -> Result<u32, AdmissionError> {
        Ok(self.annee)
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryPersonneConnueTranslator {
    personnes: HashMap<String, PersonneConnue>,
}

impl InMemoryPersonneConnueTranslator {
    pub fn new(personnes: Vec<PersonneConnue>) -> Self {
        Self {
            personnes: personnes.into_iter().map(|p| (p.matricule.clone(), p)).collect(),
        }
    }
}

impl Default for InMemoryPersonneConnueTranslator {
    fn default() -> Self {
        Self::new(fixtures::personnes())
    }
}

#[async_trait]
impl IPersonneConnueTranslator for InMemoryPersonneConnueTranslator {
    async fn get(&self, matricule: &str) -> Result<Option<PersonneConnue>, AdmissionError> {
        Ok(self.personnes.get(matricule).cloned())
    }
}

/// Access conditions per candidate. A recognised diploma equivalence adds the
/// foreign academic flag.
#[derive(Debug, Clone)]
pub struct InMemoryTitresAcces {
    conditions: HashMap<String, AdmissionConditionsDTO>,
}

impl InMemoryTitresAcces {
    pub fn new(conditions: Vec<(String, AdmissionConditionsDTO)>) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
        }
    }
}

impl Default for InMemoryTitresAcces {
    fn default() -> Self {
        Self::new(fixtures::conditions())
    }
}

#[async_trait]
impl ITitresAcces for InMemoryTitresAcces {
    async fn conditions_remplies(
        &self,
        matricule_candidat: &str,
        equivalence_diplome: &[String],
    ) -> Result<AdmissionConditionsDTO, AdmissionError> {
        let mut conditions = self
            .conditions
            .get(matricule_candidat)
            .cloned()
            .unwrap_or_default();
        if !equivalence_diplome.is_empty() {
            conditions.set_flag(ConditionAcces::DiplomationAcademiqueEtranger, true);
        }
        Ok(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::titres_acces::TrainingType;

    #[tokio::test]
    async fn test_curriculum_filters_old_experiences() {
        let translator = InMemoryCurriculumTranslator::default();
        let experiences = translator
            .get_experiences(fixtures::CANDIDAT_BELGE, fixtures::ANNEE_ACADEMIQUE_COURANTE - 5)
            .await
            .unwrap();

        let uuids: Vec<&str> = experiences.iter().map(|e| e.uuid.as_str()).collect();
        assert_eq!(
            uuids,
            vec![fixtures::EXPERIENCE_ACADEMIQUE, fixtures::EXPERIENCE_NON_ACADEMIQUE]
        );
    }

    #[test]
    fn test_unknown_candidate_is_an_integration_error() {
        let translator = InMemoryProfilCandidatTranslator::default();
        let erreur = tokio_test::block_on(translator.get_identification("9999")).unwrap_err();
        assert!(
            matches!(
                erreur,
                AdmissionError::Integration { ref port, .. } if port == "profil_candidat"
            )
        );
    }

    #[tokio::test]
    async fn test_equivalence_grants_master_access() {
        let titres_acces = InMemoryTitresAcces::default();

        let sans = titres_acces
            .recuperer_titres_access(fixtures::CANDIDAT_SANS_DIPLOME, TrainingType::MasterM1, &[])
            .await
            .unwrap();
        let avec = titres_acces
            .recuperer_titres_access(
                fixtures::CANDIDAT_SANS_DIPLOME,
                TrainingType::MasterM1,
                &["equivalence.pdf".to_string()],
            )
            .await
            .unwrap();

        assert!(!sans.est_valide());
        assert!(avec.est_valide());
    }
}
