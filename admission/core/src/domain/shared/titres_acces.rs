// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Access Titles
//!
//! Static lookup from a training type to the access conditions that make a
//! candidate admissible, evaluated against the conditions the candidate's
//! profile fulfils.
//!
//! Two cases must not be confused:
//!
//! - a training type **mapped to an empty list** requires no access condition
//!   and is always satisfied;
//! - a training type **absent** from the matrix has no admissible condition and
//!   is never satisfied.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer (shared kernel)
//! - **Port:** [`ITitresAcces`], implemented by profile adapters

use crate::domain::shared::exceptions::AdmissionError;
use crate::domain::shared::identite::PropositionIdentity;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainingType {
    Bachelor,
    MasterMa120,
    MasterMd120,
    MasterMs120,
    MasterMs180240,
    MasterM1,
    MasterMc,
    Aggregation,
    Capaes,
    Phd,
    FormationPhd,
    CertificateOfParticipation,
    CertificateOfSuccess,
    CertificateOfHoldingCredits,
    UniversityFirstCycleCertificate,
    UniversitySecondCycleCertificate,
    ResearchCertificate,
}

impl TrainingType {
    pub const ALL: [TrainingType; 17] = [
        Self::Bachelor,
        Self::MasterMa120,
        Self::MasterMd120,
        Self::MasterMs120,
        Self::MasterMs180240,
        Self::MasterM1,
        Self::MasterMc,
        Self::Aggregation,
        Self::Capaes,
        Self::Phd,
        Self::FormationPhd,
        Self::CertificateOfParticipation,
        Self::CertificateOfSuccess,
        Self::CertificateOfHoldingCredits,
        Self::UniversityFirstCycleCertificate,
        Self::UniversitySecondCycleCertificate,
        Self::ResearchCertificate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bachelor => "BACHELOR",
            Self::MasterMa120 => "MASTER_MA_120",
            Self::MasterMd120 => "MASTER_MD_120",
            Self::MasterMs120 => "MASTER_MS_120",
            Self::MasterMs180240 => "MASTER_MS_180_240",
            Self::MasterM1 => "MASTER_M1",
            Self::MasterMc => "MASTER_MC",
            Self::Aggregation => "AGGREGATION",
            Self::Capaes => "CAPAES",
            Self::Phd => "PHD",
            Self::FormationPhd => "FORMATION_PHD",
            Self::CertificateOfParticipation => "CERTIFICATE_OF_PARTICIPATION",
            Self::CertificateOfSuccess => "CERTIFICATE_OF_SUCCESS",
            Self::CertificateOfHoldingCredits => "CERTIFICATE_OF_HOLDING_CREDITS",
            Self::UniversityFirstCycleCertificate => "UNIVERSITY_FIRST_CYCLE_CERTIFICATE",
            Self::UniversitySecondCycleCertificate => "UNIVERSITY_SECOND_CYCLE_CERTIFICATE",
            Self::ResearchCertificate => "RESEARCH_CERTIFICATE",
        }
    }

    /// Trainings whose candidates go through the financeability check.
    pub fn est_soumise_a_financabilite(&self) -> bool {
        matches!(
            self,
            Self::Bachelor
                | Self::MasterMa120
                | Self::MasterMd120
                | Self::MasterMs120
                | Self::MasterMs180240
                | Self::MasterM1
                | Self::MasterMc
                | Self::Aggregation
                | Self::Capaes
        )
    }
}

impl fmt::Display for TrainingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrainingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalise = s.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.name() == normalise)
            .ok_or_else(|| format!("unknown training type '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionAcces {
    DiplomationSecondaireBelge,
    DiplomationSecondaireEtranger,
    AlternativeEtudesSecondaires,
    PotentielBachelierBelgeSansDiplomation,
    DiplomationAcademiqueBelge,
    DiplomationAcademiqueEtranger,
    PotentielMasterBelgeSansDiplomation,
    DiplomationPotentielMasterBelge,
    DiplomationPotentielMasterEtranger,
    DiplomationPotentielDoctoratBelge,
    PotentielAccesVae,
}

impl ConditionAcces {
    pub const ALL: [ConditionAcces; 11] = [
        Self::DiplomationSecondaireBelge,
        Self::DiplomationSecondaireEtranger,
        Self::AlternativeEtudesSecondaires,
        Self::PotentielBachelierBelgeSansDiplomation,
        Self::DiplomationAcademiqueBelge,
        Self::DiplomationAcademiqueEtranger,
        Self::PotentielMasterBelgeSansDiplomation,
        Self::DiplomationPotentielMasterBelge,
        Self::DiplomationPotentielMasterEtranger,
        Self::DiplomationPotentielDoctoratBelge,
        Self::PotentielAccesVae,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DiplomationSecondaireBelge => "DIPLOMATION_SECONDAIRE_BELGE",
            Self::DiplomationSecondaireEtranger => "DIPLOMATION_SECONDAIRE_ETRANGER",
            Self::AlternativeEtudesSecondaires => "ALTERNATIVE_ETUDES_SECONDAIRES",
            Self::PotentielBachelierBelgeSansDiplomation => {
                "POTENTIEL_BACHELIER_BELGE_SANS_DIPLOMATION"
            }
            Self::DiplomationAcademiqueBelge => "DIPLOMATION_ACADEMIQUE_BELGE",
            Self::DiplomationAcademiqueEtranger => "DIPLOMATION_ACADEMIQUE_ETRANGER",
            Self::PotentielMasterBelgeSansDiplomation => "POTENTIEL_MASTER_BELGE_SANS_DIPLOMATION",
            Self::DiplomationPotentielMasterBelge => "DIPLOMATION_POTENTIEL_MASTER_BELGE",
            Self::DiplomationPotentielMasterEtranger => "DIPLOMATION_POTENTIEL_MASTER_ETRANGER",
            Self::DiplomationPotentielDoctoratBelge => "DIPLOMATION_POTENTIEL_DOCTORAT_BELGE",
            Self::PotentielAccesVae => "POTENTIEL_ACCES_VAE",
        }
    }
}

impl fmt::Display for ConditionAcces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConditionAcces {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalise = s.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalise)
            .ok_or_else(|| format!("unknown access condition '{}'", s))
    }
}

/// Access conditions fulfilled by a candidate, as computed from their profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConditionsDTO {
    pub diplomation_secondaire_belge: bool,
    pub diplomation_secondaire_etranger: bool,
    pub alternative_etudes_secondaires: bool,
    pub potentiel_bachelier_belge_sans_diplomation: bool,
    pub diplomation_academique_belge: bool,
    pub diplomation_academique_etranger: bool,
    pub potentiel_master_belge_sans_diplomation: bool,
    pub diplomation_potentiel_master_belge: bool,
    pub diplomation_potentiel_master_etranger: bool,
    pub diplomation_potentiel_doctorat_belge: bool,
    pub potentiel_acces_vae: bool,
}

impl AdmissionConditionsDTO {
    pub fn flag(&self, condition: ConditionAcces) -> bool {
        match condition {
            ConditionAcces::DiplomationSecondaireBelge => self.diplomation_secondaire_belge,
            ConditionAcces::DiplomationSecondaireEtranger => self.diplomation_secondaire_etranger,
            ConditionAcces::AlternativeEtudesSecondaires => self.alternative_etudes_secondaires,
            ConditionAcces::PotentielBachelierBelgeSansDiplomation => {
                self.potentiel_bachelier_belge_sans_diplomation
            }
            ConditionAcces::DiplomationAcademiqueBelge => self.diplomation_academique_belge,
            ConditionAcces::DiplomationAcademiqueEtranger => self.diplomation_academique_etranger,
            ConditionAcces::PotentielMasterBelgeSansDiplomation => {
                self.potentiel_master_belge_sans_diplomation
            }
            ConditionAcces::DiplomationPotentielMasterBelge => {
                self.diplomation_potentiel_master_belge
            }
            ConditionAcces::DiplomationPotentielMasterEtranger => {
                self.diplomation_potentiel_master_etranger
            }
            ConditionAcces::DiplomationPotentielDoctoratBelge => {
                self.diplomation_potentiel_doctorat_belge
            }
            ConditionAcces::PotentielAccesVae => self.potentiel_acces_vae,
        }
    }

    pub fn avec(conditions: &[ConditionAcces]) -> Self {
        let mut dto = Self::default();
        for condition in conditions {
            dto.set_flag(*condition, true);
        }
        dto
    }

    pub fn set_flag(&mut self, condition: ConditionAcces, valeur: bool) {
        let champ = match condition {
            ConditionAcces::DiplomationSecondaireBelge => &mut self.diplomation_secondaire_belge,
            ConditionAcces::DiplomationSecondaireEtranger => {
                &mut self.diplomation_secondaire_etranger
            }
            ConditionAcces::AlternativeEtudesSecondaires => {
                &mut self.alternative_etudes_secondaires
            }
            ConditionAcces::PotentielBachelierBelgeSansDiplomation => {
                &mut self.potentiel_bachelier_belge_sans_diplomation
            }
            ConditionAcces::DiplomationAcademiqueBelge => &mut self.diplomation_academique_belge,
            ConditionAcces::DiplomationAcademiqueEtranger => {
                &mut self.diplomation_academique_etranger
            }
            ConditionAcces::PotentielMasterBelgeSansDiplomation => {
                &mut self.potentiel_master_belge_sans_diplomation
            }
            ConditionAcces::DiplomationPotentielMasterBelge => {
                &mut self.diplomation_potentiel_master_belge
            }
            ConditionAcces::DiplomationPotentielMasterEtranger => {
                &mut self.diplomation_potentiel_master_etranger
            }
            ConditionAcces::DiplomationPotentielDoctoratBelge => {
                &mut self.diplomation_potentiel_doctorat_belge
            }
            ConditionAcces::PotentielAccesVae => &mut self.potentiel_acces_vae,
        };
        *champ = valeur;
    }
}

// ============================================================================
// Matrix
// ============================================================================

/// Immutable training type → admissible conditions lookup.
#[derive(Debug)]
pub struct ConditionsAccesMatrix {
    conditions: HashMap<TrainingType, Vec<ConditionAcces>>,
    formations_sans_condition: BTreeSet<TrainingType>,
}

static MATRIX: OnceLock<ConditionsAccesMatrix> = OnceLock::new();

/// Shared matrix, built on first use.
pub fn matrix() -> &'static ConditionsAccesMatrix {
    MATRIX.get_or_init(ConditionsAccesMatrix::init)
}

impl ConditionsAccesMatrix {
    pub fn init() -> Self {
        use ConditionAcces::*;
        use TrainingType::*;

        let masters = [
            DiplomationAcademiqueBelge,
            DiplomationAcademiqueEtranger,
            PotentielMasterBelgeSansDiplomation,
            PotentielAccesVae,
        ];
        let post_master = [
            DiplomationPotentielMasterBelge,
            DiplomationPotentielMasterEtranger,
            PotentielAccesVae,
        ];
        let doctorat = [
            DiplomationPotentielMasterBelge,
            DiplomationPotentielMasterEtranger,
            DiplomationPotentielDoctoratBelge,
            PotentielAccesVae,
        ];

        let mut conditions: HashMap<TrainingType, Vec<ConditionAcces>> = HashMap::new();
        conditions.insert(
            Bachelor,
            vec![
                DiplomationSecondaireBelge,
                DiplomationSecondaireEtranger,
                AlternativeEtudesSecondaires,
                DiplomationAcademiqueBelge,
                PotentielAccesVae,
            ],
        );
        for training in [MasterMa120, MasterMd120, MasterMs120, MasterM1] {
            conditions.insert(training, masters.to_vec());
        }
        conditions.insert(
            MasterMs180240,
            vec![
                DiplomationSecondaireBelge,
                DiplomationSecondaireEtranger,
                AlternativeEtudesSecondaires,
                PotentielBachelierBelgeSansDiplomation,
                DiplomationAcademiqueBelge,
                PotentielAccesVae,
            ],
        );
        for training in [MasterMc, Aggregation, Capaes] {
            conditions.insert(training, post_master.to_vec());
        }
        for training in [Phd, FormationPhd] {
            conditions.insert(training, doctorat.to_vec());
        }
        for training in [
            CertificateOfParticipation,
            CertificateOfSuccess,
            CertificateOfHoldingCredits,
        ] {
            conditions.insert(training, Vec::new());
        }

        let formations_sans_condition = conditions
            .iter()
            .filter(|(_, liste)| liste.is_empty())
            .map(|(training, _)| *training)
            .collect();

        Self {
            conditions,
            formations_sans_condition,
        }
    }

    /// Admissible conditions of a training, empty when unmapped.
    pub fn conditions(&self, training_type: TrainingType) -> &[ConditionAcces] {
        self.conditions
            .get(&training_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn est_sans_condition(&self, training_type: TrainingType) -> bool {
        self.formations_sans_condition.contains(&training_type)
    }

    pub fn est_reference(&self, training_type: TrainingType) -> bool {
        self.conditions.contains_key(&training_type)
    }

    pub fn formations_sans_condition(&self) -> impl Iterator<Item = TrainingType> + '_ {
        self.formations_sans_condition.iter().copied()
    }

    pub fn titres(
        &self,
        training_type: TrainingType,
        conditions: AdmissionConditionsDTO,
    ) -> Titres {
        Titres {
            conditions,
            types: self.conditions(training_type).to_vec(),
            sans_condition: self.est_sans_condition(training_type),
        }
    }
}

/// Evaluated access titles of a candidate for one training type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Titres {
    pub conditions: AdmissionConditionsDTO,
    pub types: Vec<ConditionAcces>,
    pub sans_condition: bool,
}

impl Titres {
    pub fn est_valide(&self) -> bool {
        self.sans_condition || self.types.iter().any(|t| self.conditions.flag(*t))
    }

    /// Admissible conditions the candidate actually fulfils, in matrix order.
    pub fn remplies(&self) -> Vec<ConditionAcces> {
        self.types
            .iter()
            .copied()
            .filter(|t| self.conditions.flag(*t))
            .collect()
    }
}

#[async_trait]
pub trait ITitresAcces: Send + Sync {
    async fn conditions_remplies(
        &self,
        matricule_candidat: &str,
        equivalence_diplome: &[String],
    ) -> Result<AdmissionConditionsDTO, AdmissionError>;

    async fn recuperer_titres_access(
        &self,
        matricule_candidat: &str,
        training_type: TrainingType,
        equivalence_diplome: &[String],
    ) -> Result<Titres, AdmissionError> {
        let conditions = self
            .conditions_remplies(matricule_candidat, equivalence_diplome)
            .await?;
        Ok(matrix().titres(training_type, conditions))
    }
}

// ============================================================================
// Selectable access titles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeTitreAccesSelectionnable {
    ExperiencesAcademiques,
    ExperiencesNonAcademiques,
    EtudesSecondaires,
}

/// Prior experience the staff may retain as the candidate's access title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitreAccesSelectionnable {
    pub proposition_id: PropositionIdentity,
    pub uuid_experience: String,
    pub type_titre: TypeTitreAccesSelectionnable,
    pub annee: Option<u32>,
    pub selectionne: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixe(AdmissionConditionsDTO);

    #[async_trait]
    impl ITitresAcces for Fixe {
        async fn conditions_remplies(
            &self,
            _matricule_candidat: &str,
            _equivalence_diplome: &[String],
        ) -> Result<AdmissionConditionsDTO, AdmissionError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_bachelor_valid_with_any_listed_flag() {
        for flag in [
            ConditionAcces::DiplomationSecondaireBelge,
            ConditionAcces::DiplomationSecondaireEtranger,
            ConditionAcces::AlternativeEtudesSecondaires,
            ConditionAcces::DiplomationAcademiqueBelge,
            ConditionAcces::PotentielAccesVae,
        ] {
            let titres = Fixe(AdmissionConditionsDTO::avec(&[flag]))
                .recuperer_titres_access("0123", TrainingType::Bachelor, &[])
                .await
                .unwrap();
            assert!(titres.est_valide(), "{flag} should open a bachelor");
            assert_eq!(titres.remplies(), vec![flag]);
        }
    }

    #[tokio::test]
    async fn test_bachelor_invalid_with_unlisted_flags() {
        let titres = Fixe(AdmissionConditionsDTO::avec(&[
            ConditionAcces::DiplomationAcademiqueEtranger,
            ConditionAcces::DiplomationPotentielDoctoratBelge,
        ]))
        .recuperer_titres_access("0123", TrainingType::Bachelor, &[])
        .await
        .unwrap();

        assert!(!titres.est_valide());
    }

    #[tokio::test]
    async fn test_empty_list_always_valid() {
        let titres = Fixe(AdmissionConditionsDTO::default())
            .recuperer_titres_access("0123", TrainingType::CertificateOfSuccess, &[])
            .await
            .unwrap();

        assert!(titres.types.is_empty());
        assert!(titres.sans_condition);
        assert!(titres.est_valide());
    }

    #[tokio::test]
    async fn test_absent_key_never_valid() {
        let mut toutes = AdmissionConditionsDTO::default();
        for condition in ConditionAcces::ALL {
            toutes.set_flag(condition, true);
        }
        let titres = Fixe(toutes)
            .recuperer_titres_access("0123", TrainingType::ResearchCertificate, &[])
            .await
            .unwrap();

        assert!(!matrix().est_reference(TrainingType::ResearchCertificate));
        assert!(!titres.sans_condition);
        assert!(!titres.est_valide());
    }

    #[test]
    fn test_formations_sans_condition_are_exactly_empty_lists() {
        let sans: Vec<_> = matrix().formations_sans_condition().collect();
        assert_eq!(
            sans,
            vec![
                TrainingType::CertificateOfParticipation,
                TrainingType::CertificateOfSuccess,
                TrainingType::CertificateOfHoldingCredits,
            ]
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("master-mc".parse::<TrainingType>().unwrap(), TrainingType::MasterMc);
        assert_eq!(
            "POTENTIEL_ACCES_VAE".parse::<ConditionAcces>().unwrap(),
            ConditionAcces::PotentielAccesVae
        );
        assert!("nope".parse::<TrainingType>().is_err());
    }
}
