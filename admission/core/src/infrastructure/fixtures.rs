// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Deterministic data sets seeding the in-memory translators.
//!
//! Candidates:
//! - `0001`: Belgian, secondary and academic Belgian diplomas, no fees
//! - `0002`: Brazilian, foreign secondary diploma, must pay the application fees
//! - `0003`: Belgian, no diploma on record
//!
//! Directory: two promoters and two CA members.

use crate::domain::shared::profil::{
    ExperienceParcours, PersonneConnue, ProfilCandidat, TypeExperience,
};
use crate::domain::shared::titres_acces::{AdmissionConditionsDTO, ConditionAcces};

pub const CANDIDAT_BELGE: &str = "0001";
pub const CANDIDAT_ETRANGER: &str = "0002";
pub const CANDIDAT_SANS_DIPLOME: &str = "0003";

pub const PROMOTEUR_1: &str = "promoteur-1";
pub const PROMOTEUR_2: &str = "promoteur-2";
pub const MEMBRE_CA_1: &str = "membre-ca-1";
pub const MEMBRE_CA_2: &str = "membre-ca-2";

pub const EXPERIENCE_ACADEMIQUE: &str = "0001-academique-2022";
pub const EXPERIENCE_NON_ACADEMIQUE: &str = "0001-travail-2023";

pub const ANNEE_ACADEMIQUE_COURANTE: u32 = 2024;

fn profil(
    matricule: &str,
    prenom: &str,
    nom: &str,
    pays: &str,
    europeen: bool,
    doit_payer: bool,
) -> ProfilCandidat {
    ProfilCandidat {
        matricule: matricule.to_string(),
        prenom: prenom.to_string(),
        nom: nom.to_string(),
        pays_nationalite: pays.to_string(),
        pays_nationalite_europeen: europeen,
        langue_contact: "fr-be".to_string(),
        doit_payer_frais_dossier: doit_payer,
    }
}

pub fn profils() -> Vec<ProfilCandidat> {
    vec![
        profil(CANDIDAT_BELGE, "Jean", "Dupont", "BE", true, false),
        profil(CANDIDAT_ETRANGER, "Ana", "Silva", "BR", false, true),
        profil(CANDIDAT_SANS_DIPLOME, "Marie", "Lambert", "BE", true, false),
    ]
}

/// `(matricule, experience)` pairs; the 2010 one falls outside the checklist window.
pub fn experiences() -> Vec<(String, ExperienceParcours)> {
    let experience = |uuid: &str, type_experience, libelle: &str, annee| ExperienceParcours {
        uuid: uuid.to_string(),
        type_experience,
        libelle: libelle.to_string(),
        annee,
    };
    vec![
        (
            CANDIDAT_BELGE.to_string(),
            experience(
                EXPERIENCE_ACADEMIQUE,
                TypeExperience::Academique,
                "Bachelier en sciences",
                2022,
            ),
        ),
        (
            CANDIDAT_BELGE.to_string(),
            experience(
                EXPERIENCE_NON_ACADEMIQUE,
                TypeExperience::NonAcademique,
                "Assistant de recherche",
                2023,
            ),
        ),
        (
            CANDIDAT_BELGE.to_string(),
            experience("0001-stage-2010", TypeExperience::NonAcademique, "Stage", 2010),
        ),
        (
            CANDIDAT_ETRANGER.to_string(),
            experience("0002-academique-2021", TypeExperience::Academique, "Licenciatura", 2021),
        ),
    ]
}

pub fn personnes() -> Vec<PersonneConnue> {
    let personne = |matricule: &str, prenom: &str, nom: &str| PersonneConnue {
        matricule: matricule.to_string(),
        prenom: prenom.to_string(),
        nom: nom.to_string(),
        email: format!("{}@uclouvain.be", matricule),
        langue: "fr-be".to_string(),
    };
    vec![
        personne(PROMOTEUR_1, "Claire", "Martin"),
        personne(PROMOTEUR_2, "Paul", "Leroy"),
        personne(MEMBRE_CA_1, "Luc", "Renard"),
        personne(MEMBRE_CA_2, "Sophie", "Mertens"),
    ]
}

pub fn conditions() -> Vec<(String, AdmissionConditionsDTO)> {
    vec![
        (
            CANDIDAT_BELGE.to_string(),
            AdmissionConditionsDTO::avec(&[
                ConditionAcces::DiplomationSecondaireBelge,
                ConditionAcces::DiplomationAcademiqueBelge,
            ]),
        ),
        (
            CANDIDAT_ETRANGER.to_string(),
            AdmissionConditionsDTO::avec(&[ConditionAcces::DiplomationSecondaireEtranger]),
        ),
    ]
}
