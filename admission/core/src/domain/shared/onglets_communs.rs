// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Common Checklist Tabs
//!
//! Tab configurations reviewed identically by the doctorate and general
//! education contexts: personal data, assimilation, previous experience (and
//! one child per experience), financeability and the SIC decision.

use crate::domain::shared::checklist::{
    extra, ConfigurationOngletChecklist, ConfigurationStatutChecklist as Config, ExtraChecklist,
    StatutChecklist,
};
use crate::domain::shared::checklist::ChoixStatutChecklist::*;
use crate::domain::shared::decision::{
    BesoinDeDerogation, DerogationFinancement, EtatAuthentificationParcours,
};
use crate::domain::shared::profil::ExperienceParcours;

pub const DONNEES_PERSONNELLES: &str = "donnees_personnelles";
pub const ASSIMILATION: &str = "assimilation";
pub const PARCOURS_ANTERIEUR: &str = "parcours_anterieur";
pub const EXPERIENCES_PARCOURS_ANTERIEUR: &str = "experiences_parcours_anterieur";
pub const FINANCABILITE: &str = "financabilite";
pub const CHOIX_FORMATION: &str = "choix_formation";
pub const DECISION_SIC: &str = "decision_sic";

/// Extra key holding an experience authentication state.
pub const CLE_ETAT_AUTHENTIFICATION: &str = "etat_authentification";

pub fn donnees_personnelles() -> ConfigurationOngletChecklist {
    ConfigurationOngletChecklist::new(
        DONNEES_PERSONNELLES,
        vec![
            Config::new("A_TRAITER", "To be processed", InitialCandidat),
            Config::new(
                "A_COMPLETER",
                "To be completed",
                GestBlocage,
            )
            .avec_extra(extra([("fraud", "0")])),
            Config::new("FRAUDEUR", "Fraudster", GestBlocage).avec_extra(extra([("fraud", "1")])),
            Config::new("VALIDEES", "Validated", GestReussite),
        ],
    )
}

pub fn assimilation() -> ConfigurationOngletChecklist {
    ConfigurationOngletChecklist::new(
        ASSIMILATION,
        vec![
            Config::new("NON_CONCERNE", "Not concerned", InitialNonConcerne),
            Config::new("DECLARE_ASSIMILE_OU_PAS", "Declared assimilated or not", InitialCandidat),
            Config::new("A_COMPLETER", "To be completed", GestBlocage),
            Config::new("AVIS_EXPERT", "Expert opinion", GestEnCours),
            Config::new(
                "A_COMPLETER_APRES_INSCRIPTION",
                "To be completed after application",
                GestBlocageUlterieur,
            ),
            Config::new("VALIDEE", "Validated", GestReussite),
        ],
    )
}

pub fn parcours_anterieur() -> ConfigurationOngletChecklist {
    ConfigurationOngletChecklist::new(
        PARCOURS_ANTERIEUR,
        vec![
            Config::new("A_TRAITER", "To be processed", InitialCandidat),
            Config::new("TOILETTE", "Cleaned", GestEnCours),
            Config::new("INSUFFISANT", "Insufficient", GestBlocage),
            Config::new("SUFFISANT", "Sufficient", GestReussite),
        ],
    )
}

pub fn experiences_parcours_anterieur() -> ConfigurationOngletChecklist {
    let mut statuts = vec![
        Config::new("A_TRAITER", "To be processed", InitialCandidat),
        Config::new("A_COMPLETER", "To be completed", GestBlocage),
        Config::new("AUTHENTIFICATION", "Authentication", GestEnCours)
            .avec_extra(extra([("authentification", "1")])),
    ];
    statuts.extend(EtatAuthentificationParcours::ALL.iter().map(|etat| {
        Config::sous_statut(
            "AUTHENTIFICATION",
            etat.name(),
            etat.libelle(),
            extra([(CLE_ETAT_AUTHENTIFICATION, etat.name())]),
        )
    }));
    statuts.extend([
        Config::new(
            "AVIS_EXPERT",
            "Expert opinion",
            GestEnCours,
        )
        .avec_extra(extra([("authentification", "0")])),
        Config::new(
            "A_COMPLETER_APRES_INSCRIPTION",
            "To be completed after application",
            GestBlocageUlterieur,
        ),
        Config::new("VALIDEE", "Validated", GestReussite),
    ]);
    ConfigurationOngletChecklist::new(EXPERIENCES_PARCOURS_ANTERIEUR, statuts)
}

pub fn financabilite() -> ConfigurationOngletChecklist {
    let mut statuts = vec![
        Config::new("NON_CONCERNE", "Not concerned", InitialNonConcerne),
        Config::new("A_TRAITER", "To be processed", InitialCandidat),
        Config::new(
            "AVIS_EXPERT",
            "Expert opinion",
            GestEnCours,
        )
        .avec_extra(extra([("en_cours", "expert")])),
        Config::new("BESOIN_DEROGATION", "Derogation needed", GestEnCours)
            .avec_extra(extra([("en_cours", "derogation")])),
    ];
    statuts.extend(DerogationFinancement::ALL.iter().map(|derogation| {
        Config::sous_statut(
            "BESOIN_DEROGATION",
            derogation.name(),
            derogation.libelle(),
            extra([("derogation", derogation.name())]),
        )
    }));
    statuts.extend([
        Config::new(
            "A_COMPLETER",
            "To be completed",
            GestBlocage,
        )
        .avec_extra(extra([("to_be_completed", "1")])),
        Config::new("NON_FINANCABLE", "Not financeable", GestBlocage)
            .avec_extra(extra([("to_be_completed", "0")])),
        Config::new("DEROGATION_ACCORDEE", "Derogation granted", GestReussite)
            .avec_extra(extra([("reussite", "derogation")])),
        Config::new(
            "FINANCABLE",
            "Financeable",
            GestReussite,
        )
        .avec_extra(extra([("reussite", "financable")])),
    ]);
    ConfigurationOngletChecklist::new(FINANCABILITE, statuts)
}

pub fn choix_formation() -> ConfigurationOngletChecklist {
    ConfigurationOngletChecklist::new(
        CHOIX_FORMATION,
        vec![
            Config::new("A_TRAITER", "To be processed", InitialCandidat),
            Config::new("VALIDE", "Validated", GestReussite),
        ],
    )
}

pub fn decision_sic() -> ConfigurationOngletChecklist {
    let mut statuts = vec![
        Config::new("A_TRAITER", "To be processed", InitialCandidat),
        Config::new("A_COMPLETER", "To be completed", GestBlocage)
            .avec_extra(extra([("blocage", "to_be_completed")])),
        Config::new("BESOIN_DEROGATION", "Derogation needed", GestEnCours)
            .avec_extra(extra([("en_cours", "derogation")])),
    ];
    statuts.extend(BesoinDeDerogation::ALL.iter().map(|besoin| {
        Config::sous_statut(
            "BESOIN_DEROGATION",
            besoin.name(),
            besoin.libelle(),
            extra([("derogation", besoin.name())]),
        )
    }));
    statuts.extend([
        Config::new("REFUS_A_VALIDER", "Refusal to validate", GestEnCours)
            .avec_extra(extra([("en_cours", "refusal")])),
        Config::new("AUTORISATION_A_VALIDER", "Authorization to validate", GestEnCours)
            .avec_extra(extra([("en_cours", "approval")])),
        Config::new("CLOTURE", "Closed", GestBlocage).avec_extra(extra([("blocage", "closed")])),
        Config::new("REFUSE", "Refused", GestBlocage).avec_extra(extra([("blocage", "refusal")])),
        Config::new("AUTORISE", "Authorized", GestReussite),
    ]);
    ConfigurationOngletChecklist::new(DECISION_SIC, statuts)
}

/// One child per experience of the last [`ANNEES_PARCOURS_ANTERIEUR`] years,
/// in the "to be processed" configuration.
///
/// [`ANNEES_PARCOURS_ANTERIEUR`]: crate::domain::shared::profil::ANNEES_PARCOURS_ANTERIEUR
pub fn enfants_experiences(
    onglet_experiences: &ConfigurationOngletChecklist,
    experiences: &[ExperienceParcours],
    annee_minimale: u32,
) -> Vec<StatutChecklist> {
    let Some(a_traiter) = onglet_experiences.configuration("A_TRAITER") else {
        return Vec::new();
    };
    experiences
        .iter()
        .filter(|experience| experience.annee >= annee_minimale)
        .map(|experience| StatutChecklist::enfant(&experience.uuid, a_traiter))
        .collect()
}

/// Authentication state stored on an experience child, when set.
pub fn etat_authentification(enfant: &StatutChecklist) -> Option<EtatAuthentificationParcours> {
    let valeur = enfant.extra.get(CLE_ETAT_AUTHENTIFICATION)?;
    EtatAuthentificationParcours::ALL
        .into_iter()
        .find(|etat| etat.name() == valeur)
}

/// Extra of a child put in a given authentication state.
pub fn extra_authentification(etat: EtatAuthentificationParcours) -> ExtraChecklist {
    extra([("authentification", "1"), (CLE_ETAT_AUTHENTIFICATION, etat.name())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::profil::TypeExperience;

    #[test]
    fn test_sic_derogation_children_resolve_to_parent_first() {
        let onglet = decision_sic();
        let besoin = onglet.configuration("BESOIN_DEROGATION").unwrap();
        let accord = onglet.configuration("BESOIN_DEROGATION.ACCORD_DIRECTION").unwrap();
        let fusion = besoin.merge_statuses(accord);

        assert_eq!(fusion.statut, Some(GestEnCours));
        assert_eq!(
            onglet.get_status(fusion.statut, Some(&fusion.extra)).unwrap().identifiant,
            "BESOIN_DEROGATION"
        );
        assert_eq!(onglet.sous_statuts("BESOIN_DEROGATION").count(), 4);
    }

    #[test]
    fn test_experience_children_filtered_by_year() {
        let experiences = vec![
            ExperienceParcours {
                uuid: "a".into(),
                type_experience: TypeExperience::Academique,
                libelle: "Bachelor".into(),
                annee: 2019,
            },
            ExperienceParcours {
                uuid: "b".into(),
                type_experience: TypeExperience::NonAcademique,
                libelle: "Job".into(),
                annee: 2023,
            },
        ];
        let enfants = enfants_experiences(&experiences_parcours_anterieur(), &experiences, 2020);

        assert_eq!(enfants.len(), 1);
        assert_eq!(enfants[0].identifiant(), Some("b"));
        assert_eq!(enfants[0].statut, Some(InitialCandidat));
    }

    #[test]
    fn test_authentication_extra_matches_authentication_config() {
        let onglet = experiences_parcours_anterieur();
        let extra = extra_authentification(EtatAuthentificationParcours::Vrai);

        let config = onglet.get_status(Some(GestEnCours), Some(&extra)).unwrap();
        assert_eq!(config.identifiant, "AUTHENTIFICATION");

        let mut enfant = StatutChecklist::enfant("x", config);
        enfant.extra.extend(extra);
        assert_eq!(etat_authentification(&enfant), Some(EtatAuthentificationParcours::Vrai));
    }
}
