// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # General Education Business Rules
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer

use crate::domain::formation_generale::checklist::{catalogue, DECISION_FACULTAIRE};
use crate::domain::formation_generale::statuts::*;
use crate::domain::shared::checklist::{ChoixStatutChecklist, StatutChecklist};
use crate::domain::shared::decision::{InformationsAcceptation, MotifsRefus};
use crate::domain::shared::exceptions::BusinessException;
use crate::domain::shared::titres_acces::{ConditionAcces, TitreAccesSelectionnable};
use crate::domain::shared::validation::{
    exiger, BusinessValidator, BusinessValidatorList, Regle,
    ShouldInformationsAcceptationEtreCompletes,
    ShouldMaximumPropositionsNonAtteint, ShouldMotifsRefusEtreSpecifies, ShouldStatutEtreDans,
    ShouldTitreAccesEtreSelectionne, Validator,
};

fn statut_fac(statut: &ChoixStatutPropositionGenerale) -> Validator<'_> {
    Box::new(ShouldStatutEtreDans {
        statut,
        autorises: STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_FAC,
        exception: BusinessException::SituationPropositionNonFAC,
    })
}

fn statut_sic(statut: &ChoixStatutPropositionGenerale) -> Validator<'_> {
    Box::new(ShouldStatutEtreDans {
        statut,
        autorises: STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_SIC,
        exception: BusinessException::SituationPropositionNonSIC,
    })
}

fn titre_selectionne(titres: &[TitreAccesSelectionnable]) -> Validator<'_> {
    Box::new(ShouldTitreAccesEtreSelectionne {
        titres,
        exception: BusinessException::TitreAccesEtreSelectionnePourEnvoyerASIC,
    })
}

/// The faculty decision must still be open to send the file back to SIC.
pub struct ShouldDecisionFacultairePermettreEnvoiAuSic<'a> {
    pub decision_facultaire: &'a StatutChecklist,
}

impl BusinessValidator for ShouldDecisionFacultairePermettreEnvoiAuSic<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        let statut_ok = matches!(
            self.decision_facultaire.statut,
            Some(ChoixStatutChecklist::InitialCandidat)
                | Some(ChoixStatutChecklist::GestEnCours)
                | Some(ChoixStatutChecklist::GestBlocage)
        );
        let en_decision = self.decision_facultaire.extra.get("decision").map(
            String::as_str,
        ) == Some("EN_DECISION");
        exiger(statut_ok && !en_decision, BusinessException::SituationPropositionNonFAC)
    }
}

pub struct InitierPropositionValidatorList {
    pub nombre_propositions_en_cours: usize,
    pub maximum_propositions: usize,
}

impl BusinessValidatorList for InitierPropositionValidatorList {
    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldMaximumPropositionsNonAtteint {
            nombre_propositions_en_cours: self.nombre_propositions_en_cours,
            maximum_propositions: self.maximum_propositions,
        })]
    }
}

pub struct EnvoyerAuSicLorsDeLaDecisionFacultaireValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionGenerale,
    pub decision_facultaire: &'a StatutChecklist,
}

impl BusinessValidatorList for EnvoyerAuSicLorsDeLaDecisionFacultaireValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_fac(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldDecisionFacultairePermettreEnvoiAuSic {
            decision_facultaire: self.decision_facultaire,
        })]
    }
}

pub struct RefuserParFacValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionGenerale,
    pub motifs: &'a MotifsRefus,
}

impl BusinessValidatorList for RefuserParFacValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_fac(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldMotifsRefusEtreSpecifies {
            motifs: self.motifs,
            exception: BusinessException::MotifRefusFacultaireNonSpecifie,
        })]
    }
}

pub struct ApprouverParFacValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionGenerale,
    pub titres_acces: &'a [TitreAccesSelectionnable],
    pub informations: &'a InformationsAcceptation,
}

impl BusinessValidatorList for ApprouverParFacValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_fac(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![
            titre_selectionne(self.titres_acces),
            Box::new(ShouldInformationsAcceptationEtreCompletes {
                informations: Some(self.informations),
                exception: BusinessException::InformationsAcceptationFacultaireNonSpecifiees,
            }),
        ]
    }
}

/// External reorientation approval needs a reorientation request with an
/// access condition already chosen.
pub struct ApprouverReorientationExterneParFacValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionGenerale,
    pub est_reorientation_inscription_externe: Option<bool>,
    pub condition_acces: Option<ConditionAcces>,
    pub titres_acces: &'a [TitreAccesSelectionnable],
}

impl BusinessValidatorList for ApprouverReorientationExterneParFacValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_fac(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![
            Box::new(Regle(move || {
                exiger(
                    self.est_reorientation_inscription_externe == Some(
                        true,
                    ) && self.condition_acces.is_some(),
                    BusinessException::ReorientationExterneAvecConditionAcces,
                )
            })),
            titre_selectionne(self.titres_acces),
        ]
    }
}

pub struct ApprouverAdmissionParSicValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionGenerale,
    pub parcours_anterieur_suffisant: bool,
    pub titres_acces: &'a [TitreAccesSelectionnable],
}

impl BusinessValidatorList for ApprouverAdmissionParSicValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_sic(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![
            Box::new(Regle(move || {
                exiger(
                    self.parcours_anterieur_suffisant,
                    BusinessException::ParcoursAnterieurNonSuffisant,
                )
            })),
            titre_selectionne(self.titres_acces),
        ]
    }
}

pub struct RefuserAdmissionParSicValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionGenerale,
    pub motifs: &'a MotifsRefus,
}

impl BusinessValidatorList for RefuserAdmissionParSicValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_sic(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldMotifsRefusEtreSpecifies {
            motifs: self.motifs,
            exception: BusinessException::MotifRefusNonSpecifie,
        })]
    }
}

/// Fees paid online, at submission or later, cannot be waived anymore.
pub struct SpecifierPaiementPlusNecessaireValidatorList<'a> {
    pub frais_dossier_initial: Option<&'a StatutChecklist>,
    pub frais_dossier_actuel: &'a StatutChecklist,
}

impl BusinessValidatorList for SpecifierPaiementPlusNecessaireValidatorList<'_> {
    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(Regle(move || {
            let paye = |noeud: &StatutChecklist| noeud.statut == Some(
                ChoixStatutChecklist::SystReussite,
            );
            exiger(
                !paye(
                    self.frais_dossier_actuel,
                ) && !self.frais_dossier_initial.map(paye).unwrap_or(false),
                BusinessException::PropositionPourPaiementInvalide,
            )
        }))]
    }
}

/// Whether the faculty decision tab is in configuration `identifiant`.
pub fn decision_facultaire_est(noeud: &StatutChecklist, identifiant: &str) -> bool {
    catalogue()
        .configuration(DECISION_FACULTAIRE, identifiant)
        .map(|config| noeud.correspond_a(config))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refused_faculty_decision_cannot_go_back_to_sic() {
        let mut noeud = StatutChecklist::new(
            "To be processed",
            ChoixStatutChecklist::InitialCandidat,
        );
        let liste = EnvoyerAuSicLorsDeLaDecisionFacultaireValidatorList {
            statut: &ChoixStatutPropositionGenerale::TraitementFac,
            decision_facultaire: &noeud,
        };
        assert!(liste.validate().is_ok());

        let refus = catalogue().configuration(DECISION_FACULTAIRE, "REFUS").unwrap();
        noeud.appliquer(refus);
        assert!(decision_facultaire_est(&noeud, "REFUS"));
        let erreur = EnvoyerAuSicLorsDeLaDecisionFacultaireValidatorList {
            statut: &ChoixStatutPropositionGenerale::TraitementFac,
            decision_facultaire: &noeud,
        }
        .validate()
        .unwrap_err();
        assert_eq!(erreur.exceptions, vec![BusinessException::SituationPropositionNonFAC]);
    }

    #[test]
    fn test_reorientation_requires_condition_and_title() {
        let erreur = ApprouverReorientationExterneParFacValidatorList {
            statut: &ChoixStatutPropositionGenerale::CompleteePourFac,
            est_reorientation_inscription_externe: Some(true),
            condition_acces: None,
            titres_acces: &[],
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            erreur.status_codes(),
            vec!["FORMATION-GENERALE-4", "PROPOSITION-56"]
        );
    }
}
