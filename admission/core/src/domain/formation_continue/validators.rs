// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Continuing Education Business Rules
//!
//! Each staff decision is allowed from a fixed set of decision-tab
//! configurations; leaving any other configuration raises the action's
//! transition exception.

use crate::domain::formation_continue::checklist::{catalogue, DECISION};
use crate::domain::formation_continue::statuts::*;
use crate::domain::shared::checklist::StatutChecklist;
use crate::domain::shared::exceptions::BusinessException;
use crate::domain::shared::validation::{
    exiger, BusinessValidator, BusinessValidatorList, Regle, ShouldMaximumPropositionsNonAtteint,
    ShouldStatutEtreDans,
    Validator,
};
use serde::{Deserialize, Serialize};

/// Reason given by a manager for a hold, a refusal or a cancellation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motif {
    #[serde(default)]
    pub motif: String,
    #[serde(default)]
    pub autre_motif: String,
}

impl Motif {
    pub fn est_specifie(&self) -> bool {
        !self.motif.trim().is_empty() || !self.autre_motif.trim().is_empty()
    }
}

/// Staff decision on a continuing education proposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionDecision {
    PrendreEnCharge,
    MettreEnAttente,
    ApprouverParFac,
    MettreAValider,
    Refuser,
    Annuler,
    Valider,
    Cloturer,
}

impl ActionDecision {
    /// Decision configurations the action may start from.
    pub fn depuis(&self) -> &'static [&'static str] {
        const REFUSABLE: &[&str] = &[
            "A_TRAITER",
            "PRISE_EN_CHARGE",
            "EN_ATTENTE",
            "FAC_VALIDE",
            "A_VALIDER",
        ];
        match self {
            Self::PrendreEnCharge => &["A_TRAITER"],
            Self::MettreEnAttente => &["A_TRAITER", "PRISE_EN_CHARGE", "FAC_VALIDE"],
            Self::ApprouverParFac => &["A_TRAITER", "PRISE_EN_CHARGE", "EN_ATTENTE"],
            Self::MettreAValider => &["FAC_VALIDE"],
            Self::Refuser | Self::Annuler => REFUSABLE,
            Self::Valider => &["A_VALIDER"],
            Self::Cloturer => &[
                "A_TRAITER",
                "PRISE_EN_CHARGE",
                "A_VALIDER",
                "EN_ATTENTE",
                "FAC_VALIDE",
                "REFUSE",
                "ANNULEE",
                "VALIDE",
            ],
        }
    }

    /// Decision configuration reached by the action.
    pub fn cible(&self) -> &'static str {
        match self {
            Self::PrendreEnCharge => "PRISE_EN_CHARGE",
            Self::MettreEnAttente => "EN_ATTENTE",
            Self::ApprouverParFac => "FAC_VALIDE",
            Self::MettreAValider => "A_VALIDER",
            Self::Refuser => "REFUSE",
            Self::Annuler => "ANNULEE",
            Self::Valider => "VALIDE",
            Self::Cloturer => "CLOTURE",
        }
    }

    pub fn exception(&self) -> BusinessException {
        match self {
            Self::PrendreEnCharge => BusinessException::PrendreEnChargeTransitionStatut,
            Self::MettreEnAttente => BusinessException::MettreEnAttenteTransitionStatut,
            Self::ApprouverParFac => BusinessException::ApprouverParFacTransitionStatut,
            Self::MettreAValider => BusinessException::MettreAValiderTransitionStatut,
            Self::Refuser => BusinessException::RefuserPropositionTransitionStatut,
            Self::Annuler => BusinessException::AnnulerPropositionTransitionStatut,
            Self::Valider => BusinessException::ValiderPropositionTransitionStatut,
            Self::Cloturer => BusinessException::CloturerPropositionTransitionStatut,
        }
    }

    pub fn exige_motif(&self) -> bool {
        matches!(self, Self::MettreEnAttente | Self::Refuser | Self::Annuler)
    }
}

/// The decision tab must be in one of the configurations the action starts from.
pub struct ShouldDecisionPermettreTransition<'a> {
    pub decision: &'a StatutChecklist,
    pub action: ActionDecision,
}

impl BusinessValidator for ShouldDecisionPermettreTransition<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        let autorisee = self.action.depuis().iter().any(|identifiant| {
            catalogue()
                .configuration(DECISION, identifiant)
                .map(|config| self.decision.correspond_a(config))
                .unwrap_or(false)
        });
        exiger(autorisee, self.action.exception())
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

pub struct DecisionGestionnaireValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionContinue,
    pub decision: &'a StatutChecklist,
    pub action: ActionDecision,
    pub motif: Option<&'a Motif>,
}

impl BusinessValidatorList for DecisionGestionnaireValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldStatutEtreDans {
            statut: self.statut,
            autorises: STATUTS_PROPOSITION_CONTINUE_SOUMISE_POUR_GESTIONNAIRE,
            exception: BusinessException::SituationPropositionNonFAC,
        })]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        let mut validators: Vec<Validator<'_>> = vec![Box::new(ShouldDecisionPermettreTransition {
            decision: self.decision,
            action: self.action,
        })];
        if self.action.exige_motif() {
            validators.push(Box::new(Regle(move || {
                exiger(
                    self.motif.map(Motif::est_specifie).unwrap_or(false),
                    BusinessException::MotifNonSpecifie,
                )
            })));
        }
        validators
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::formation_continue::checklist::{configuration, OngletsChecklistContinue};

    fn decision(identifiant: &str) -> StatutChecklist {
        StatutChecklist::depuis_configuration(
            configuration(OngletsChecklistContinue::Decision, identifiant).unwrap(),
        )
    }

    #[test]
    fn test_closure_allowed_from_everything_but_closure() {
        for identifiant in ActionDecision::Cloturer.depuis() {
            assert!(ShouldDecisionPermettreTransition {
                decision: &decision(identifiant),
                action: ActionDecision::Cloturer,
            }
            .validate()
            .is_ok());
        }
        assert_eq!(
            ShouldDecisionPermettreTransition {
                decision: &decision("CLOTURE"),
                action: ActionDecision::Cloturer,
            }
            .validate(),
            Err(BusinessException::CloturerPropositionTransitionStatut)
        );
    }

    #[test]
    fn test_hold_requires_reason_and_allowed_source() {
        let noeud = decision("A_VALIDER");
        let erreur = DecisionGestionnaireValidatorList {
            statut: &ChoixStatutPropositionContinue::Confirmee,
            decision: &noeud,
            action: ActionDecision::MettreEnAttente,
            motif: Some(&Motif::default()),
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            erreur.exceptions,
            vec![
                BusinessException::MettreEnAttenteTransitionStatut,
                BusinessException::MotifNonSpecifie
            ]
        );
    }

    #[test]
    fn test_draft_is_not_handled_by_manager() {
        let noeud = decision("A_TRAITER");
        let erreur = DecisionGestionnaireValidatorList {
            statut: &ChoixStatutPropositionContinue::EnBrouillon,
            decision: &noeud,
            action: ActionDecision::PrendreEnCharge,
            motif: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(erreur.status_codes(), vec!["FORMATION-GENERALE-1"]);
    }
}
