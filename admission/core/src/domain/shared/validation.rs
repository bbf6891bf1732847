// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Business Validators
//!
//! A command's preconditions are expressed as a list of small validators, each
//! checking a single rule and failing with one [`BusinessException`].
//!
//! [`BusinessValidatorList::validate`] runs two phases:
//!
//! 1. **data contract** validators (shape of the input); if any fail, every
//!    failure of this phase is returned and the invariants are not evaluated;
//! 2. **invariant** validators (business rules); every validator runs and all
//!    failures are reported together, in declaration order.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer (shared kernel)

use crate::domain::shared::checklist::{
    ChoixStatutChecklist, ConfigurationStatutChecklist, StatutChecklist,
};
use crate::domain::shared::decision::{InformationsAcceptation, MotifsRefus};
use crate::domain::shared::exceptions::{BusinessException, MultipleBusinessExceptions};
use crate::domain::shared::titres_acces::{ConditionAcces, TitreAccesSelectionnable};
use tracing::debug;

pub trait BusinessValidator {
    fn validate(&self) -> Result<(), BusinessException>;
}

/// Boxed validator borrowing the data it checks.
pub type Validator<'a> = Box<dyn BusinessValidator + 'a>;

/// Validator built from a closure, for one-off rules.
pub struct Regle<F>(pub F);

impl<F> BusinessValidator for Regle<F>
where
    F: Fn() -> Result<(), BusinessException>,
{
    fn validate(&self) -> Result<(), BusinessException> {
        (self.0)()
    }
}

/// Fails with `exception` when `condition` does not hold.
pub fn exiger(condition: bool, exception: BusinessException) -> Result<(), BusinessException> {
    if condition {
        Ok(())
    } else {
        Err(exception)
    }
}

/// Status whitelist: fails with `exception` when `statut` is not allowed.
pub struct ShouldStatutEtreDans<'a, S> {
    pub statut: &'a S,
    pub autorises: &'a [S],
    pub exception: BusinessException,
}

impl<S: PartialEq> BusinessValidator for ShouldStatutEtreDans<'_, S> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(self.autorises.contains(self.statut), self.exception.clone())
    }
}

/// Runs a lone status whitelist as a validator list.
pub fn valider_statut<S: PartialEq>(
    statut: &S,
    autorises: &[S],
    exception: BusinessException,
) -> Result<(), MultipleBusinessExceptions> {
    ShouldStatutEtreDans {
        statut,
        autorises,
        exception,
    }
    .validate()
    .map_err(MultipleBusinessExceptions::from)
}

/// Checklist precondition: the node must match one of the configurations.
pub struct ShouldChecklistEtreDans<'a> {
    pub noeud: &'a StatutChecklist,
    pub configurations: Vec<&'a ConfigurationStatutChecklist>,
    pub exception: BusinessException,
}

impl BusinessValidator for ShouldChecklistEtreDans<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.configurations
                .iter()
                .any(|config| self.noeud.correspond_a(config)),
            self.exception.clone(),
        )
    }
}

/// At least one access title must be selected.
pub struct ShouldTitreAccesEtreSelectionne<'a> {
    pub titres: &'a [TitreAccesSelectionnable],
    pub exception: BusinessException,
}

impl BusinessValidator for ShouldTitreAccesEtreSelectionne<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.titres.iter().any(|titre| titre.selectionne),
            self.exception.clone(),
        )
    }
}

pub struct ShouldMaximumPropositionsNonAtteint {
    pub nombre_propositions_en_cours: usize,
    pub maximum_propositions: usize,
}

impl BusinessValidator for ShouldMaximumPropositionsNonAtteint {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.nombre_propositions_en_cours < self.maximum_propositions,
            BusinessException::MaximumPropositionsAtteint {
                maximum: self.maximum_propositions,
            },
        )
    }
}

pub struct ShouldMotifsRefusEtreSpecifies<'a> {
    pub motifs: &'a MotifsRefus,
    pub exception: BusinessException,
}

impl BusinessValidator for ShouldMotifsRefusEtreSpecifies<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(!self.motifs.est_vide(), self.exception.clone())
    }
}

pub struct ShouldInformationsAcceptationEtreCompletes<'a> {
    pub informations: Option<&'a InformationsAcceptation>,
    pub exception: BusinessException,
}

impl BusinessValidator for ShouldInformationsAcceptationEtreCompletes<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.informations
                .map(InformationsAcceptation::est_complete)
                .unwrap_or(false),
            self.exception.clone(),
        )
    }
}

/// Every experience child must be validated (the only successful
/// configuration of the experience tab).
pub struct ShouldExperiencesEtreValidees<'a> {
    pub parcours_anterieur: &'a StatutChecklist,
}

impl BusinessValidator for ShouldExperiencesEtreValidees<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.parcours_anterieur
                .enfants
                .iter()
                .all(|enfant| enfant.statut == Some(ChoixStatutChecklist::GestReussite)),
            BusinessException::StatutsChecklistExperiencesEtreValides,
        )
    }
}

pub struct ShouldConditionAccesEtreSelectionnee {
    pub condition_acces: Option<ConditionAcces>,
    pub millesime_condition_acces: Option<u32>,
}

impl BusinessValidator for ShouldConditionAccesEtreSelectionnee {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.condition_acces.is_some() && self.millesime_condition_acces.is_some(),
            BusinessException::ConditionAccesEtreSelectionne,
        )
    }
}

pub trait BusinessValidatorList {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        Vec::new()
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>>;

    fn validate(&self) -> Result<(), MultipleBusinessExceptions> {
        let contrat = collecter(self.data_contract_validators());
        if !contrat.is_empty() {
            debug!(count = contrat.len(), "data contract validation failed");
            return Err(MultipleBusinessExceptions::new(contrat));
        }

        let invariants = collecter(self.invariants_validators());
        if invariants.is_empty() {
            Ok(())
        } else {
            debug!(
                codes = ?invariants.iter().map(BusinessException::status_code).collect::<Vec<_>>(),
                "invariant validation failed"
            );
            Err(MultipleBusinessExceptions::new(invariants))
        }
    }
}

fn collecter(validators: Vec<Validator<'_>>) -> Vec<BusinessException> {
    validators
        .iter()
        .filter_map(|validator| validator.validate().err())
        .collect()
}

/// Previous-experience tab change. Only the move to a successful status is
/// guarded.
pub struct ModifierStatutChecklistParcoursAnterieurValidatorList<'a> {
    pub parcours_anterieur: &'a StatutChecklist,
    pub statut_cible: Option<ChoixStatutChecklist>,
    pub titres_acces: &'a [TitreAccesSelectionnable],
    pub condition_acces: Option<ConditionAcces>,
    pub millesime_condition_acces: Option<u32>,
}

impl BusinessValidatorList for ModifierStatutChecklistParcoursAnterieurValidatorList<'_> {
    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        if self.statut_cible != Some(ChoixStatutChecklist::GestReussite) {
            return Vec::new();
        }
        vec![
            Box::new(ShouldExperiencesEtreValidees {
                parcours_anterieur: self.parcours_anterieur,
            }),
            Box::new(ShouldTitreAccesEtreSelectionne {
                titres: self.titres_acces,
                exception: BusinessException::TitreAccesEtreSelectionne,
            }),
            Box::new(ShouldConditionAccesEtreSelectionnee {
                condition_acces: self.condition_acces,
                millesime_condition_acces: self.millesime_condition_acces,
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Liste<'a> {
        contrat_ok: bool,
        appels: &'a Cell<u32>,
    }

    impl BusinessValidatorList for Liste<'_> {
        fn data_contract_validators(&self) -> Vec<Validator<'_>> {
            vec![Box::new(Regle(move || {
                exiger(self.contrat_ok, BusinessException::JustificationRequise)
            }))]
        }

        fn invariants_validators(&self) -> Vec<Validator<'_>> {
            vec![
                Box::new(Regle(move || {
                    self.appels.set(self.appels.get() + 1);
                    Err(BusinessException::PromoteurManquant)
                })),
                Box::new(Regle(|| Ok(()))),
                Box::new(Regle(move || {
                    self.appels.set(self.appels.get() + 1);
                    Err(BusinessException::MembreCAManquant)
                })),
            ]
        }
    }

    #[test]
    fn test_invariants_all_collected_in_order() {
        let appels = Cell::new(0);
        let liste = Liste {
            contrat_ok: true,
            appels: &appels,
        };

        let erreur = liste.validate().unwrap_err();
        assert_eq!(
            erreur.exceptions,
            vec![
                BusinessException::PromoteurManquant,
                BusinessException::MembreCAManquant
            ]
        );
        assert_eq!(appels.get(), 2);
    }

    #[test]
    fn test_contract_failure_stops_before_invariants() {
        let appels = Cell::new(0);
        let liste = Liste {
            contrat_ok: false,
            appels: &appels,
        };

        let erreur = liste.validate().unwrap_err();
        assert_eq!(erreur.exceptions, vec![BusinessException::JustificationRequise]);
        assert_eq!(appels.get(), 0);
    }

    #[test]
    fn test_parcours_rules_only_for_sufficient() {
        let mut parcours = StatutChecklist::new(
            "To be processed",
            ChoixStatutChecklist::InitialCandidat,
        );
        parcours
            .enfants
            .push(StatutChecklist::new("To be processed", ChoixStatutChecklist::InitialCandidat));

        let liste = ModifierStatutChecklistParcoursAnterieurValidatorList {
            parcours_anterieur: &parcours,
            statut_cible: Some(ChoixStatutChecklist::GestBlocage),
            titres_acces: &[],
            condition_acces: None,
            millesime_condition_acces: None,
        };
        assert!(liste.validate().is_ok());

        let liste = ModifierStatutChecklistParcoursAnterieurValidatorList {
            statut_cible: Some(ChoixStatutChecklist::GestReussite),
            condition_acces: Some(ConditionAcces::DiplomationAcademiqueBelge),
            ..liste
        };
        assert_eq!(
            liste.validate().unwrap_err().exceptions,
            vec![
                BusinessException::StatutsChecklistExperiencesEtreValides,
                BusinessException::TitreAccesEtreSelectionne,
                BusinessException::ConditionAccesEtreSelectionne,
            ]
        );
    }
}
