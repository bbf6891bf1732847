// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # General Education Proposition Statuses
//!
//! ```text
//! EN_BROUILLON ─► FRAIS_DOSSIER_EN_ATTENTE ─► CONFIRMEE ─► TRAITEMENT_FAC ─► RETOUR_DE_FAC ─► INSCRIPTION_AUTORISEE
//!       │                                        ▲   │                                              │
//!       └────────────────────────────────────────┘   └─► A_COMPLETER_POUR_SIC                       ▼
//!                                                                                       INSCRIPTION_REFUSEE
//! ```

use crate::vocabulaire;

vocabulaire! {
    pub enum ChoixStatutPropositionGenerale {
        EnBrouillon => "EN_BROUILLON",
        FraisDossierEnAttente => "FRAIS_DOSSIER_EN_ATTENTE",
        Confirmee => "CONFIRMEE",
        Annulee => "ANNULEE",
        ACompleterPourSic => "A_COMPLETER_POUR_SIC",
        CompleteePourSic => "COMPLETEE_POUR_SIC",
        TraitementFac => "TRAITEMENT_FAC",
        ACompleterPourFac => "A_COMPLETER_POUR_FAC",
        CompleteePourFac => "COMPLETEE_POUR_FAC",
        RetourDeFac => "RETOUR_DE_FAC",
        AttenteValidationDirection => "ATTENTE_VALIDATION_DIRECTION",
        Cloturee => "CLOTUREE",
        InscriptionAutorisee => "INSCRIPTION_AUTORISEE",
        InscriptionRefusee => "INSCRIPTION_REFUSEE",
    }
}

use ChoixStatutPropositionGenerale::*;

type Statuts = &'static [ChoixStatutPropositionGenerale];

/// Handled by the faculty.
pub const STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_FAC: Statuts =
    &[TraitementFac, CompleteePourFac];

pub const STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_FAC_ETENDUS: Statuts =
    &[TraitementFac, CompleteePourFac, ACompleterPourFac];

/// Handled by the central enrolment office.
pub const STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_SIC: Statuts =
    &[Confirmee, CompleteePourSic, RetourDeFac, AttenteValidationDirection];

pub const STATUTS_PROPOSITION_GENERALE_ENVOYABLE_EN_FAC_POUR_DECISION: Statuts =
    &[Confirmee, CompleteePourSic, RetourDeFac];

pub const STATUTS_PROPOSITION_GENERALE_TERMINAUX: Statuts =
    &[Cloturee, InscriptionAutorisee, InscriptionRefusee, Annulee];

impl ChoixStatutPropositionGenerale {
    pub fn est_terminal(&self) -> bool {
        STATUTS_PROPOSITION_GENERALE_TERMINAUX.contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_wait_is_not_handled_by_offices() {
        assert!(!STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_SIC.contains(&FraisDossierEnAttente));
        assert!(!STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_FAC.contains(&FraisDossierEnAttente));
        assert_eq!(
            ChoixStatutPropositionGenerale::from_name("FRAIS_DOSSIER_EN_ATTENTE"),
            Some(FraisDossierEnAttente)
        );
    }
}
