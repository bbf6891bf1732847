// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Continuing Education Proposition Statuses

use crate::vocabulaire;

vocabulaire! {
    pub enum ChoixStatutPropositionContinue {
        EnBrouillon => "EN_BROUILLON",
        Confirmee => "CONFIRMEE",
        EnAttente => "EN_ATTENTE",
        ACompleterPourFac => "A_COMPLETER_POUR_FAC",
        CompleteePourFac => "COMPLETEE_POUR_FAC",
        Annulee => "ANNULEE",
        InscriptionRefusee => "INSCRIPTION_REFUSEE",
        InscriptionAutorisee => "INSCRIPTION_AUTORISEE",
        Cloturee => "CLOTUREE",
    }
}

use ChoixStatutPropositionContinue::*;

type Statuts = &'static [ChoixStatutPropositionContinue];

/// Statuses in which the faculty manager may act on the proposition.
pub const STATUTS_PROPOSITION_CONTINUE_SOUMISE_POUR_GESTIONNAIRE: Statuts =
    &[Confirmee, EnAttente, ACompleterPourFac, CompleteePourFac];

pub const STATUTS_PROPOSITION_CONTINUE_TERMINAUX: Statuts =
    &[Annulee, InscriptionRefusee, InscriptionAutorisee, Cloturee];

impl ChoixStatutPropositionContinue {
    pub fn est_terminal(&self) -> bool {
        STATUTS_PROPOSITION_CONTINUE_TERMINAUX.contains(self)
    }
}
