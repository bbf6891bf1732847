// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Doctorate Proposition Statuses
//!
//! Primary status vocabulary of a doctorate proposition and the named status
//! sets used as whitelists by the decision commands.
//!
//! ```text
//! EN_BROUILLON ─► EN_ATTENTE_DE_SIGNATURE ─► CONFIRMEE ─► TRAITEMENT_FAC ─► RETOUR_DE_FAC ─► INSCRIPTION_AUTORISEE
//!                                                 │            │  ▲                │
//!                                                 ▼            ▼  │                ▼
//!                                     A_COMPLETER_POUR_SIC  A_COMPLETER_POUR_FAC  ATTENTE_VALIDATION_DIRECTION
//! ```

use crate::vocabulaire;

vocabulaire! {
    pub enum ChoixStatutPropositionDoctorale {
        EnBrouillon => "EN_BROUILLON",
        EnAttenteDeSignature => "EN_ATTENTE_DE_SIGNATURE",
        CaEnAttenteDeSignature => "CA_EN_ATTENTE_DE_SIGNATURE",
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

use ChoixStatutPropositionDoctorale::*;

type Statuts = &'static [ChoixStatutPropositionDoctorale];

/// Handled by the doctoral committee.
pub const STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_CDD: Statuts =
    &[TraitementFac, CompleteePourFac];

/// Handled by the doctoral committee, including while waiting for documents.
pub const STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_CDD_ETENDUS: Statuts =
    &[TraitementFac, CompleteePourFac, ACompleterPourFac];

/// Handled by the central enrolment office.
pub const STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_SIC: Statuts =
    &[Confirmee, CompleteePourSic, RetourDeFac, AttenteValidationDirection];

/// Handled by the central enrolment office, including while waiting for documents.
pub const STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_SIC_ETENDUS: Statuts = &[
    Confirmee,
    CompleteePourSic,
    RetourDeFac,
    AttenteValidationDirection,
    ACompleterPourSic,
];

/// May be sent to the doctoral committee for a decision.
pub const STATUTS_PROPOSITION_DOCTORALE_ENVOYABLE_EN_CDD_POUR_DECISION: Statuts =
    &[Confirmee, CompleteePourSic, RetourDeFac];

pub const STATUTS_PROPOSITION_DOCTORALE_TERMINAUX: Statuts =
    &[Cloturee, InscriptionAutorisee, InscriptionRefusee, Annulee];

impl ChoixStatutPropositionDoctorale {
    pub fn est_terminal(&self) -> bool {
        STATUTS_PROPOSITION_DOCTORALE_TERMINAUX.contains(self)
    }

    /// Submitted to the institution (past the candidate's own edition).
    pub fn est_soumise(&self) -> bool {
        !matches!(self, EnBrouillon | EnAttenteDeSignature | CaEnAttenteDeSignature | Annulee)
    }
}

vocabulaire! {
    pub enum ChoixTypeAdmission {
        Admission => "ADMISSION",
        PreAdmission => "PRE_ADMISSION",
    }
}

vocabulaire! {
    pub enum ChoixTypeDemande {
        Admission => "ADMISSION",
        Inscription => "INSCRIPTION",
    }
}

vocabulaire! {
    pub enum ChoixTypeFinancement {
        TravailSalarie => "WORK_CONTRACT",
        BourseEtude => "SEARCH_SCHOLARSHIP",
        AutoFinance => "SELF_FUNDING",
    }
}

vocabulaire! {
    pub enum ChoixDoctoratDejaRealise {
        Oui => "YES",
        Non => "NO",
        Partiel => "PARTIAL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_sets() {
        assert!(
            STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_CDD_ETENDUS.contains(&ACompleterPourFac)
        );
        assert!(!STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_CDD.contains(&ACompleterPourFac));
        assert!(
            !STATUTS_PROPOSITION_DOCTORALE_ENVOYABLE_EN_CDD_POUR_DECISION.contains(
                &AttenteValidationDirection,
            )
        );
        assert!(Cloturee.est_terminal());
        assert!(!RetourDeFac.est_terminal());
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&TraitementFac).unwrap(),
            "\"TRAITEMENT_FAC\""
        );
        assert_eq!(ChoixStatutPropositionDoctorale::from_name("ANNULEE"), Some(Annulee));
    }
}
