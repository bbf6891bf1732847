// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Business Exceptions
//!
//! Every precondition of the admission workflows has its own variant with a
//! stable status code and a human-readable message. Validator lists collect
//! them into [`MultipleBusinessExceptions`]; handlers surface them through
//! [`AdmissionError::Business`].
//!
//! Status code families:
//!
//! | Prefix | Scope |
//! |--------|-------|
//! | `PROPOSITION-n`, `DOCTORAT-n` | doctorate preparation |
//! | `FORMATION-GENERALE-n` | general education |
//! | `FORMATION-CONTINUE-n` | continuing education |
//! | `ADMISSION-n` | shared kernel |

use crate::domain::shared::repository::RepositoryError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "exception")]
pub enum BusinessException {
    // ----- doctorate: proposition -----
    #[error("You cannot have more than {maximum} applications in progress at the same time.")]
    MaximumPropositionsAtteint { maximum: usize },
    #[error("Work contract type should be set when funding type is set to work contract.")]
    ContratTravailInconsistant,
    #[error("Institution should be set when PhD has been set to yes or partial.")]
    InstitutionInconsistante,
    #[error("Thesis domain should be set when PhD has been set to yes or partial.")]
    DomaineTheseInconsistant,
    #[error("A justification is needed when creating a pre-admission.")]
    JustificationRequise,
    #[error("Mandatory fields are missing in the project details of the proposition.")]
    DetailProjetNonComplete,
    #[error("Mandatory fields are missing in the cotutelle.")]
    CotutelleNonComplete,
    #[error("You must add at least one supervisor in order to request signatures.")]
    PromoteurManquant,
    #[error("You must add at least one CA member in order to request signatures.")]
    MembreCAManquant,
    #[error("You must set a contact supervisor.")]
    PromoteurDeReferenceManquant,
    #[error("Thesis institute must be set.")]
    InstitutTheseObligatoire,
    #[error("The signature request procedure has not been launched.")]
    ProcedureDemandeSignatureNonLancee,
    #[error("The signature request procedure has already been launched, the proposition can no longer be modified.")]
    ProcedureDemandeSignatureLancee,
    #[error("All supervisors must have approved the proposition.")]
    PropositionNonApprouveeParPromoteur,
    #[error("All CA members must have approved the proposition.")]
    PropositionNonApprouveeParMembresCA,
    #[error("The proposition must be waiting for signatures to realize this action.")]
    PropositionNonEnAttenteDeSignature,

    // ----- doctorate: supervision group -----
    #[error("Supervisor not found.")]
    PromoteurNonTrouve,
    #[error("CA member not found.")]
    MembreCANonTrouve,
    #[error("Member of supervision group not found.")]
    SignataireNonTrouve,
    #[error("Member of supervision group has not been invited to sign.")]
    SignatairePasInvite,
    #[error("Already a member of the supervision group.")]
    DejaMembre,
    #[error("There can be no more supervisors in the supervision group.")]
    GroupeSupervisionCompletPourPromoteurs,
    #[error("There can be no more CA members in the supervision group.")]
    GroupeSupervisionCompletPourMembresCA,
    #[error("A reason must be given when declining the proposition.")]
    MotifRefusSignataireNonSpecifie,

    // ----- doctorate: accounting -----
    #[error("Some fields are missing in the 'Absence of debt' block.")]
    AbsenceDeDetteNonCompletee,
    #[error("Some fields related to the bank account number in IBAN format are missing.")]
    CarteBancaireRemboursementIbanNonComplete,
    #[error("Some fields related to the bank account are missing.")]
    CarteBancaireRemboursementAutreFormatNonComplete,
    #[error("The type of the bank account must be specified.")]
    TypeCompteBancaireRemboursementNonComplete,

    // ----- checklist and decisions -----
    #[error("You must choose a title of access among the previous experiences of the candidate.")]
    TitreAccesEtreSelectionne,
    #[error("You must choose an admission requirement and its year.")]
    ConditionAccesEtreSelectionne,
    #[error("You must choose a title of access to send the proposition to SIC.")]
    TitreAccesEtreSelectionnePourEnvoyerASIC,
    #[error("The previous experience must be in the \"Sufficient\" status in order to do this action.")]
    ParcoursAnterieurNonSuffisant,
    #[error("The request must be an admission.")]
    DemandeDoitEtreAdmission,
    #[error("The request must be an enrolment.")]
    DemandeDoitEtreInscription,
    #[error("The SIC decision checklist is not in a valid state to approve an enrolment.")]
    EtatChecklistDecisionSicNonValidePourApprouverUneInscription,
    #[error("The financeability checklist is not in a valid state to approve the request.")]
    EtatChecklistFinancabiliteNonValidePourApprouverDemande,
    #[error("The personal data checklist must be validated to approve the request.")]
    EtatChecklistDonneesPersonnellesNonValidePourApprouverDemande,
    #[error("The proposition must be managed by SIC to realized this action.")]
    SituationPropositionNonSIC,
    #[error("The proposition must be managed by the CDD to realized this action.")]
    SituationPropositionNonCdd,
    #[error("The proposition must be managed by the faculty to realized this action.")]
    SituationPropositionNonFAC,
    #[error("Every previous experience must be validated in order to make the previous experience sufficient.")]
    StatutsChecklistExperiencesEtreValides,
    #[error("When refusing a proposition, the reason must be specified.")]
    MotifRefusCDDNonSpecifie,
    #[error("It is not possible to go from the \"Closed\" status to this status.")]
    StatutChecklistDecisionCddDoitEtreDifferentCloture,
    #[error("When refusing a proposition, the reason must be specified.")]
    MotifRefusFacultaireNonSpecifie,
    #[error("When accepting a proposition, all the required information in the approval form must be specified.")]
    InformationsAcceptationFacultaireNonSpecifiees,
    #[error("When accepting a proposition, all the required information in the approval form must be specified.")]
    InformationsAcceptationNonSpecifiees,
    #[error("The proposition must concern an external reorientation with an admission requirement.")]
    ReorientationExterneAvecConditionAcces,
    #[error("The application fee status does not allow this action.")]
    PropositionPourPaiementInvalide,
    #[error("When refusing a proposition, the reason must be specified.")]
    MotifRefusNonSpecifie,
    #[error("The SIC decision must be waiting for validation to realize this action.")]
    DecisionSicNonAValider,

    // ----- shared kernel -----
    #[error("No experience found.")]
    ExperienceNonTrouvee,
    #[error("The experience is not being authenticated.")]
    ExperienceNonEnAuthentification,
    #[error("Unknown checklist tab: {onglet}.")]
    OngletChecklistInconnu { onglet: String },
    #[error("Unknown checklist configuration for tab {onglet}.")]
    ConfigurationChecklistInconnue { onglet: String },
    #[error("The checklist tab {onglet} can only be changed through its dedicated action.")]
    OngletChecklistReserve { onglet: String },
    #[error("No document has been requested from the candidate.")]
    DocumentsNonReclames,
    #[error("The proposition must be a draft to realize this action.")]
    PropositionNonBrouillon,

    // ----- continuing education -----
    #[error("The proposition cannot be put on hold from its current decision status.")]
    MettreEnAttenteTransitionStatut,
    #[error("The proposition cannot be approved by the faculty from its current decision status.")]
    ApprouverParFacTransitionStatut,
    #[error("The proposition cannot be taken in charge from its current decision status.")]
    PrendreEnChargeTransitionStatut,
    #[error("The proposition cannot be denied from its current decision status.")]
    RefuserPropositionTransitionStatut,
    #[error("The proposition cannot be canceled from its current decision status.")]
    AnnulerPropositionTransitionStatut,
    #[error("The proposition cannot be validated from its current decision status.")]
    ValiderPropositionTransitionStatut,
    #[error("The proposition cannot be closed from its current decision status.")]
    CloturerPropositionTransitionStatut,
    #[error("The proposition cannot be submitted for validation from its current decision status.")]
    MettreAValiderTransitionStatut,
    #[error("A reason must be specified.")]
    MotifNonSpecifie,
}

impl BusinessException {
    pub fn status_code(&self) -> &'static str {
        use BusinessException::*;
        match self {
            MaximumPropositionsAtteint { .. } => "PROPOSITION-1",
            ContratTravailInconsistant => "PROPOSITION-6",
            InstitutionInconsistante => "PROPOSITION-7",
            DomaineTheseInconsistant => "PROPOSITION-8",
            PromoteurNonTrouve => "PROPOSITION-9",
            MembreCANonTrouve => "PROPOSITION-10",
            SignataireNonTrouve => "PROPOSITION-11",
            SignatairePasInvite => "PROPOSITION-13",
            DejaMembre => "PROPOSITION-15",
            JustificationRequise => "PROPOSITION-16",
            DetailProjetNonComplete => "PROPOSITION-17",
            CotutelleNonComplete => "PROPOSITION-18",
            PromoteurManquant => "PROPOSITION-19",
            MembreCAManquant => "PROPOSITION-20",
            GroupeSupervisionCompletPourPromoteurs => "PROPOSITION-22",
            GroupeSupervisionCompletPourMembresCA => "PROPOSITION-23",
            ProcedureDemandeSignatureNonLancee => "PROPOSITION-36",
            PropositionNonApprouveeParPromoteur => "PROPOSITION-37",
            PropositionNonApprouveeParMembresCA => "PROPOSITION-38",
            InstitutTheseObligatoire => "PROPOSITION-39",
            PromoteurDeReferenceManquant => "PROPOSITION-42",
            ProcedureDemandeSignatureLancee => "PROPOSITION-52",
            TitreAccesEtreSelectionne => "PROPOSITION-53",
            ConditionAccesEtreSelectionne => "PROPOSITION-54",
            TitreAccesEtreSelectionnePourEnvoyerASIC => "PROPOSITION-56",
            ParcoursAnterieurNonSuffisant => "PROPOSITION-57",
            DemandeDoitEtreAdmission => "PROPOSITION-61",
            DemandeDoitEtreInscription => "PROPOSITION-62",
            EtatChecklistDecisionSicNonValidePourApprouverUneInscription => "PROPOSITION-63",
            EtatChecklistFinancabiliteNonValidePourApprouverDemande => "PROPOSITION-64",
            SituationPropositionNonSIC => "PROPOSITION-67",
            SituationPropositionNonCdd => "PROPOSITION-68",
            StatutsChecklistExperiencesEtreValides => "PROPOSITION-69",
            MotifRefusCDDNonSpecifie => "PROPOSITION-70",
            StatutChecklistDecisionCddDoitEtreDifferentCloture => "PROPOSITION-71",
            EtatChecklistDonneesPersonnellesNonValidePourApprouverDemande => "PROPOSITION-72",
            AbsenceDeDetteNonCompletee => "DOCTORAT-1",
            CarteBancaireRemboursementIbanNonComplete => "DOCTORAT-5",
            CarteBancaireRemboursementAutreFormatNonComplete => "DOCTORAT-6",
            TypeCompteBancaireRemboursementNonComplete => "DOCTORAT-7",
            PropositionNonEnAttenteDeSignature => "DOCTORAT-8",
            MotifRefusSignataireNonSpecifie => "DOCTORAT-11",
            InformationsAcceptationNonSpecifiees => "DOCTORAT-12",
            SituationPropositionNonFAC => "FORMATION-GENERALE-1",
            MotifRefusFacultaireNonSpecifie => "FORMATION-GENERALE-2",
            InformationsAcceptationFacultaireNonSpecifiees => "FORMATION-GENERALE-3",
            ReorientationExterneAvecConditionAcces => "FORMATION-GENERALE-4",
            PropositionPourPaiementInvalide => "FORMATION-GENERALE-5",
            MotifRefusNonSpecifie => "ADMISSION-45",
            DecisionSicNonAValider => "ADMISSION-46",
            ExperienceNonTrouvee => "ADMISSION-22",
            ExperienceNonEnAuthentification => "ADMISSION-44",
            OngletChecklistInconnu { .. } => "ADMISSION-40",
            ConfigurationChecklistInconnue { .. } => "ADMISSION-41",
            OngletChecklistReserve { .. } => "ADMISSION-47",
            DocumentsNonReclames => "ADMISSION-42",
            PropositionNonBrouillon => "ADMISSION-43",
            MettreEnAttenteTransitionStatut => "FORMATION-CONTINUE-1",
            ApprouverParFacTransitionStatut => "FORMATION-CONTINUE-2",
            PrendreEnChargeTransitionStatut => "FORMATION-CONTINUE-3",
            RefuserPropositionTransitionStatut => "FORMATION-CONTINUE-4",
            AnnulerPropositionTransitionStatut => "FORMATION-CONTINUE-5",
            ValiderPropositionTransitionStatut => "FORMATION-CONTINUE-6",
            CloturerPropositionTransitionStatut => "FORMATION-CONTINUE-7",
            MettreAValiderTransitionStatut => "FORMATION-CONTINUE-8",
            MotifNonSpecifie => "FORMATION-CONTINUE-9",
        }
    }
}

/// Every business rule violated by one command, in validator declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}", .exceptions.iter().map(|e| format!("[{}] {}", e.status_code(), e)).collect::<Vec<_>>().join(" "))]
pub struct MultipleBusinessExceptions {
    pub exceptions: Vec<BusinessException>,
}

impl MultipleBusinessExceptions {
    pub fn new(exceptions: Vec<BusinessException>) -> Self {
        Self { exceptions }
    }

    pub fn contient(&self, exception: &BusinessException) -> bool {
        self.exceptions.contains(exception)
    }

    pub fn status_codes(&self) -> Vec<&'static str> {
        self.exceptions.iter().map(BusinessException::status_code).collect()
    }
}

impl From<BusinessException> for MultipleBusinessExceptions {
    fn from(exception: BusinessException) -> Self {
        Self::new(vec![exception])
    }
}

/// Error returned by command and query handlers.
#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error(transparent)]
    Business(#[from] MultipleBusinessExceptions),

    #[error("Proposition not found: {0}")]
    PropositionNonTrouvee(String),

    #[error("Supervision group not found for proposition {0}")]
    GroupeDeSupervisionNonTrouve(String),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("External integration '{port}' failed (reference {reference}): {message}")]
    Integration {
        port: String,
        reference: String,
        message: String,
    },

    #[error("No handler registered for {0}")]
    HandlerNotRegistered(&'static str),
}

impl AdmissionError {
    pub fn status_code(&self) -> Option<&'static str> {
        match self {
            Self::PropositionNonTrouvee(_) => Some("PROPOSITION-3"),
            Self::GroupeDeSupervisionNonTrouve(_) => Some("PROPOSITION-4"),
            _ => None,
        }
    }

    /// Business exceptions carried by this error, empty for technical errors.
    pub fn exceptions(&self) -> &[BusinessException] {
        match self {
            Self::Business(multiple) => &multiple.exceptions,
            _ => &[],
        }
    }
}

impl From<BusinessException> for AdmissionError {
    fn from(exception: BusinessException) -> Self {
        Self::Business(exception.into())
    }
}

impl From<RepositoryError> for AdmissionError {
    fn from(error: RepositoryError) -> Self {
        Self::Repository(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_display_lists_codes() {
        let multiple = MultipleBusinessExceptions::new(vec![
            BusinessException::JustificationRequise,
            BusinessException::StatutChecklistDecisionCddDoitEtreDifferentCloture,
        ]);

        let message = multiple.to_string();
        assert!(message.contains("[PROPOSITION-16]"));
        assert!(message.contains("[PROPOSITION-71]"));
        assert_eq!(multiple.status_codes(), vec!["PROPOSITION-16", "PROPOSITION-71"]);
    }

    #[test]
    fn test_not_found_status_codes() {
        assert_eq!(
            AdmissionError::PropositionNonTrouvee("x".into()).status_code(),
            Some("PROPOSITION-3")
        );
        assert!(AdmissionError::HandlerNotRegistered("x").exceptions().is_empty());
    }

    #[test]
    fn test_single_exception_converts() {
        let err: AdmissionError = BusinessException::DejaMembre.into();
        assert_eq!(err.exceptions(), &[BusinessException::DejaMembre]);
    }
}
