// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # General Education Commands

use crate::application::message_bus::Command;
use crate::domain::doctorat::statuts::ChoixTypeDemande;
use crate::domain::formation_generale::proposition::FormationGenerale;
use crate::domain::shared::checklist::{ChoixStatutChecklist, ExtraChecklist};
use crate::domain::shared::decision::{
    DocumentsDemandes, EtatAuthentificationParcours, InformationsAcceptation, MotifsRefus,
};
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::titres_acces::ConditionAcces;
use serde::{Deserialize, Serialize};

macro_rules! commande {
    ($($nom:ident),+ $(,)?) => {
        $(impl Command for $nom {
            type Output = PropositionIdentity;
        })+
    };
}

// ============================================================================
// Candidate
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitierPropositionCommand {
    pub matricule_candidat: String,
    pub formation: FormationGenerale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleterCurriculumCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
    #[serde(default)]
    pub curriculum: Vec<String>,
    #[serde(default)]
    pub equivalence_diplome: Vec<String>,
    pub est_reorientation_inscription_externe: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoumettrePropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
    pub type_demande: ChoixTypeDemande,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupprimerPropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayerFraisDossierCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleterDocumentsParCandidatCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
}

// ============================================================================
// Application fees
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecifierPaiementNecessaireParGestionnaireCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

/// `statut_checklist_frais_dossier` is `GEST_REUSSITE` (dispensed) or
/// `INITIAL_NON_CONCERNE` (not concerned).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecifierPaiementPlusNecessaireCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub statut_checklist_frais_dossier: ChoixStatutChecklist,
}

// ============================================================================
// Documents and checklist
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReclamerDocumentsAuCandidatParFacCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub documents: DocumentsDemandes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReclamerDocumentsAuCandidatParSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub documents: DocumentsDemandes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnulerReclamationDocumentsAuCandidatParFacCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnulerReclamationDocumentsAuCandidatParSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierStatutChecklistCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub onglet: String,
    pub statut: String,
    #[serde(default)]
    pub extra: ExtraChecklist,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierStatutChecklistParcoursAnterieurCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub configuration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierStatutChecklistExperienceParcoursAnterieurCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub uuid_experience: String,
    pub configuration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierAuthentificationExperienceParcoursAnterieurCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub uuid_experience: String,
    pub etat_authentification: EtatAuthentificationParcours,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecifierConditionAccesCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub condition_acces: Option<ConditionAcces>,
    pub millesime_condition_acces: Option<u32>,
}

// ============================================================================
// Faculty and central enrolment office decisions
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvoyerPropositionAFacLorsDeLaDecisionFacultaireCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvoyerPropositionAuSicLorsDeLaDecisionFacultaireCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefuserPropositionParFaculteCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    #[serde(default)]
    pub motifs: MotifsRefus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprouverPropositionParFaculteCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    #[serde(default)]
    pub informations: InformationsAcceptation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprouverReorientationExterneParFaculteCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprouverAdmissionParSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefuserAdmissionParSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    #[serde(default)]
    pub motifs: MotifsRefus,
}

commande! {
    InitierPropositionCommand,
    CompleterCurriculumCommand,
    SoumettrePropositionCommand,
    SupprimerPropositionCommand,
    PayerFraisDossierCommand,
    CompleterDocumentsParCandidatCommand,
    SpecifierPaiementNecessaireParGestionnaireCommand,
    SpecifierPaiementPlusNecessaireCommand,
    ReclamerDocumentsAuCandidatParFacCommand,
    ReclamerDocumentsAuCandidatParSicCommand,
    AnnulerReclamationDocumentsAuCandidatParFacCommand,
    AnnulerReclamationDocumentsAuCandidatParSicCommand,
    ModifierStatutChecklistCommand,
    ModifierStatutChecklistParcoursAnterieurCommand,
    ModifierStatutChecklistExperienceParcoursAnterieurCommand,
    ModifierAuthentificationExperienceParcoursAnterieurCommand,
    SpecifierConditionAccesCommand,
    EnvoyerPropositionAFacLorsDeLaDecisionFacultaireCommand,
    EnvoyerPropositionAuSicLorsDeLaDecisionFacultaireCommand,
    RefuserPropositionParFaculteCommand,
    ApprouverPropositionParFaculteCommand,
    ApprouverReorientationExterneParFaculteCommand,
    ApprouverAdmissionParSicCommand,
    RefuserAdmissionParSicCommand,
}
