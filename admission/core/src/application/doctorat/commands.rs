// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Doctorate Commands
//!
//! Flat, immutable messages handled by [`super::handlers`]. Identifiers travel
//! as [`PropositionIdentity`]; authors as registration numbers.

use crate::application::message_bus::Command;
use crate::domain::doctorat::groupe_de_supervision::Cotutelle;
use crate::domain::doctorat::proposition::{
    Comptabilite, DetailProjet, ExperiencePrecedenteRecherche, Financement, FormationDoctorale,
};
use crate::domain::doctorat::statuts::{ChoixTypeAdmission, ChoixTypeDemande};
use crate::domain::shared::checklist::ExtraChecklist;
use crate::domain::shared::decision::{
    BesoinDeDerogation, DerogationFinancement, DocumentsDemandes, EtatAuthentificationParcours,
    InformationsAcceptation, MotifsRefus,
};
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::titres_acces::ConditionAcces;
use serde::{Deserialize, Serialize};

macro_rules! commande {
    ($($nom:ident => $sortie:ty),+ $(,)?) => {
        $(impl Command for $nom {
            type Output = $sortie;
        })+
    };
}

// ============================================================================
// Candidate
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitierPropositionCommand {
    pub matricule_candidat: String,
    pub formation: FormationDoctorale,
    pub type_admission: ChoixTypeAdmission,
    #[serde(default)]
    pub justification: String,
    pub commission_proximite: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleterPropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
    pub type_admission: ChoixTypeAdmission,
    #[serde(default)]
    pub justification: String,
    pub commission_proximite: Option<String>,
    #[serde(default)]
    pub financement: Financement,
    #[serde(default)]
    pub projet: DetailProjet,
    #[serde(default)]
    pub experience_precedente_recherche: ExperiencePrecedenteRecherche,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierTypeAdmissionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
    pub type_admission: ChoixTypeAdmission,
    #[serde(default)]
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleterComptabiliteCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
    pub comptabilite: Comptabilite,
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
pub struct CompleterDocumentsParCandidatCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
}

// ============================================================================
// Supervision group
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierPromoteurCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierMembreCACommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupprimerPromoteurCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupprimerMembreCACommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignerPromoteurReferenceCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinirCotutelleCommand {
    pub uuid_proposition: PropositionIdentity,
    pub cotutelle: Cotutelle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemanderSignaturesCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprouverPropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule: String,
    #[serde(default)]
    pub commentaire_interne: String,
    #[serde(default)]
    pub commentaire_externe: String,
    /// Required from the first approving promoter when the candidate left it empty.
    pub institut_these: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefuserPropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule: String,
    #[serde(default)]
    pub motif_refus: String,
    #[serde(default)]
    pub commentaire_interne: String,
    #[serde(default)]
    pub commentaire_externe: String,
}

// ============================================================================
// Staff: documents and checklist
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReclamerDocumentsAuCandidatParCddCommand {
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
pub struct AnnulerReclamationDocumentsAuCandidatParCddCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnulerReclamationDocumentsAuCandidatParSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

/// Moves tab `onglet` to the configuration matching `(statut, extra)`.
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
    /// Configuration identifier of the previous experience tab
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecifierFinancabiliteRegleCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub regle: String,
    pub financable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecifierFinancabiliteNonConcerneeCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecifierDerogationFinancabiliteCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub derogation: DerogationFinancement,
}

// ============================================================================
// Doctoral committee (CDD)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvoyerPropositionACddLorsDeLaDecisionCddCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvoyerPropositionAuSicLorsDeLaDecisionCddCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefuserPropositionParCddCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    #[serde(default)]
    pub motifs: MotifsRefus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprouverPropositionParCddCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    #[serde(default)]
    pub informations: InformationsAcceptation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloturerPropositionParCddCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

// ============================================================================
// Central enrolment office (SIC)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecifierBesoinDeDerogationSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    pub besoin_de_derogation: BesoinDeDerogation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecifierMotifsRefusPropositionParSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    #[serde(default)]
    pub motifs: MotifsRefus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefuserAdmissionParSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecifierInformationsAcceptationPropositionParSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
    #[serde(default)]
    pub informations: InformationsAcceptation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprouverAdmissionParSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprouverInscriptionParSicCommand {
    pub uuid_proposition: PropositionIdentity,
    pub auteur: String,
}

commande! {
    InitierPropositionCommand => PropositionIdentity,
    CompleterPropositionCommand => PropositionIdentity,
    ModifierTypeAdmissionCommand => PropositionIdentity,
    CompleterComptabiliteCommand => PropositionIdentity,
    SoumettrePropositionCommand => PropositionIdentity,
    SupprimerPropositionCommand => PropositionIdentity,
    CompleterDocumentsParCandidatCommand => PropositionIdentity,
    IdentifierPromoteurCommand => PropositionIdentity,
    IdentifierMembreCACommand => PropositionIdentity,
    SupprimerPromoteurCommand => PropositionIdentity,
    SupprimerMembreCACommand => PropositionIdentity,
    DesignerPromoteurReferenceCommand => PropositionIdentity,
    DefinirCotutelleCommand => PropositionIdentity,
    DemanderSignaturesCommand => PropositionIdentity,
    ApprouverPropositionCommand => PropositionIdentity,
    RefuserPropositionCommand => PropositionIdentity,
    ReclamerDocumentsAuCandidatParCddCommand => PropositionIdentity,
    ReclamerDocumentsAuCandidatParSicCommand => PropositionIdentity,
    AnnulerReclamationDocumentsAuCandidatParCddCommand => PropositionIdentity,
    AnnulerReclamationDocumentsAuCandidatParSicCommand => PropositionIdentity,
    ModifierStatutChecklistCommand => PropositionIdentity,
    ModifierStatutChecklistParcoursAnterieurCommand => PropositionIdentity,
    ModifierStatutChecklistExperienceParcoursAnterieurCommand => PropositionIdentity,
    ModifierAuthentificationExperienceParcoursAnterieurCommand => PropositionIdentity,
    SpecifierConditionAccesCommand => PropositionIdentity,
    SpecifierFinancabiliteRegleCommand => PropositionIdentity,
    SpecifierFinancabiliteNonConcerneeCommand => PropositionIdentity,
    SpecifierDerogationFinancabiliteCommand => PropositionIdentity,
    EnvoyerPropositionACddLorsDeLaDecisionCddCommand => PropositionIdentity,
    EnvoyerPropositionAuSicLorsDeLaDecisionCddCommand => PropositionIdentity,
    RefuserPropositionParCddCommand => PropositionIdentity,
    ApprouverPropositionParCddCommand => PropositionIdentity,
    CloturerPropositionParCddCommand => PropositionIdentity,
    SpecifierBesoinDeDerogationSicCommand => PropositionIdentity,
    SpecifierMotifsRefusPropositionParSicCommand => PropositionIdentity,
    RefuserAdmissionParSicCommand => PropositionIdentity,
    SpecifierInformationsAcceptationPropositionParSicCommand => PropositionIdentity,
    ApprouverAdmissionParSicCommand => PropositionIdentity,
    ApprouverInscriptionParSicCommand => PropositionIdentity,
}
