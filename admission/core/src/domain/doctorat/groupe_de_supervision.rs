// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Supervision Group Aggregate
//!
//! Supervisors (promoteurs) and supervisory panel members (membres CA) of a
//! doctorate proposition, with the state of each member's signature.
//!
//! A person appears at most once across both lists. The group holds at most
//! [`MAXIMUM_PROMOTEURS`] supervisors and [`MAXIMUM_MEMBRES_CA`] panel members.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Aggregate root:** [`GroupeDeSupervision`], 1:1 with a proposition

use crate::domain::doctorat::validators::{
    ApprobationSignataireValidatorList, CotutelleValidatorList, IdentifierMembreValidatorList,
    RefusSignataireValidatorList,
};
use crate::domain::shared::exceptions::{BusinessException, MultipleBusinessExceptions};
use crate::domain::shared::identite::{GroupeDeSupervisionIdentity, PropositionIdentity};
use crate::domain::shared::repository::{AggregateVersionne, RepositoryError};
use crate::domain::shared::validation::BusinessValidatorList;
use crate::vocabulaire;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAXIMUM_PROMOTEURS: usize = 2;
pub const MAXIMUM_MEMBRES_CA: usize = 3;

// ============================================================================
// Value Objects
// ============================================================================

vocabulaire! {
    pub enum ChoixEtatSignature {
        NonInvite => "NOT_INVITED",
        Invite => "INVITED",
        Approuve => "APPROVED",
        Refuse => "DECLINED",
    }
}

vocabulaire! {
    pub enum ChoixStatutSignatureGroupeDeSupervision {
        EnCours => "IN_PROGRESS",
        SignatureEnCours => "SIGNING_IN_PROGRESS",
    }
}

vocabulaire! {
    pub enum RoleSignataire {
        Promoteur => "PROMOTEUR",
        MembreCa => "MEMBRE_CA",
    }
}

/// Signature of one member of the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub matricule: String,
    pub etat: ChoixEtatSignature,
    pub signe_le: Option<DateTime<Utc>>,
    #[serde(default)]
    pub commentaire_externe: String,
    #[serde(default)]
    pub commentaire_interne: String,
    #[serde(default)]
    pub motif_refus: String,
}

impl Signature {
    pub fn non_invitee(matricule: impl Into<String>) -> Self {
        Self {
            matricule: matricule.into(),
            etat: ChoixEtatSignature::NonInvite,
            signe_le: None,
            commentaire_externe: String::new(),
            commentaire_interne: String::new(),
            motif_refus: String::new(),
        }
    }

    fn reinitialiser(&mut self) {
        self.etat = ChoixEtatSignature::NonInvite;
        self.signe_le = None;
        self.motif_refus.clear();
    }
}

/// Joint supervision with another institution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cotutelle {
    pub cotutelle: Option<bool>,
    pub motivation: String,
    pub institution_fwb: Option<bool>,
    pub institution: String,
    pub demande_ouverture: Vec<String>,
    pub convention: Vec<String>,
    pub autres_documents: Vec<String>,
}

impl Cotutelle {
    pub fn est_complete(&self) -> bool {
        match self.cotutelle {
            Some(true) => !self.motivation.trim().is_empty() && !self.institution.trim().is_empty(),
            Some(false) => true,
            None => false,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupeDeSupervision {
    pub entity_id: GroupeDeSupervisionIdentity,
    pub proposition_id: PropositionIdentity,
    pub signatures_promoteurs: Vec<Signature>,
    pub signatures_membres_ca: Vec<Signature>,
    pub promoteur_reference: Option<String>,
    pub cotutelle: Option<Cotutelle>,
    pub statut_signature: ChoixStatutSignatureGroupeDeSupervision,
    #[serde(default)]
    pub version: u64,
}

impl GroupeDeSupervision {
    pub fn new(proposition_id: PropositionIdentity) -> Self {
        Self {
            entity_id: GroupeDeSupervisionIdentity::new(),
            proposition_id,
            signatures_promoteurs: Vec::new(),
            signatures_membres_ca: Vec::new(),
            promoteur_reference: None,
            cotutelle: None,
            statut_signature: ChoixStatutSignatureGroupeDeSupervision::EnCours,
            version: 0,
        }
    }

    pub fn role_de(&self, matricule: &str) -> Option<RoleSignataire> {
        if self.signatures_promoteurs.iter().any(|s| s.matricule == matricule) {
            Some(RoleSignataire::Promoteur)
        } else if self.signatures_membres_ca.iter().any(|s| s.matricule == matricule) {
            Some(RoleSignataire::MembreCa)
        } else {
            None
        }
    }

    pub fn signature(&self, matricule: &str) -> Option<&Signature> {
        self.signatures_promoteurs
            .iter()
            .chain(self.signatures_membres_ca.iter())
            .find(|s| s.matricule == matricule)
    }

    fn signature_mut(&mut self, matricule: &str) -> Option<&mut Signature> {
        self.signatures_promoteurs
            .iter_mut()
            .chain(self.signatures_membres_ca.iter_mut())
            .find(|s| s.matricule == matricule)
    }

    pub fn promoteurs(&self) -> impl Iterator<Item = &str> {
        self.signatures_promoteurs.iter().map(|s| s.matricule.as_str())
    }

    pub fn membres_ca(&self) -> impl Iterator<Item = &str> {
        self.signatures_membres_ca.iter().map(|s| s.matricule.as_str())
    }

    pub fn signature_en_cours(&self) -> bool {
        self.statut_signature == ChoixStatutSignatureGroupeDeSupervision::SignatureEnCours
    }

    pub fn tous_promoteurs_ont_approuve(&self) -> bool {
        !self.signatures_promoteurs.is_empty()
            && self
                .signatures_promoteurs
                .iter()
                .all(|s| s.etat == ChoixEtatSignature::Approuve)
    }

    pub fn tous_membres_ca_ont_approuve(&self) -> bool {
        self.signatures_membres_ca
            .iter()
            .all(|s| s.etat == ChoixEtatSignature::Approuve)
    }

    pub fn aucun_promoteur_n_a_approuve(&self) -> bool {
        !self
            .signatures_promoteurs
            .iter()
            .any(|s| s.etat == ChoixEtatSignature::Approuve)
    }

    pub fn identifier_membre(
        &mut self,
        matricule: &str,
        role: RoleSignataire,
        personne_connue: bool,
    ) -> Result<(), MultipleBusinessExceptions> {
        IdentifierMembreValidatorList {
            groupe: self,
            matricule,
            role,
            personne_connue,
        }
        .validate()?;

        let signature = Signature::non_invitee(matricule);
        match role {
            RoleSignataire::Promoteur => self.signatures_promoteurs.push(signature),
            RoleSignataire::MembreCa => self.signatures_membres_ca.push(signature),
        }
        Ok(())
    }

    pub fn supprimer_membre(
        &mut self,
        matricule: &str,
        role: RoleSignataire,
    ) -> Result<(), BusinessException> {
        let (liste, exception) = match role {
            RoleSignataire::Promoteur => (
                &mut self.signatures_promoteurs,
                BusinessException::PromoteurNonTrouve,
            ),
            RoleSignataire::MembreCa => (
                &mut self.signatures_membres_ca,
                BusinessException::MembreCANonTrouve,
            ),
        };
        let position = liste
            .iter()
            .position(|s| s.matricule == matricule)
            .ok_or(exception)?;
        liste.remove(position);

        if self.promoteur_reference.as_deref() == Some(matricule) {
            self.promoteur_reference = None;
        }
        Ok(())
    }

    pub fn designer_promoteur_reference(
        &mut self,
        matricule: &str,
    ) -> Result<(), BusinessException> {
        if self.role_de(matricule) != Some(RoleSignataire::Promoteur) {
            return Err(BusinessException::PromoteurNonTrouve);
        }
        self.promoteur_reference = Some(matricule.to_string());
        Ok(())
    }

    pub fn definir_cotutelle(
        &mut self,
        cotutelle: Cotutelle,
    ) -> Result<(), MultipleBusinessExceptions> {
        CotutelleValidatorList {
            cotutelle: Some(&cotutelle),
        }
        .validate()?;
        self.cotutelle = Some(cotutelle);
        Ok(())
    }

    /// Invites every member not invited yet or who declined. Returns the
    /// matricules of the invited members.
    pub fn inviter_a_signer(&mut self) -> Vec<String> {
        self.statut_signature = ChoixStatutSignatureGroupeDeSupervision::SignatureEnCours;
        self.signatures_promoteurs
            .iter_mut()
            .chain(self.signatures_membres_ca.iter_mut())
            .filter(
                |s| matches!(s.etat, ChoixEtatSignature::NonInvite | ChoixEtatSignature::Refuse),
            )
            .map(|s| {
                s.etat = ChoixEtatSignature::Invite;
                s.motif_refus.clear();
                s.matricule.clone()
            })
            .collect()
    }

    pub fn approuver(
        &mut self,
        matricule: &str,
        commentaire_interne: &str,
        commentaire_externe: &str,
        maintenant: DateTime<Utc>,
    ) -> Result<RoleSignataire, MultipleBusinessExceptions> {
        ApprobationSignataireValidatorList {
            groupe: self,
            matricule,
        }
        .validate()?;

        let role = self.role_de(matricule).ok_or(BusinessException::SignataireNonTrouve)?;
        let signature = self
            .signature_mut(matricule)
            .ok_or(BusinessException::SignataireNonTrouve)?;
        signature.etat = ChoixEtatSignature::Approuve;
        signature.signe_le = Some(maintenant);
        signature.commentaire_interne = commentaire_interne.to_string();
        signature.commentaire_externe = commentaire_externe.to_string();
        Ok(role)
    }

    /// A refusing supervisor sends the proposition back to draft: the other
    /// supervisors' signatures are reset. A refusing panel member leaves the group.
    pub fn refuser(
        &mut self,
        matricule: &str,
        motif_refus: &str,
        commentaire_interne: &str,
        commentaire_externe: &str,
        maintenant: DateTime<Utc>,
    ) -> Result<RoleSignataire, MultipleBusinessExceptions> {
        RefusSignataireValidatorList {
            groupe: self,
            matricule,
            motif_refus,
        }
        .validate()?;

        let role = self.role_de(matricule).ok_or(BusinessException::SignataireNonTrouve)?;
        match role {
            RoleSignataire::Promoteur => {
                for signature in self.signatures_promoteurs.iter_mut() {
                    if signature.matricule == matricule {
                        signature.etat = ChoixEtatSignature::Refuse;
                        signature.signe_le = Some(maintenant);
                        signature.motif_refus = motif_refus.to_string();
                        signature.commentaire_interne = commentaire_interne.to_string();
                        signature.commentaire_externe = commentaire_externe.to_string();
                    } else {
                        signature.reinitialiser();
                    }
                }
                self.statut_signature = ChoixStatutSignatureGroupeDeSupervision::EnCours;
            }
            RoleSignataire::MembreCa => {
                self.signatures_membres_ca.retain(|s| s.matricule != matricule);
            }
        }
        Ok(role)
    }
}

impl AggregateVersionne for GroupeDeSupervision {
    fn cle(&self) -> uuid::Uuid {
        self.entity_id.0
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn definir_version(&mut self, version: u64) {
        self.version = version;
    }
}

/// Repository interface for supervision groups
#[async_trait]
pub trait GroupeDeSupervisionRepository: Send + Sync {
    async fn get_by_proposition_id(
        &self,
        proposition_id: &PropositionIdentity,
    ) -> Result<GroupeDeSupervision, RepositoryError>;

    async fn save(&self, groupe: &GroupeDeSupervision) -> Result<u64, RepositoryError>;

    /// Groups in which `matricule` is a supervisor or a panel member
    async fn search_by_membre(
        &self,
        matricule: &str,
    ) -> Result<Vec<GroupeDeSupervision>, RepositoryError>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn groupe() -> GroupeDeSupervision {
        let mut groupe = GroupeDeSupervision::new(PropositionIdentity::new());
        groupe.identifier_membre("p1", RoleSignataire::Promoteur, true).unwrap();
        groupe.identifier_membre("ca1", RoleSignataire::MembreCa, true).unwrap();
        groupe
    }

    #[test]
    fn test_member_appears_once_across_lists() {
        let mut groupe = groupe();

        let erreur = groupe
            .identifier_membre("p1", RoleSignataire::MembreCa, true)
            .unwrap_err();
        assert_eq!(erreur.exceptions, vec![BusinessException::DejaMembre]);

        let erreur = groupe
            .identifier_membre("ca1", RoleSignataire::Promoteur, true)
            .unwrap_err();
        assert_eq!(erreur.exceptions, vec![BusinessException::DejaMembre]);
        assert_eq!(groupe.signatures_promoteurs.len(), 1);
        assert_eq!(groupe.signatures_membres_ca.len(), 1);
    }

    #[test]
    fn test_group_limits() {
        let mut groupe = groupe();
        groupe.identifier_membre("p2", RoleSignataire::Promoteur, true).unwrap();

        let erreur = groupe
            .identifier_membre("p3", RoleSignataire::Promoteur, true)
            .unwrap_err();
        assert_eq!(
            erreur.exceptions,
            vec![BusinessException::GroupeSupervisionCompletPourPromoteurs]
        );
    }

    #[test]
    fn test_unknown_person_rejected() {
        let mut groupe = groupe();
        let erreur = groupe
            .identifier_membre("ghost", RoleSignataire::MembreCa, false)
            .unwrap_err();
        assert_eq!(erreur.exceptions, vec![BusinessException::SignataireNonTrouve]);
    }

    #[test]
    fn test_removing_reference_clears_it() {
        let mut groupe = groupe();
        groupe.designer_promoteur_reference("p1").unwrap();
        groupe.supprimer_membre("p1", RoleSignataire::Promoteur).unwrap();

        assert!(groupe.promoteur_reference.is_none());
        assert_eq!(
            groupe.supprimer_membre("p1", RoleSignataire::Promoteur),
            Err(BusinessException::PromoteurNonTrouve)
        );
    }

    #[test]
    fn test_sign_requires_invitation() {
        let mut groupe = groupe();
        let erreur = groupe.approuver("p1", "", "", Utc::now()).unwrap_err();
        assert_eq!(erreur.exceptions, vec![BusinessException::SignatairePasInvite]);

        let invites = groupe.inviter_a_signer();
        assert_eq!(invites, vec!["p1".to_string(), "ca1".to_string()]);
        assert_eq!(
            groupe.approuver("p1", "ok", "", Utc::now()).unwrap(),
            RoleSignataire::Promoteur
        );
        assert!(groupe.tous_promoteurs_ont_approuve());
        assert!(!groupe.tous_membres_ca_ont_approuve());
    }

    #[test]
    fn test_supervisor_refusal_resets_other_supervisors() {
        let mut groupe = groupe();
        groupe.identifier_membre("p2", RoleSignataire::Promoteur, true).unwrap();
        groupe.inviter_a_signer();
        groupe.approuver("p2", "", "", Utc::now()).unwrap();

        groupe.refuser("p1", "Not ready", "", "", Utc::now()).unwrap();

        assert_eq!(groupe.signature("p1").unwrap().etat, ChoixEtatSignature::Refuse);
        assert_eq!(groupe.signature("p2").unwrap().etat, ChoixEtatSignature::NonInvite);
        assert!(!groupe.signature_en_cours());
    }

    #[test]
    fn test_panel_member_refusal_leaves_group() {
        let mut groupe = groupe();
        groupe.inviter_a_signer();
        groupe.refuser("ca1", "", "", "", Utc::now()).unwrap();

        assert!(groupe.role_de("ca1").is_none());
    }

    #[test]
    fn test_supervisor_refusal_needs_reason() {
        let mut groupe = groupe();
        groupe.inviter_a_signer();
        let erreur = groupe.refuser("p1", " ", "", "", Utc::now()).unwrap_err();
        assert_eq!(
            erreur.exceptions,
            vec![BusinessException::MotifRefusSignataireNonSpecifie]
        );
    }
}
