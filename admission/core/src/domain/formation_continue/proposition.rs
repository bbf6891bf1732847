// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Continuing Education Proposition Aggregate
//!
//! Short programmes and certificates. After submission the faculty manager
//! drives the file through the `decision` checklist tab; a few decisions also
//! move the proposition status.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Aggregate root:** [`PropositionContinue`]

use crate::domain::formation_continue::checklist::{
    configuration, OngletsChecklistContinue, StatutsChecklistContinue,
};
use crate::domain::formation_continue::statuts::*;
use crate::domain::formation_continue::validators::*;
use crate::domain::shared::exceptions::{BusinessException, MultipleBusinessExceptions};
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::repository::{AggregateVersionne, PropositionAggregate};
use crate::domain::shared::titres_acces::TrainingType;
use crate::domain::shared::validation::{valider_statut, BusinessValidatorList};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ChoixStatutPropositionContinue as Statut;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationContinue {
    pub sigle: String,
    pub annee: u32,
    pub training_type: TrainingType,
}

/// Data typed by the candidate when starting a proposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NouvellePropositionContinue {
    pub matricule_candidat: String,
    pub formation: FormationContinue,
    #[serde(default)]
    pub motivations: String,
    #[serde(default)]
    pub moyens_decouverte_formation: Vec<String>,
    pub marque_d_interet: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropositionContinue {
    pub entity_id: PropositionIdentity,
    pub reference: u64,
    pub matricule_candidat: String,
    pub statut: ChoixStatutPropositionContinue,
    pub formation: FormationContinue,
    #[serde(default)]
    pub motivations: String,
    #[serde(default)]
    pub moyens_decouverte_formation: Vec<String>,
    pub marque_d_interet: Option<bool>,
    pub motif_mise_en_attente: Option<Motif>,
    pub motif_refus: Option<Motif>,
    pub motif_annulation: Option<Motif>,
    /// Condition set by the faculty when approving.
    #[serde(default)]
    pub condition_approbation_par_fac: String,
    pub soumise_le: Option<DateTime<Utc>>,
    pub checklist_initiale: Option<StatutsChecklistContinue>,
    #[serde(default)]
    pub checklist_actuelle: StatutsChecklistContinue,
    pub auteur_derniere_modification: String,
    #[serde(default)]
    pub version: u64,
}

impl PropositionContinue {
    pub fn initier(
        donnees: NouvellePropositionContinue,
        reference: u64,
        nombre_propositions_en_cours: usize,
        maximum_propositions: usize,
    ) -> Result<Self, MultipleBusinessExceptions> {
        InitierPropositionValidatorList {
            nombre_propositions_en_cours,
            maximum_propositions,
        }
        .validate()?;

        Ok(Self {
            entity_id: PropositionIdentity::new(),
            reference,
            auteur_derniere_modification: donnees.matricule_candidat.clone(),
            matricule_candidat: donnees.matricule_candidat,
            statut: Statut::EnBrouillon,
            formation: donnees.formation,
            motivations: donnees.motivations,
            moyens_decouverte_formation: donnees.moyens_decouverte_formation,
            marque_d_interet: donnees.marque_d_interet,
            motif_mise_en_attente: None,
            motif_refus: None,
            motif_annulation: None,
            condition_approbation_par_fac: String::new(),
            soumise_le: None,
            checklist_initiale: None,
            checklist_actuelle: StatutsChecklistContinue::default(),
            version: 0,
        })
    }

    fn verifier_brouillon(&self) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            &[Statut::EnBrouillon],
            BusinessException::PropositionNonBrouillon,
        )
    }

    pub fn soumettre(
        &mut self,
        maintenant: DateTime<Utc>,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_brouillon()?;
        let checklist = StatutsChecklistContinue::initialiser()?;
        self.checklist_actuelle = checklist.clone();
        self.checklist_initiale = Some(checklist);
        self.soumise_le = Some(maintenant);
        self.statut = Statut::Confirmee;
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    pub fn supprimer(&mut self, auteur: &str) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_brouillon()?;
        self.statut = Statut::Annulee;
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    /// Validates the move then rewrites the decision tab.
    fn decider(
        &mut self,
        action: ActionDecision,
        motif: Option<&Motif>,
        gestionnaire: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        DecisionGestionnaireValidatorList {
            statut: &self.statut,
            decision: &self.checklist_actuelle.decision,
            action,
            motif,
        }
        .validate()?;

        let config = configuration(OngletsChecklistContinue::Decision, action.cible())?;
        self.checklist_actuelle.decision.appliquer(config);
        self.auteur_derniere_modification = gestionnaire.to_string();
        Ok(())
    }

    pub fn prendre_en_charge(
        &mut self,
        gestionnaire: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.decider(ActionDecision::PrendreEnCharge, None, gestionnaire)
    }

    pub fn mettre_en_attente(
        &mut self,
        motif: Motif,
        gestionnaire: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.decider(ActionDecision::MettreEnAttente, Some(&motif), gestionnaire)?;
        self.motif_mise_en_attente = Some(motif);
        self.statut = Statut::EnAttente;
        Ok(())
    }

    /// Faculty approval; an on-hold proposition goes back to `CONFIRMEE`.
    pub fn approuver_par_fac(
        &mut self,
        condition: String,
        gestionnaire: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.decider(ActionDecision::ApprouverParFac, None, gestionnaire)?;
        self.condition_approbation_par_fac = condition;
        if self.statut == Statut::EnAttente {
            self.statut = Statut::Confirmee;
        }
        Ok(())
    }

    pub fn mettre_a_valider(
        &mut self,
        gestionnaire: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.decider(ActionDecision::MettreAValider, None, gestionnaire)
    }

    pub fn refuser(
        &mut self,
        motif: Motif,
        gestionnaire: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.decider(ActionDecision::Refuser, Some(&motif), gestionnaire)?;
        self.motif_refus = Some(motif);
        self.statut = Statut::InscriptionRefusee;
        Ok(())
    }

    pub fn annuler(
        &mut self,
        motif: Motif,
        gestionnaire: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.decider(ActionDecision::Annuler, Some(&motif), gestionnaire)?;
        self.motif_annulation = Some(motif);
        self.statut = Statut::Annulee;
        Ok(())
    }

    pub fn valider(&mut self, gestionnaire: &str) -> Result<(), MultipleBusinessExceptions> {
        self.decider(ActionDecision::Valider, None, gestionnaire)?;
        self.statut = Statut::InscriptionAutorisee;
        Ok(())
    }

    pub fn cloturer(&mut self, gestionnaire: &str) -> Result<(), MultipleBusinessExceptions> {
        self.decider(ActionDecision::Cloturer, None, gestionnaire)?;
        self.statut = Statut::Cloturee;
        Ok(())
    }
}

impl AggregateVersionne for PropositionContinue {
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

impl PropositionAggregate for PropositionContinue {
    const CONTEXTE: &'static str = "formation_continue";

    fn entity_id(&self) -> PropositionIdentity {
        self.entity_id
    }

    fn matricule_candidat(&self) -> &str {
        &self.matricule_candidat
    }

    fn reference(&self) -> u64 {
        self.reference
    }

    fn est_en_cours(&self) -> bool {
        self.statut != Statut::Annulee
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soumise() -> PropositionContinue {
        let donnees = NouvellePropositionContinue {
            matricule_candidat: "0002".into(),
            formation: FormationContinue {
                sigle: "INFOCERT".into(),
                annee: 2024,
                training_type: TrainingType::CertificateOfParticipation,
            },
            motivations: "Curious".into(),
            moyens_decouverte_formation: vec![],
            marque_d_interet: None,
        };
        let mut proposition = PropositionContinue::initier(
            donnees,
            3,
            0,
            5,
        )
        .unwrap();
        proposition.soumettre(Utc::now(), "0002").unwrap();
        proposition
    }

    fn motif() -> Motif {
        Motif {
            motif: "FULL".into(),
            autre_motif: String::new(),
        }
    }

    #[test]
    fn test_full_validation_path() {
        let mut proposition = soumise();
        assert_eq!(proposition.statut, Statut::Confirmee);

        proposition.prendre_en_charge("fac").unwrap();
        proposition.mettre_en_attente(motif(), "fac").unwrap();
        assert_eq!(proposition.statut, Statut::EnAttente);

        proposition.approuver_par_fac("Interview".into(), "fac").unwrap();
        assert_eq!(proposition.statut, Statut::Confirmee);
        assert_eq!(proposition.checklist_actuelle.decision_courante(), Some("FAC_VALIDE"));

        proposition.mettre_a_valider("fac").unwrap();
        proposition.valider("iufc").unwrap();
        assert_eq!(proposition.statut, Statut::InscriptionAutorisee);
        assert_eq!(proposition.auteur_derniere_modification, "iufc");
    }

    #[test]
    fn test_validation_requires_pending_validation() {
        let mut proposition = soumise();
        let avant = proposition.clone();

        let erreur = proposition.valider("fac").unwrap_err();

        assert_eq!(erreur.exceptions, vec![BusinessException::ValiderPropositionTransitionStatut]);
        assert_eq!(proposition, avant);
    }

    #[test]
    fn test_refusal_is_terminal() {
        let mut proposition = soumise();
        proposition.refuser(motif(), "fac").unwrap();
        assert!(proposition.statut.est_terminal());

        let erreur = proposition.cloturer("fac").unwrap_err();
        assert_eq!(erreur.exceptions, vec![BusinessException::SituationPropositionNonFAC]);
    }

    #[test]
    fn test_cancellation_without_reason() {
        let mut proposition = soumise();
        let erreur = proposition.annuler(Motif::default(), "fac").unwrap_err();
        assert_eq!(erreur.exceptions, vec![BusinessException::MotifNonSpecifie]);
        assert!(proposition.est_en_cours());
    }
}
