// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # General Education Proposition Aggregate
//!
//! Bachelor and master admission request. After submission the application
//! fees may block the file (`FRAIS_DOSSIER_EN_ATTENTE`) until paid or waived;
//! the faculty then decides before the central enrolment office.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Aggregate root:** [`PropositionGenerale`]

use crate::domain::doctorat::statuts::ChoixTypeDemande;
use crate::domain::formation_generale::checklist::{
    configuration, configuration_experience, OngletsChecklistGenerale, StatutsChecklistGenerale,
};
use crate::domain::formation_generale::statuts::*;
use crate::domain::formation_generale::validators::*;
use crate::domain::shared::checklist::{ChoixStatutChecklist, ConfigurationStatutChecklist};
use crate::domain::shared::decision::{
    DocumentsDemandes, EtatAuthentificationParcours, InformationsAcceptation, MotifsRefus,
};
use crate::domain::shared::exceptions::{BusinessException, MultipleBusinessExceptions};
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::onglets_communs::extra_authentification;
use crate::domain::shared::repository::{AggregateVersionne, PropositionAggregate};
use crate::domain::shared::titres_acces::{ConditionAcces, TitreAccesSelectionnable, TrainingType};
use crate::domain::shared::validation::{
    valider_statut, BusinessValidatorList, ModifierStatutChecklistParcoursAnterieurValidatorList,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ChoixStatutPropositionGenerale as Statut;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationGenerale {
    pub sigle: String,
    pub annee: u32,
    pub training_type: TrainingType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropositionGenerale {
    pub entity_id: PropositionIdentity,
    pub reference: u64,
    pub matricule_candidat: String,
    pub statut: ChoixStatutPropositionGenerale,
    pub formation: FormationGenerale,
    pub type_demande: ChoixTypeDemande,
    #[serde(default)]
    pub curriculum: Vec<String>,
    #[serde(default)]
    pub equivalence_diplome: Vec<String>,
    pub est_reorientation_inscription_externe: Option<bool>,
    pub condition_acces: Option<ConditionAcces>,
    pub millesime_condition_acces: Option<u32>,
    #[serde(default)]
    pub motifs_refus: MotifsRefus,
    pub informations_acceptation: Option<InformationsAcceptation>,
    #[serde(default)]
    pub documents_demandes: DocumentsDemandes,
    pub soumise_le: Option<DateTime<Utc>>,
    pub checklist_initiale: Option<StatutsChecklistGenerale>,
    #[serde(default)]
    pub checklist_actuelle: StatutsChecklistGenerale,
    pub auteur_derniere_modification: String,
    #[serde(default)]
    pub version: u64,
}

impl PropositionGenerale {
    pub fn initier(
        matricule_candidat: String,
        formation: FormationGenerale,
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
            auteur_derniere_modification: matricule_candidat.clone(),
            matricule_candidat,
            statut: Statut::EnBrouillon,
            formation,
            type_demande: ChoixTypeDemande::Admission,
            curriculum: Vec::new(),
            equivalence_diplome: Vec::new(),
            est_reorientation_inscription_externe: None,
            condition_acces: None,
            millesime_condition_acces: None,
            motifs_refus: MotifsRefus::default(),
            informations_acceptation: None,
            documents_demandes: DocumentsDemandes::new(),
            soumise_le: None,
            checklist_initiale: None,
            checklist_actuelle: StatutsChecklistGenerale::default(),
            version: 0,
        })
    }

    fn modifier_statut(&mut self, statut: Statut, auteur: &str) {
        self.statut = statut;
        self.auteur_derniere_modification = auteur.to_string();
    }

    fn appliquer_checklist(
        &mut self,
        onglet: OngletsChecklistGenerale,
        config: &ConfigurationStatutChecklist,
    ) {
        self.checklist_actuelle.onglet_mut(onglet).appliquer(config);
    }

    fn verifier_brouillon(&self) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            &[Statut::EnBrouillon],
            BusinessException::PropositionNonBrouillon,
        )
    }

    fn verifier_sic(&self) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_SIC,
            BusinessException::SituationPropositionNonSIC,
        )
    }

    // ----- candidate -----

    pub fn completer_curriculum(
        &mut self,
        curriculum: Vec<String>,
        equivalence_diplome: Vec<String>,
        est_reorientation_inscription_externe: Option<bool>,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_brouillon()?;
        self.curriculum = curriculum;
        self.equivalence_diplome = equivalence_diplome;
        self.est_reorientation_inscription_externe = est_reorientation_inscription_externe;
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    /// Submission; the file waits for the application fees when the candidate
    /// must pay them.
    pub fn soumettre(
        &mut self,
        type_demande: ChoixTypeDemande,
        checklist: StatutsChecklistGenerale,
        doit_payer_frais_dossier: bool,
        maintenant: DateTime<Utc>,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_brouillon()?;

        self.type_demande = type_demande;
        self.checklist_actuelle = checklist.clone();
        self.checklist_initiale = Some(checklist);
        self.soumise_le = Some(maintenant);
        let statut = if doit_payer_frais_dossier {
            Statut::FraisDossierEnAttente
        } else {
            Statut::Confirmee
        };
        self.modifier_statut(statut, auteur);
        Ok(())
    }

    pub fn supprimer(&mut self, auteur: &str) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_brouillon()?;
        self.modifier_statut(Statut::Annulee, auteur);
        Ok(())
    }

    // ----- application fees -----

    pub fn specifier_paiement_necessaire_par_gestionnaire(
        &mut self,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            &[Statut::Confirmee],
            BusinessException::PropositionPourPaiementInvalide,
        )?;
        let config = configuration(OngletsChecklistGenerale::FraisDossier, "A_PAYER")?;
        self.appliquer_checklist(OngletsChecklistGenerale::FraisDossier, config);
        self.modifier_statut(Statut::FraisDossierEnAttente, auteur);
        Ok(())
    }

    /// Waives the fees: `GEST_REUSSITE` marks the candidate as dispensed,
    /// `INITIAL_NON_CONCERNE` as not concerned.
    pub fn specifier_paiement_plus_necessaire(
        &mut self,
        statut_frais_dossier: ChoixStatutChecklist,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        SpecifierPaiementPlusNecessaireValidatorList {
            frais_dossier_initial: self.checklist_initiale.as_ref().map(|c| &c.frais_dossier),
            frais_dossier_actuel: &self.checklist_actuelle.frais_dossier,
        }
        .validate()?;

        let identifiant = match statut_frais_dossier {
            ChoixStatutChecklist::GestReussite => "DISPENSE",
            ChoixStatutChecklist::InitialNonConcerne => "NON_CONCERNE",
            _ => {
                return Err(BusinessException::ConfigurationChecklistInconnue {
                    onglet: OngletsChecklistGenerale::FraisDossier.name().to_string(),
                }
                .into())
            }
        };
        let config = configuration(OngletsChecklistGenerale::FraisDossier, identifiant)?;
        self.appliquer_checklist(OngletsChecklistGenerale::FraisDossier, config);
        if self.statut == Statut::FraisDossierEnAttente {
            self.statut = Statut::Confirmee;
        }
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    pub fn payer_frais_dossier(&mut self, auteur: &str) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            &[Statut::FraisDossierEnAttente],
            BusinessException::PropositionPourPaiementInvalide,
        )?;
        let config = configuration(OngletsChecklistGenerale::FraisDossier, "PAYE")?;
        self.appliquer_checklist(OngletsChecklistGenerale::FraisDossier, config);
        self.modifier_statut(Statut::Confirmee, auteur);
        Ok(())
    }

    // ----- documents -----

    pub fn reclamer_documents_par_fac(
        &mut self,
        documents: DocumentsDemandes,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_FAC,
            BusinessException::SituationPropositionNonFAC,
        )?;
        self.documents_demandes = documents;
        self.modifier_statut(Statut::ACompleterPourFac, auteur);
        Ok(())
    }

    pub fn reclamer_documents_par_sic(
        &mut self,
        documents: DocumentsDemandes,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_sic()?;
        self.documents_demandes = documents;
        self.modifier_statut(Statut::ACompleterPourSic, auteur);
        Ok(())
    }

    pub fn annuler_reclamation_documents_par_fac(
        &mut self,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            &[Statut::ACompleterPourFac],
            BusinessException::SituationPropositionNonFAC,
        )?;
        self.documents_demandes.clear();
        self.modifier_statut(Statut::TraitementFac, auteur);
        Ok(())
    }

    pub fn annuler_reclamation_documents_par_sic(
        &mut self,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            &[Statut::ACompleterPourSic],
            BusinessException::SituationPropositionNonSIC,
        )?;
        self.documents_demandes.clear();
        self.modifier_statut(Statut::Confirmee, auteur);
        Ok(())
    }

    pub fn completer_documents_par_candidat(
        &mut self,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        let suivant = match self.statut {
            Statut::ACompleterPourFac => Statut::CompleteePourFac,
            Statut::ACompleterPourSic => Statut::CompleteePourSic,
            _ => return Err(BusinessException::DocumentsNonReclames.into()),
        };
        self.documents_demandes.clear();
        self.modifier_statut(suivant, auteur);
        Ok(())
    }

    // ----- checklist -----

    /// Generic tab update used by the staff. Tabs carrying business rules
    /// only move through their own commands.
    pub fn modifier_statut_checklist(
        &mut self,
        onglet: OngletsChecklistGenerale,
        config: &ConfigurationStatutChecklist,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        let mut autorises = STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_SIC.to_vec();
        autorises.extend_from_slice(STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_FAC_ETENDUS);
        valider_statut(&self.statut, &autorises, BusinessException::SituationPropositionNonSIC)?;
        if onglet.a_commande_dediee() {
            return Err(BusinessException::OngletChecklistReserve {
                onglet: onglet.name().to_string(),
            }
            .into());
        }

        self.ecrire_checklist(onglet, config, auteur);
        Ok(())
    }

    fn ecrire_checklist(
        &mut self,
        onglet: OngletsChecklistGenerale,
        config: &ConfigurationStatutChecklist,
        auteur: &str,
    ) {
        self.appliquer_checklist(onglet, config);
        self.auteur_derniere_modification = auteur.to_string();
    }

    pub fn modifier_statut_checklist_parcours_anterieur(
        &mut self,
        config: &ConfigurationStatutChecklist,
        titres_acces: &[TitreAccesSelectionnable],
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        ModifierStatutChecklistParcoursAnterieurValidatorList {
            parcours_anterieur: &self.checklist_actuelle.parcours_anterieur,
            statut_cible: config.statut,
            titres_acces,
            condition_acces: self.condition_acces,
            millesime_condition_acces: self.millesime_condition_acces,
        }
        .validate()?;

        self.ecrire_checklist(OngletsChecklistGenerale::ParcoursAnterieur, config, auteur);
        Ok(())
    }

    pub fn modifier_statut_checklist_experience(
        &mut self,
        uuid_experience: &str,
        config: &ConfigurationStatutChecklist,
        auteur: &str,
    ) -> Result<(), BusinessException> {
        let enfant = self
            .checklist_actuelle
            .parcours_anterieur
            .recuperer_enfant_mut(uuid_experience)
            .ok_or(BusinessException::ExperienceNonTrouvee)?;
        enfant.appliquer(config);
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    pub fn modifier_authentification_experience(
        &mut self,
        uuid_experience: &str,
        etat: EtatAuthentificationParcours,
        auteur: &str,
    ) -> Result<(), BusinessException> {
        let authentification = configuration_experience("AUTHENTIFICATION")?;
        let enfant = self
            .checklist_actuelle
            .parcours_anterieur
            .recuperer_enfant_mut(uuid_experience)
            .ok_or(BusinessException::ExperienceNonTrouvee)?;
        if !enfant.correspond_a(authentification) {
            return Err(BusinessException::ExperienceNonEnAuthentification);
        }
        enfant.extra.extend(extra_authentification(etat));
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    pub fn specifier_condition_acces(
        &mut self,
        condition_acces: Option<ConditionAcces>,
        millesime: Option<u32>,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        let mut autorises = STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_SIC.to_vec();
        autorises.extend_from_slice(STATUTS_PROPOSITION_GENERALE_SOUMISE_POUR_FAC_ETENDUS);
        valider_statut(&self.statut, &autorises, BusinessException::SituationPropositionNonSIC)?;

        self.condition_acces = condition_acces;
        self.millesime_condition_acces = millesime;
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    // ----- faculty decision -----

    pub fn envoyer_a_fac_lors_de_la_decision_facultaire(
        &mut self,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            STATUTS_PROPOSITION_GENERALE_ENVOYABLE_EN_FAC_POUR_DECISION,
            BusinessException::SituationPropositionNonSIC,
        )?;
        self.modifier_statut(Statut::TraitementFac, auteur);
        Ok(())
    }

    pub fn envoyer_au_sic_lors_de_la_decision_facultaire(
        &mut self,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        EnvoyerAuSicLorsDeLaDecisionFacultaireValidatorList {
            statut: &self.statut,
            decision_facultaire: &self.checklist_actuelle.decision_facultaire,
        }
        .validate()?;

        let config = configuration(
            OngletsChecklistGenerale::DecisionFacultaire,
            "A_COMPLETER_PAR_SIC",
        )?;
        self.appliquer_checklist(OngletsChecklistGenerale::DecisionFacultaire, config);
        self.modifier_statut(Statut::RetourDeFac, auteur);
        Ok(())
    }

    pub fn refuser_par_fac(
        &mut self,
        motifs: MotifsRefus,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        RefuserParFacValidatorList {
            statut: &self.statut,
            motifs: &motifs,
        }
        .validate()?;

        let config = configuration(OngletsChecklistGenerale::DecisionFacultaire, "REFUS")?;
        self.motifs_refus = motifs;
        self.appliquer_checklist(OngletsChecklistGenerale::DecisionFacultaire, config);
        self.modifier_statut(Statut::RetourDeFac, auteur);
        Ok(())
    }

    pub fn approuver_par_fac(
        &mut self,
        informations: InformationsAcceptation,
        titres_acces: &[TitreAccesSelectionnable],
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        ApprouverParFacValidatorList {
            statut: &self.statut,
            titres_acces,
            informations: &informations,
        }
        .validate()?;

        let config = configuration(OngletsChecklistGenerale::DecisionFacultaire, "ACCORD")?;
        self.informations_acceptation = Some(informations);
        self.appliquer_checklist(OngletsChecklistGenerale::DecisionFacultaire, config);
        self.modifier_statut(Statut::RetourDeFac, auteur);
        Ok(())
    }

    pub fn approuver_reorientation_externe_par_fac(
        &mut self,
        titres_acces: &[TitreAccesSelectionnable],
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        ApprouverReorientationExterneParFacValidatorList {
            statut: &self.statut,
            est_reorientation_inscription_externe: self.est_reorientation_inscription_externe,
            condition_acces: self.condition_acces,
            titres_acces,
        }
        .validate()?;

        let config = configuration(OngletsChecklistGenerale::DecisionFacultaire, "ACCORD")?;
        self.appliquer_checklist(OngletsChecklistGenerale::DecisionFacultaire, config);
        self.modifier_statut(Statut::RetourDeFac, auteur);
        Ok(())
    }

    // ----- enrolment office -----

    pub fn approuver_admission_par_sic(
        &mut self,
        titres_acces: &[TitreAccesSelectionnable],
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        ApprouverAdmissionParSicValidatorList {
            statut: &self.statut,
            parcours_anterieur_suffisant: self
                .checklist_actuelle
                .est_dans(OngletsChecklistGenerale::ParcoursAnterieur, "SUFFISANT"),
            titres_acces,
        }
        .validate()?;

        let config = configuration(OngletsChecklistGenerale::DecisionSic, "AUTORISE")?;
        self.appliquer_checklist(OngletsChecklistGenerale::DecisionSic, config);
        self.modifier_statut(Statut::InscriptionAutorisee, auteur);
        Ok(())
    }

    pub fn refuser_admission_par_sic(
        &mut self,
        motifs: MotifsRefus,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        RefuserAdmissionParSicValidatorList {
            statut: &self.statut,
            motifs: &motifs,
        }
        .validate()?;

        let config = configuration(OngletsChecklistGenerale::DecisionSic, "REFUSE")?;
        self.motifs_refus = motifs;
        self.appliquer_checklist(OngletsChecklistGenerale::DecisionSic, config);
        self.modifier_statut(Statut::InscriptionRefusee, auteur);
        Ok(())
    }
}

impl AggregateVersionne for PropositionGenerale {
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

impl PropositionAggregate for PropositionGenerale {
    const CONTEXTE: &'static str = "formation_generale";

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

    fn proposition() -> PropositionGenerale {
        PropositionGenerale::initier(
            "0001".into(),
            FormationGenerale {
                sigle: "SINF1BA".into(),
                annee: 2024,
                training_type: TrainingType::Bachelor,
            },
            1,
            0,
            5,
        )
        .unwrap()
    }

    #[test]
    fn test_send_to_sic_during_faculty_decision() {
        let mut proposition = proposition();
        proposition.statut = Statut::TraitementFac;
        let identite = proposition.entity_id;

        proposition.envoyer_au_sic_lors_de_la_decision_facultaire("fac").unwrap();

        assert_eq!(proposition.statut, Statut::RetourDeFac);
        assert_eq!(proposition.entity_id, identite);
        assert!(proposition
            .checklist_actuelle
            .est_dans(OngletsChecklistGenerale::DecisionFacultaire, "A_COMPLETER_PAR_SIC"));
    }

    #[test]
    fn test_submission_waits_for_fees() {
        let mut proposition = proposition();
        proposition
            .soumettre(
                ChoixTypeDemande::Admission,
                StatutsChecklistGenerale::default(),
                true,
                Utc::now(),
                "0001",
            )
            .unwrap();
        assert_eq!(proposition.statut, Statut::FraisDossierEnAttente);

        proposition.payer_frais_dossier("0001").unwrap();
        assert_eq!(proposition.statut, Statut::Confirmee);
        assert!(proposition
            .checklist_actuelle
            .est_dans(OngletsChecklistGenerale::FraisDossier, "PAYE"));
    }

    #[test]
    fn test_paid_fees_cannot_be_waived() {
        let mut proposition = proposition();
        proposition.statut = Statut::Confirmee;
        proposition.payer_frais_dossier("0001").unwrap_err();

        let paye = configuration(OngletsChecklistGenerale::FraisDossier, "PAYE").unwrap();
        proposition.checklist_actuelle.frais_dossier.appliquer(paye);

        let erreur = proposition
            .specifier_paiement_plus_necessaire(ChoixStatutChecklist::GestReussite, "sic")
            .unwrap_err();
        assert_eq!(erreur.exceptions, vec![BusinessException::PropositionPourPaiementInvalide]);
    }

    #[test]
    fn test_waived_fees_labels() {
        let mut proposition = proposition();
        proposition.statut = Statut::FraisDossierEnAttente;

        proposition
            .specifier_paiement_plus_necessaire(ChoixStatutChecklist::GestReussite, "sic")
            .unwrap();
        assert_eq!(proposition.statut, Statut::Confirmee);
        assert_eq!(proposition.checklist_actuelle.frais_dossier.libelle, "Dispensed");

        proposition
            .specifier_paiement_plus_necessaire(ChoixStatutChecklist::InitialNonConcerne, "sic")
            .unwrap();
        assert_eq!(proposition.checklist_actuelle.frais_dossier.libelle, "Not concerned");
    }
}
