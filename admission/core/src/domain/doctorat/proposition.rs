// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Doctorate Proposition Aggregate
//!
//! Admission request of a candidate to a doctoral training, from the draft
//! edited by the candidate, through the signature of the supervision group, to
//! the decisions of the doctoral committee (CDD) and the central enrolment
//! office (SIC).
//!
//! Every state-changing method first runs the validator list of the action and
//! only mutates the aggregate when all rules hold. Mutations stamp
//! `auteur_derniere_modification`.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Aggregate root:** [`PropositionDoctorat`]
//! - **Repository:** `PropositionRepository<PropositionDoctorat>`

use crate::domain::doctorat::checklist::{
    configuration, configuration_experience, OngletsChecklistDoctorat, StatutsChecklistDoctorale,
};
use crate::domain::doctorat::groupe_de_supervision::GroupeDeSupervision;
use crate::domain::doctorat::statuts::*;
use crate::domain::doctorat::validators::*;
use crate::domain::shared::checklist::{
    ChoixStatutChecklist, ConfigurationStatutChecklist, ExtraChecklist,
};
use crate::domain::shared::decision::{
    BesoinDeDerogation, DerogationFinancement, DocumentsDemandes, EtatAuthentificationParcours,
    InformationsAcceptation, MotifsRefus,
};
use crate::domain::shared::exceptions::{BusinessException, MultipleBusinessExceptions};
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::onglets_communs::extra_authentification;
use crate::domain::shared::repository::{AggregateVersionne, PropositionAggregate};
use crate::domain::shared::titres_acces::{ConditionAcces, TitreAccesSelectionnable, TrainingType};
use crate::domain::shared::validation::{
    valider_statut, BusinessValidatorList, ModifierStatutChecklistParcoursAnterieurValidatorList,
};
use crate::vocabulaire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ChoixStatutPropositionDoctorale as Statut;

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationDoctorale {
    pub sigle: String,
    pub annee: u32,
    pub training_type: TrainingType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Financement {
    pub type_financement: Option<ChoixTypeFinancement>,
    pub type_contrat_travail: String,
    pub eft: Option<u32>,
    pub bourse_recherche: Option<String>,
    pub duree_prevue: Option<u32>,
    pub temps_consacre: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailProjet {
    pub titre: String,
    pub resume: String,
    pub langue_redaction_these: String,
    pub institut_these: Option<String>,
    pub lieu_these: String,
    pub documents: Vec<String>,
    pub proposition_programme_doctoral: Vec<String>,
}

impl DetailProjet {
    pub fn est_complet(&self) -> bool {
        !self.titre.trim().is_empty()
            && !self.resume.trim().is_empty()
            && !self.langue_redaction_these.trim().is_empty()
            && !self.documents.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperiencePrecedenteRecherche {
    pub doctorat_deja_realise: ChoixDoctoratDejaRealise,
    pub institution: String,
    pub domaine_these: String,
    pub date_soutenance: Option<chrono::NaiveDate>,
    pub raison_non_soutenue: String,
}

impl Default for ExperiencePrecedenteRecherche {
    fn default() -> Self {
        Self {
            doctorat_deja_realise: ChoixDoctoratDejaRealise::Non,
            institution: String::new(),
            domaine_these: String::new(),
            date_soutenance: None,
            raison_non_soutenue: String::new(),
        }
    }
}

vocabulaire! {
    pub enum ChoixTypeCompteBancaire {
        Iban => "IBAN",
        AutreFormat => "AUTRE_FORMAT",
        Non => "NON",
    }
}

/// Accounting block filled by the candidate before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comptabilite {
    pub a_frequente_recemment_etablissement_communaute_fr: Option<bool>,
    pub attestation_absence_dette_etablissement: Vec<String>,
    pub demande_allocation_etudes_communaute_francaise: Option<bool>,
    pub etudiant_solidaire: Option<bool>,
    pub type_numero_compte: Option<ChoixTypeCompteBancaire>,
    pub numero_compte_iban: String,
    pub iban_valide: Option<bool>,
    pub numero_compte_autre_format: String,
    pub code_bic_swift_banque: String,
    pub prenom_titulaire_compte: String,
    pub nom_titulaire_compte: String,
}

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropositionDoctorat {
    pub entity_id: PropositionIdentity,
    pub reference: u64,
    pub matricule_candidat: String,
    pub statut: ChoixStatutPropositionDoctorale,
    pub formation: FormationDoctorale,
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
    #[serde(default)]
    pub comptabilite: Comptabilite,
    pub type_demande: ChoixTypeDemande,
    pub condition_acces: Option<ConditionAcces>,
    pub millesime_condition_acces: Option<u32>,
    #[serde(default)]
    pub motifs_refus: MotifsRefus,
    pub informations_acceptation: Option<InformationsAcceptation>,
    pub besoin_de_derogation: Option<BesoinDeDerogation>,
    pub financabilite_regle: Option<String>,
    pub financabilite_etabli_par: Option<String>,
    #[serde(default)]
    pub financabilite_derogation_statut: DerogationFinancement,
    #[serde(default)]
    pub documents_demandes: DocumentsDemandes,
    pub approuvee_par_cdd_le: Option<DateTime<Utc>>,
    pub soumise_le: Option<DateTime<Utc>>,
    pub checklist_initiale: Option<StatutsChecklistDoctorale>,
    #[serde(default)]
    pub checklist_actuelle: StatutsChecklistDoctorale,
    pub auteur_derniere_modification: String,
    #[serde(default)]
    pub version: u64,
}

/// Data of a new doctorate proposition.
#[derive(Debug, Clone)]
pub struct NouvellePropositionDoctorat {
    pub matricule_candidat: String,
    pub formation: FormationDoctorale,
    pub type_admission: ChoixTypeAdmission,
    pub justification: String,
    pub commission_proximite: Option<String>,
}

impl PropositionDoctorat {
    pub fn initier(
        donnees: NouvellePropositionDoctorat,
        reference: u64,
        nombre_propositions_en_cours: usize,
        maximum_propositions: usize,
    ) -> Result<Self, MultipleBusinessExceptions> {
        InitierPropositionValidatorList {
            type_admission: donnees.type_admission,
            justification: &donnees.justification,
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
            type_admission: donnees.type_admission,
            justification: donnees.justification,
            commission_proximite: donnees.commission_proximite,
            financement: Financement::default(),
            projet: DetailProjet::default(),
            experience_precedente_recherche: ExperiencePrecedenteRecherche::default(),
            comptabilite: Comptabilite::default(),
            type_demande: ChoixTypeDemande::Admission,
            condition_acces: None,
            millesime_condition_acces: None,
            motifs_refus: MotifsRefus::default(),
            informations_acceptation: None,
            besoin_de_derogation: None,
            financabilite_regle: None,
            financabilite_etabli_par: None,
            financabilite_derogation_statut: DerogationFinancement::NonConcerne,
            documents_demandes: DocumentsDemandes::new(),
            approuvee_par_cdd_le: None,
            soumise_le: None,
            checklist_initiale: None,
            checklist_actuelle: StatutsChecklistDoctorale::default(),
            version: 0,
        })
    }

    fn modifier_statut(&mut self, statut: Statut, auteur: &str) {
        self.statut = statut;
        self.auteur_derniere_modification = auteur.to_string();
    }

    fn appliquer_checklist(
        &mut self,
        onglet: OngletsChecklistDoctorat,
        config: &ConfigurationStatutChecklist,
    ) {
        self.checklist_actuelle.onglet_mut(onglet).appliquer(config);
    }

    // ----- candidate edition -----

    pub fn completer(
        &mut self,
        type_admission: ChoixTypeAdmission,
        justification: String,
        commission_proximite: Option<String>,
        financement: Financement,
        projet: DetailProjet,
        experience: ExperiencePrecedenteRecherche,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        CompleterPropositionValidatorList {
            statut: &self.statut,
            type_admission,
            justification: &justification,
            financement: &financement,
            experience: &experience,
        }
        .validate()?;

        self.type_admission = type_admission;
        self.justification = justification;
        self.commission_proximite = commission_proximite;
        self.financement = financement;
        self.projet = projet;
        self.experience_precedente_recherche = experience;
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    pub fn modifier_type_admission(
        &mut self,
        type_admission: ChoixTypeAdmission,
        justification: String,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        ModifierTypeAdmissionValidatorList {
            statut: &self.statut,
            type_admission,
            justification: &justification,
        }
        .validate()?;

        self.type_admission = type_admission;
        self.justification = justification;
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    pub fn completer_comptabilite(
        &mut self,
        comptabilite: Comptabilite,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        ComptabiliteValidatorList {
            comptabilite: &comptabilite,
        }
        .validate()?;

        self.comptabilite = comptabilite;
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    /// The supervision group may only change while the proposition is a draft.
    pub fn verifier_groupe_modifiable(&self) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            &[Statut::EnBrouillon],
            BusinessException::ProcedureDemandeSignatureLancee,
        )
    }

    pub fn demander_signatures(
        &mut self,
        groupe: &GroupeDeSupervision,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        DemandeSignaturesValidatorList {
            proposition: self,
            groupe,
        }
        .validate()?;

        self.modifier_statut(Statut::EnAttenteDeSignature, auteur);
        Ok(())
    }

    pub fn verifier_en_attente_de_signature(&self) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            &[Statut::EnAttenteDeSignature],
            BusinessException::PropositionNonEnAttenteDeSignature,
        )
    }

    /// The first approving supervisor must provide the thesis institute when
    /// the candidate left it empty.
    pub fn definir_institut_these(
        &mut self,
        institut_these: Option<String>,
        premier_promoteur: bool,
    ) -> Result<(), BusinessException> {
        match institut_these {
            Some(institut) if !institut.trim().is_empty() => {
                self.projet.institut_these = Some(institut);
                Ok(())
            }
            _ if premier_promoteur && self.projet.institut_these.is_none() => {
                Err(BusinessException::InstitutTheseObligatoire)
            }
            _ => Ok(()),
        }
    }

    /// Back to draft after a supervisor declined.
    pub fn reinitialiser_apres_refus_promoteur(&mut self, auteur: &str) {
        self.modifier_statut(Statut::EnBrouillon, auteur);
    }

    pub fn soumettre(
        &mut self,
        groupe: &GroupeDeSupervision,
        type_demande: ChoixTypeDemande,
        checklist: StatutsChecklistDoctorale,
        maintenant: DateTime<Utc>,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        SoumettrePropositionValidatorList {
            proposition: self,
            groupe,
        }
        .validate()?;

        self.type_demande = type_demande;
        self.checklist_actuelle = checklist.clone();
        self.checklist_initiale = Some(checklist);
        self.soumise_le = Some(maintenant);
        self.modifier_statut(Statut::Confirmee, auteur);
        Ok(())
    }

    pub fn supprimer(&mut self, auteur: &str) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            &[Statut::EnBrouillon],
            BusinessException::PropositionNonBrouillon,
        )?;
        self.modifier_statut(Statut::Annulee, auteur);
        Ok(())
    }

    // ----- document requests -----

    pub fn reclamer_documents_par_fac(
        &mut self,
        documents: DocumentsDemandes,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_CDD,
            BusinessException::SituationPropositionNonCdd,
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
        valider_statut(
            &self.statut,
            STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_SIC,
            BusinessException::SituationPropositionNonSIC,
        )?;
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
            BusinessException::SituationPropositionNonCdd,
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
        onglet: OngletsChecklistDoctorat,
        config: &ConfigurationStatutChecklist,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        let mut autorises = STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_SIC.to_vec();
        autorises.extend_from_slice(STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_CDD_ETENDUS);
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
        onglet: OngletsChecklistDoctorat,
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

        self.ecrire_checklist(OngletsChecklistDoctorat::ParcoursAnterieur, config, auteur);
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
        let mut extra: ExtraChecklist = enfant.extra.clone();
        extra.extend(extra_authentification(etat));
        enfant.extra = extra;
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    pub fn specifier_condition_acces(
        &mut self,
        condition_acces: Option<ConditionAcces>,
        millesime: Option<u32>,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        let mut autorises = STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_SIC.to_vec();
        autorises.extend_from_slice(STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_CDD_ETENDUS);
        valider_statut(&self.statut, &autorises, BusinessException::SituationPropositionNonSIC)?;

        self.condition_acces = condition_acces;
        self.millesime_condition_acces = millesime;
        self.auteur_derniere_modification = auteur.to_string();
        Ok(())
    }

    // ----- financeability -----

    fn verifier_sic(&self) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_SIC,
            BusinessException::SituationPropositionNonSIC,
        )
    }

    pub fn specifier_financabilite_regle(
        &mut self,
        regle: String,
        financable: bool,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_sic()?;
        let identifiant = if financable { "FINANCABLE" } else { "NON_FINANCABLE" };
        let config = configuration(OngletsChecklistDoctorat::Financabilite, identifiant)?;
        self.financabilite_regle = Some(regle);
        self.financabilite_etabli_par = Some(auteur.to_string());
        self.ecrire_checklist(OngletsChecklistDoctorat::Financabilite, config, auteur);
        Ok(())
    }

    pub fn specifier_financabilite_non_concernee(
        &mut self,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_sic()?;
        let config = configuration(OngletsChecklistDoctorat::Financabilite, "NON_CONCERNE")?;
        self.financabilite_regle = None;
        self.financabilite_etabli_par = Some(auteur.to_string());
        self.ecrire_checklist(OngletsChecklistDoctorat::Financabilite, config, auteur);
        Ok(())
    }

    pub fn specifier_derogation_financabilite(
        &mut self,
        derogation: DerogationFinancement,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_sic()?;
        let besoin = configuration(OngletsChecklistDoctorat::Financabilite, "BESOIN_DEROGATION")?;
        let sous_statut = configuration(
            OngletsChecklistDoctorat::Financabilite,
            &format!("BESOIN_DEROGATION.{}", derogation.name()),
        )?;
        self.financabilite_derogation_statut = derogation;
        let config = besoin.merge_statuses(sous_statut);
        self.ecrire_checklist(OngletsChecklistDoctorat::Financabilite, &config, auteur);
        Ok(())
    }

    // ----- doctoral committee -----

    pub fn envoyer_en_cdd_pour_decision(
        &mut self,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        valider_statut(
            &self.statut,
            STATUTS_PROPOSITION_DOCTORALE_ENVOYABLE_EN_CDD_POUR_DECISION,
            BusinessException::SituationPropositionNonSIC,
        )?;
        self.modifier_statut(Statut::TraitementFac, auteur);
        Ok(())
    }

    pub fn envoyer_au_sic_lors_de_la_decision_cdd(
        &mut self,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        EnvoyerAuSicLorsDeLaDecisionCddValidatorList {
            statut: &self.statut,
            decision_cdd: &self.checklist_actuelle.decision_cdd,
        }
        .validate()?;

        let config = configuration(OngletsChecklistDoctorat::DecisionCdd, "A_COMPLETER_PAR_SIC")?;
        self.appliquer_checklist(OngletsChecklistDoctorat::DecisionCdd, config);
        self.modifier_statut(Statut::RetourDeFac, auteur);
        Ok(())
    }

    pub fn refuser_par_cdd(
        &mut self,
        motifs: MotifsRefus,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        RefuserParCddValidatorList {
            statut: &self.statut,
            decision_cdd: &self.checklist_actuelle.decision_cdd,
            motifs: &motifs,
        }
        .validate()?;

        let config = configuration(OngletsChecklistDoctorat::DecisionCdd, "REFUS")?;
        self.motifs_refus = motifs;
        self.appliquer_checklist(OngletsChecklistDoctorat::DecisionCdd, config);
        self.modifier_statut(Statut::RetourDeFac, auteur);
        Ok(())
    }

    pub fn approuver_par_cdd(
        &mut self,
        informations: InformationsAcceptation,
        titres_acces: &[TitreAccesSelectionnable],
        maintenant: DateTime<Utc>,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        ApprouverParCddValidatorList {
            statut: &self.statut,
            decision_cdd: &self.checklist_actuelle.decision_cdd,
            titres_acces,
            informations: &informations,
        }
        .validate()?;

        let config = configuration(OngletsChecklistDoctorat::DecisionCdd, "ACCORD")?;
        self.informations_acceptation = Some(informations);
        self.approuvee_par_cdd_le = Some(maintenant);
        self.appliquer_checklist(OngletsChecklistDoctorat::DecisionCdd, config);
        self.modifier_statut(Statut::RetourDeFac, auteur);
        Ok(())
    }

    pub fn cloturer_par_cdd(&mut self, auteur: &str) -> Result<(), MultipleBusinessExceptions> {
        CloturerParCddValidatorList {
            statut: &self.statut,
            decision_cdd: &self.checklist_actuelle.decision_cdd,
        }
        .validate()?;

        let config = configuration(OngletsChecklistDoctorat::DecisionCdd, "CLOTURE")?;
        self.appliquer_checklist(OngletsChecklistDoctorat::DecisionCdd, config);
        self.modifier_statut(Statut::Cloturee, auteur);
        Ok(())
    }

    // ----- enrolment office -----

    pub fn specifier_besoin_de_derogation(
        &mut self,
        besoin: BesoinDeDerogation,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_sic()?;
        let parent = configuration(OngletsChecklistDoctorat::DecisionSic, "BESOIN_DEROGATION")?;
        let sous_statut = configuration(
            OngletsChecklistDoctorat::DecisionSic,
            &format!("BESOIN_DEROGATION.{}", besoin.name()),
        )?;
        self.besoin_de_derogation = Some(besoin);
        let config = parent.merge_statuses(sous_statut);
        self.ecrire_checklist(OngletsChecklistDoctorat::DecisionSic, &config, auteur);
        Ok(())
    }

    pub fn specifier_motifs_refus_par_sic(
        &mut self,
        motifs: MotifsRefus,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        SpecifierMotifsRefusParSicValidatorList {
            statut: &self.statut,
            motifs: &motifs,
        }
        .validate()?;

        let config = configuration(OngletsChecklistDoctorat::DecisionSic, "REFUS_A_VALIDER")?;
        self.motifs_refus = motifs;
        self.appliquer_checklist(OngletsChecklistDoctorat::DecisionSic, config);
        self.modifier_statut(Statut::AttenteValidationDirection, auteur);
        Ok(())
    }

    pub fn refuser_admission_par_sic(
        &mut self,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        RefuserAdmissionParSicValidatorList {
            statut: &self.statut,
            decision_sic: &self.checklist_actuelle.decision_sic,
        }
        .validate()?;

        let config = configuration(OngletsChecklistDoctorat::DecisionSic, "REFUSE")?;
        self.appliquer_checklist(OngletsChecklistDoctorat::DecisionSic, config);
        self.modifier_statut(Statut::InscriptionRefusee, auteur);
        Ok(())
    }

    pub fn specifier_informations_acceptation_par_sic(
        &mut self,
        informations: InformationsAcceptation,
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        self.verifier_sic()?;
        let config = configuration(
            OngletsChecklistDoctorat::DecisionSic,
            "AUTORISATION_A_VALIDER",
        )?;
        self.informations_acceptation = Some(informations);
        self.appliquer_checklist(OngletsChecklistDoctorat::DecisionSic, config);
        self.modifier_statut(Statut::AttenteValidationDirection, auteur);
        Ok(())
    }

    pub fn approuver_admission_par_sic(
        &mut self,
        titres_acces: &[TitreAccesSelectionnable],
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        ApprouverParSicValidatorList {
            proposition: self,
            type_demande_attendu: ChoixTypeDemande::Admission,
            titres_acces,
        }
        .validate()?;
        self.autoriser_par_sic(auteur)
    }

    pub fn approuver_inscription_par_sic(
        &mut self,
        titres_acces: &[TitreAccesSelectionnable],
        auteur: &str,
    ) -> Result<(), MultipleBusinessExceptions> {
        ApprouverParSicValidatorList {
            proposition: self,
            type_demande_attendu: ChoixTypeDemande::Inscription,
            titres_acces,
        }
        .validate()?;
        self.autoriser_par_sic(auteur)
    }

    fn autoriser_par_sic(&mut self, auteur: &str) -> Result<(), MultipleBusinessExceptions> {
        let config = configuration(OngletsChecklistDoctorat::DecisionSic, "AUTORISE")?;
        self.appliquer_checklist(OngletsChecklistDoctorat::DecisionSic, config);
        self.modifier_statut(Statut::InscriptionAutorisee, auteur);
        Ok(())
    }

    /// Status of tab `onglet` in the current checklist.
    pub fn statut_onglet(&self, onglet: OngletsChecklistDoctorat) -> Option<ChoixStatutChecklist> {
        self.checklist_actuelle.onglet(onglet).statut
    }
}

impl AggregateVersionne for PropositionDoctorat {
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

impl PropositionAggregate for PropositionDoctorat {
    const CONTEXTE: &'static str = "doctorat";

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

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn nouvelle() -> NouvellePropositionDoctorat {
        NouvellePropositionDoctorat {
            matricule_candidat: "0123".into(),
            formation: FormationDoctorale {
                sigle: "SC3DP".into(),
                annee: 2024,
                training_type: TrainingType::Phd,
            },
            type_admission: ChoixTypeAdmission::Admission,
            justification: String::new(),
            commission_proximite: None,
        }
    }

    fn en_cdd() -> PropositionDoctorat {
        let mut proposition = PropositionDoctorat::initier(nouvelle(), 1, 0, 5).unwrap();
        proposition.statut = Statut::TraitementFac;
        proposition
    }

    #[test]
    fn test_pre_admission_requires_justification() {
        let mut donnees = nouvelle();
        donnees.type_admission = ChoixTypeAdmission::PreAdmission;
        let erreur = PropositionDoctorat::initier(donnees, 1, 0, 5).unwrap_err();
        assert_eq!(erreur.exceptions, vec![BusinessException::JustificationRequise]);
    }

    #[test]
    fn test_maximum_propositions() {
        let erreur = PropositionDoctorat::initier(nouvelle(), 1, 5, 5).unwrap_err();
        assert_eq!(
            erreur.exceptions,
            vec![BusinessException::MaximumPropositionsAtteint { maximum: 5 }]
        );
    }

    #[test]
    fn test_cdd_closure() {
        let mut proposition = en_cdd();
        proposition.cloturer_par_cdd("gest").unwrap();

        assert_eq!(proposition.statut, Statut::Cloturee);
        assert!(proposition
            .checklist_actuelle
            .est_dans(OngletsChecklistDoctorat::DecisionCdd, "CLOTURE"));
        assert_eq!(proposition.auteur_derniere_modification, "gest");
    }

    #[test]
    fn test_cdd_closure_rejected_when_already_closed() {
        let mut proposition = en_cdd();
        let cloture = configuration(OngletsChecklistDoctorat::DecisionCdd, "CLOTURE").unwrap();
        proposition.checklist_actuelle.decision_cdd.appliquer(cloture);
        let avant = proposition.clone();

        let erreur = proposition.cloturer_par_cdd("gest").unwrap_err();

        assert_eq!(
            erreur.exceptions,
            vec![BusinessException::StatutChecklistDecisionCddDoitEtreDifferentCloture]
        );
        assert_eq!(proposition, avant);
    }

    #[test]
    fn test_whitelist_leaves_proposition_untouched() {
        let mut proposition = en_cdd();
        proposition.statut = Statut::Confirmee;
        let avant = proposition.clone();

        let erreur = proposition.cloturer_par_cdd("gest").unwrap_err();

        assert_eq!(erreur.exceptions, vec![BusinessException::SituationPropositionNonCdd]);
        assert_eq!(proposition, avant);
    }

    #[test]
    fn test_send_to_sic_sets_tab() {
        let mut proposition = en_cdd();
        proposition.envoyer_au_sic_lors_de_la_decision_cdd("gest").unwrap();

        assert_eq!(proposition.statut, Statut::RetourDeFac);
        assert!(proposition
            .checklist_actuelle
            .est_dans(OngletsChecklistDoctorat::DecisionCdd, "A_COMPLETER_PAR_SIC"));
    }

    #[test]
    fn test_document_completion_requires_request() {
        let mut proposition = en_cdd();
        assert_eq!(
            proposition.completer_documents_par_candidat("0123").unwrap_err().exceptions,
            vec![BusinessException::DocumentsNonReclames]
        );

        let mut documents = DocumentsDemandes::new();
        documents.insert("CURRICULUM".into(), "Missing page".into());
        proposition.reclamer_documents_par_fac(documents, "gest").unwrap();
        assert_eq!(proposition.statut, Statut::ACompleterPourFac);

        proposition.completer_documents_par_candidat("0123").unwrap();
        assert_eq!(proposition.statut, Statut::CompleteePourFac);
        assert!(proposition.documents_demandes.is_empty());
    }

    #[test]
    fn test_sic_derogation_child_applied() {
        let mut proposition = en_cdd();
        proposition.statut = Statut::Confirmee;
        proposition
            .specifier_besoin_de_derogation(BesoinDeDerogation::AccordDirection, "sic")
            .unwrap();

        let noeud = &proposition.checklist_actuelle.decision_sic;
        assert_eq!(noeud.statut, Some(ChoixStatutChecklist::GestEnCours));
        assert_eq!(noeud.extra.get("derogation").map(String::as_str), Some("ACCORD_DIRECTION"));
        assert!(proposition
            .checklist_actuelle
            .est_dans(OngletsChecklistDoctorat::DecisionSic, "BESOIN_DEROGATION"));
    }
}
