// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Doctorate Business Rules
//!
//! One validator per rule, composed into one validator list per action. Lists
//! declare their validators in the order the failures must be reported.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer

use crate::domain::doctorat::checklist::{catalogue, OngletsChecklistDoctorat, DECISION_CDD};
use crate::domain::doctorat::groupe_de_supervision::{
    ChoixEtatSignature, Cotutelle, GroupeDeSupervision, RoleSignataire, MAXIMUM_MEMBRES_CA,
    MAXIMUM_PROMOTEURS,
};
use crate::domain::doctorat::proposition::{
    ChoixTypeCompteBancaire, Comptabilite, ExperiencePrecedenteRecherche, Financement,
    PropositionDoctorat,
};
use crate::domain::doctorat::statuts::*;
use crate::domain::shared::checklist::{
    ChoixStatutChecklist, ConfigurationStatutChecklist, StatutChecklist,
};
use crate::domain::shared::decision::{InformationsAcceptation, MotifsRefus};
use crate::domain::shared::exceptions::BusinessException;
use crate::domain::shared::onglets_communs::DECISION_SIC;
use crate::domain::shared::titres_acces::TitreAccesSelectionnable;
use crate::domain::shared::validation::{
    exiger, BusinessValidator, BusinessValidatorList, Regle, ShouldChecklistEtreDans,
    ShouldInformationsAcceptationEtreCompletes, ShouldMaximumPropositionsNonAtteint,
    ShouldMotifsRefusEtreSpecifies, ShouldStatutEtreDans, ShouldTitreAccesEtreSelectionne,
    Validator,
};

use ChoixStatutPropositionDoctorale as Statut;

// ============================================================================
// Validators
// ============================================================================

pub struct ShouldJustificationDonneeSiPreadmission<'a> {
    pub type_admission: ChoixTypeAdmission,
    pub justification: &'a str,
}

impl BusinessValidator for ShouldJustificationDonneeSiPreadmission<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.type_admission != ChoixTypeAdmission::PreAdmission
                || !self.justification.trim().is_empty(),
            BusinessException::JustificationRequise,
        )
    }
}

pub struct ShouldTypeContratTravailDependreTypeFinancement<'a> {
    pub financement: &'a Financement,
}

impl BusinessValidator for ShouldTypeContratTravailDependreTypeFinancement<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.financement.type_financement != Some(ChoixTypeFinancement::TravailSalarie)
                || !self.financement.type_contrat_travail.trim().is_empty(),
            BusinessException::ContratTravailInconsistant,
        )
    }
}

fn doctorat_deja_realise(experience: &ExperiencePrecedenteRecherche) -> bool {
    matches!(
        experience.doctorat_deja_realise,
        ChoixDoctoratDejaRealise::Oui | ChoixDoctoratDejaRealise::Partiel
    )
}

pub struct ShouldInstitutionDependreDoctoratRealise<'a> {
    pub experience: &'a ExperiencePrecedenteRecherche,
}

impl BusinessValidator for ShouldInstitutionDependreDoctoratRealise<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            !doctorat_deja_realise(
                self.experience,
            ) || !self.experience.institution.trim().is_empty(),
            BusinessException::InstitutionInconsistante,
        )
    }
}

pub struct ShouldDomaineDependreDoctoratRealise<'a> {
    pub experience: &'a ExperiencePrecedenteRecherche,
}

impl BusinessValidator for ShouldDomaineDependreDoctoratRealise<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            !doctorat_deja_realise(
                self.experience,
            ) || !self.experience.domaine_these.trim().is_empty(),
            BusinessException::DomaineTheseInconsistant,
        )
    }
}

pub struct ShouldAbsenceDeDetteEtreCompletee<'a> {
    pub comptabilite: &'a Comptabilite,
}

impl BusinessValidator for ShouldAbsenceDeDetteEtreCompletee<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.comptabilite.a_frequente_recemment_etablissement_communaute_fr != Some(true)
                || !self.comptabilite.attestation_absence_dette_etablissement.is_empty(),
            BusinessException::AbsenceDeDetteNonCompletee,
        )
    }
}

pub struct ShouldTypeCompteBancaireRemboursementEtreComplete<'a> {
    pub comptabilite: &'a Comptabilite,
}

impl BusinessValidator for ShouldTypeCompteBancaireRemboursementEtreComplete<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.comptabilite.etudiant_solidaire != Some(true)
                || self.comptabilite.type_numero_compte.is_some(),
            BusinessException::TypeCompteBancaireRemboursementNonComplete,
        )
    }
}

fn titulaire_renseigne(comptabilite: &Comptabilite) -> bool {
    !comptabilite.prenom_titulaire_compte.trim().is_empty()
        && !comptabilite.nom_titulaire_compte.trim().is_empty()
}

pub struct ShouldIbanCarteBancaireRemboursementEtreCompletee<'a> {
    pub comptabilite: &'a Comptabilite,
}

impl BusinessValidator for ShouldIbanCarteBancaireRemboursementEtreCompletee<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        let c = self.comptabilite;
        exiger(
            c.type_numero_compte != Some(ChoixTypeCompteBancaire::Iban)
                || (!c.numero_compte_iban.trim().is_empty()
                    && c.iban_valide == Some(true)
                    && titulaire_renseigne(c)),
            BusinessException::CarteBancaireRemboursementIbanNonComplete,
        )
    }
}

pub struct ShouldAutreFormatCarteBancaireRemboursementEtreCompletee<'a> {
    pub comptabilite: &'a Comptabilite,
}

impl BusinessValidator for ShouldAutreFormatCarteBancaireRemboursementEtreCompletee<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        let c = self.comptabilite;
        exiger(
            c.type_numero_compte != Some(ChoixTypeCompteBancaire::AutreFormat)
                || (!c.numero_compte_autre_format.trim().is_empty()
                    && !c.code_bic_swift_banque.trim().is_empty()
                    && titulaire_renseigne(c)),
            BusinessException::CarteBancaireRemboursementAutreFormatNonComplete,
        )
    }
}

pub struct ShouldMembreEtreUnique<'a> {
    pub groupe: &'a GroupeDeSupervision,
    pub matricule: &'a str,
}

impl BusinessValidator for ShouldMembreEtreUnique<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.groupe.role_de(self.matricule).is_none(),
            BusinessException::DejaMembre,
        )
    }
}

pub struct ShouldGroupeDeSupervisionNonComplet<'a> {
    pub groupe: &'a GroupeDeSupervision,
    pub role: RoleSignataire,
}

impl BusinessValidator for ShouldGroupeDeSupervisionNonComplet<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        match self.role {
            RoleSignataire::Promoteur => exiger(
                self.groupe.signatures_promoteurs.len() < MAXIMUM_PROMOTEURS,
                BusinessException::GroupeSupervisionCompletPourPromoteurs,
            ),
            RoleSignataire::MembreCa => exiger(
                self.groupe.signatures_membres_ca.len() < MAXIMUM_MEMBRES_CA,
                BusinessException::GroupeSupervisionCompletPourMembresCA,
            ),
        }
    }
}

pub struct ShouldSignataireEtreInvite<'a> {
    pub groupe: &'a GroupeDeSupervision,
    pub matricule: &'a str,
}

impl BusinessValidator for ShouldSignataireEtreInvite<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        let signature = self
            .groupe
            .signature(self.matricule)
            .ok_or(BusinessException::SignataireNonTrouve)?;
        exiger(
            signature.etat == ChoixEtatSignature::Invite,
            BusinessException::SignatairePasInvite,
        )
    }
}

pub struct ShouldCotutelleEtreComplete<'a> {
    pub cotutelle: Option<&'a Cotutelle>,
}

impl BusinessValidator for ShouldCotutelleEtreComplete<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        exiger(
            self.cotutelle.map(Cotutelle::est_complete).unwrap_or(false),
            BusinessException::CotutelleNonComplete,
        )
    }
}

/// The CDD decision must not have been taken yet to send the file back to SIC.
pub struct ShouldDecisionCddPermettreEnvoiAuSic<'a> {
    pub statut: &'a ChoixStatutPropositionDoctorale,
    pub decision_cdd: &'a StatutChecklist,
}

impl BusinessValidator for ShouldDecisionCddPermettreEnvoiAuSic<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        let statut_onglet_ok = matches!(
            self.decision_cdd.statut,
            Some(ChoixStatutChecklist::InitialCandidat)
                | Some(ChoixStatutChecklist::GestEnCours)
                | Some(ChoixStatutChecklist::GestBlocage)
        );
        let decision = self.decision_cdd.extra.get("decision").map(String::as_str);
        exiger(
            STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_CDD.contains(self.statut)
                && statut_onglet_ok
                && !matches!(decision, Some("EN_DECISION") | Some("CLOTURE")),
            BusinessException::SituationPropositionNonCdd,
        )
    }
}

pub struct ShouldDecisionCddEtreDifferenteCloture<'a> {
    pub decision_cdd: &'a StatutChecklist,
}

impl BusinessValidator for ShouldDecisionCddEtreDifferenteCloture<'_> {
    fn validate(&self) -> Result<(), BusinessException> {
        let cloture = catalogue()
            .configuration(DECISION_CDD, "CLOTURE")
            .ok_or_else(|| BusinessException::ConfigurationChecklistInconnue {
                onglet: DECISION_CDD.to_string(),
            })?;
        exiger(
            !self.decision_cdd.correspond_a(cloture),
            BusinessException::StatutChecklistDecisionCddDoitEtreDifferentCloture,
        )
    }
}

fn exiger_configurations<'a>(
    noeud: &'a StatutChecklist,
    onglet: &str,
    identifiants: &[&str],
    exception: BusinessException,
) -> ShouldChecklistEtreDans<'a> {
    let configurations: Vec<&ConfigurationStatutChecklist> = catalogue()
        .onglet(onglet)
        .map(|o| {
            o.statuts
                .iter()
                .filter(|config| identifiants.contains(&config.identifiant.as_str()))
                .collect()
        })
        .unwrap_or_default();
    ShouldChecklistEtreDans {
        noeud,
        configurations,
        exception,
    }
}

fn statut_sic(statut: &ChoixStatutPropositionDoctorale) -> Validator<'_> {
    Box::new(ShouldStatutEtreDans {
        statut,
        autorises: STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_SIC,
        exception: BusinessException::SituationPropositionNonSIC,
    })
}

fn statut_cdd(statut: &ChoixStatutPropositionDoctorale) -> Validator<'_> {
    Box::new(ShouldStatutEtreDans {
        statut,
        autorises: STATUTS_PROPOSITION_DOCTORALE_SOUMISE_POUR_CDD,
        exception: BusinessException::SituationPropositionNonCdd,
    })
}

fn statut_brouillon(statut: &ChoixStatutPropositionDoctorale) -> Validator<'_> {
    Box::new(ShouldStatutEtreDans {
        statut,
        autorises: &[Statut::EnBrouillon],
        exception: BusinessException::ProcedureDemandeSignatureLancee,
    })
}

// ============================================================================
// Validator lists: candidate
// ============================================================================

pub struct InitierPropositionValidatorList<'a> {
    pub type_admission: ChoixTypeAdmission,
    pub justification: &'a str,
    pub nombre_propositions_en_cours: usize,
    pub maximum_propositions: usize,
}

impl BusinessValidatorList for InitierPropositionValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldJustificationDonneeSiPreadmission {
            type_admission: self.type_admission,
            justification: self.justification,
        })]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldMaximumPropositionsNonAtteint {
            nombre_propositions_en_cours: self.nombre_propositions_en_cours,
            maximum_propositions: self.maximum_propositions,
        })]
    }
}

pub struct CompleterPropositionValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionDoctorale,
    pub type_admission: ChoixTypeAdmission,
    pub justification: &'a str,
    pub financement: &'a Financement,
    pub experience: &'a ExperiencePrecedenteRecherche,
}

impl BusinessValidatorList for CompleterPropositionValidatorList<'_> {
    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![
            statut_brouillon(self.statut),
            Box::new(ShouldJustificationDonneeSiPreadmission {
                type_admission: self.type_admission,
                justification: self.justification,
            }),
            Box::new(ShouldTypeContratTravailDependreTypeFinancement {
                financement: self.financement,
            }),
            Box::new(ShouldInstitutionDependreDoctoratRealise {
                experience: self.experience,
            }),
            Box::new(ShouldDomaineDependreDoctoratRealise {
                experience: self.experience,
            }),
        ]
    }
}

pub struct ModifierTypeAdmissionValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionDoctorale,
    pub type_admission: ChoixTypeAdmission,
    pub justification: &'a str,
}

impl BusinessValidatorList for ModifierTypeAdmissionValidatorList<'_> {
    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![
            statut_brouillon(self.statut),
            Box::new(ShouldJustificationDonneeSiPreadmission {
                type_admission: self.type_admission,
                justification: self.justification,
            }),
        ]
    }
}

fn validators_comptabilite(comptabilite: &Comptabilite) -> Vec<Validator<'_>> {
    vec![
        Box::new(ShouldAbsenceDeDetteEtreCompletee { comptabilite }),
        Box::new(ShouldTypeCompteBancaireRemboursementEtreComplete { comptabilite }),
        Box::new(ShouldIbanCarteBancaireRemboursementEtreCompletee { comptabilite }),
        Box::new(ShouldAutreFormatCarteBancaireRemboursementEtreCompletee { comptabilite }),
    ]
}

pub struct ComptabiliteValidatorList<'a> {
    pub comptabilite: &'a Comptabilite,
}

impl BusinessValidatorList for ComptabiliteValidatorList<'_> {
    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        validators_comptabilite(self.comptabilite)
    }
}

// ============================================================================
// Validator lists: supervision
// ============================================================================

pub struct IdentifierMembreValidatorList<'a> {
    pub groupe: &'a GroupeDeSupervision,
    pub matricule: &'a str,
    pub role: RoleSignataire,
    pub personne_connue: bool,
}

impl BusinessValidatorList for IdentifierMembreValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(Regle(move || {
            exiger(self.personne_connue, BusinessException::SignataireNonTrouve)
        }))]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![
            Box::new(ShouldMembreEtreUnique {
                groupe: self.groupe,
                matricule: self.matricule,
            }),
            Box::new(ShouldGroupeDeSupervisionNonComplet {
                groupe: self.groupe,
                role: self.role,
            }),
        ]
    }
}

pub struct CotutelleValidatorList<'a> {
    pub cotutelle: Option<&'a Cotutelle>,
}

impl BusinessValidatorList for CotutelleValidatorList<'_> {
    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldCotutelleEtreComplete {
            cotutelle: self.cotutelle,
        })]
    }
}

pub struct ApprobationSignataireValidatorList<'a> {
    pub groupe: &'a GroupeDeSupervision,
    pub matricule: &'a str,
}

impl BusinessValidatorList for ApprobationSignataireValidatorList<'_> {
    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldSignataireEtreInvite {
            groupe: self.groupe,
            matricule: self.matricule,
        })]
    }
}

pub struct RefusSignataireValidatorList<'a> {
    pub groupe: &'a GroupeDeSupervision,
    pub matricule: &'a str,
    pub motif_refus: &'a str,
}

impl BusinessValidatorList for RefusSignataireValidatorList<'_> {
    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        let promoteur = self.groupe.role_de(self.matricule) == Some(RoleSignataire::Promoteur);
        vec![
            Box::new(ShouldSignataireEtreInvite {
                groupe: self.groupe,
                matricule: self.matricule,
            }),
            Box::new(Regle(move || {
                exiger(
                    !promoteur || !self.motif_refus.trim().is_empty(),
                    BusinessException::MotifRefusSignataireNonSpecifie,
                )
            })),
        ]
    }
}

pub struct DemandeSignaturesValidatorList<'a> {
    pub proposition: &'a PropositionDoctorat,
    pub groupe: &'a GroupeDeSupervision,
}

impl BusinessValidatorList for DemandeSignaturesValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_brouillon(&self.proposition.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        let groupe = self.groupe;
        vec![
            Box::new(Regle(move || {
                exiger(
                    self.proposition.projet.est_complet(),
                    BusinessException::DetailProjetNonComplete,
                )
            })),
            Box::new(ShouldCotutelleEtreComplete {
                cotutelle: groupe.cotutelle.as_ref(),
            }),
            Box::new(Regle(move || {
                exiger(
                    !groupe.signatures_membres_ca.is_empty(),
                    BusinessException::MembreCAManquant,
                )
            })),
            Box::new(Regle(move || {
                exiger(
                    !groupe.signatures_promoteurs.is_empty(),
                    BusinessException::PromoteurManquant,
                )
            })),
            Box::new(Regle(move || {
                exiger(
                    groupe.promoteur_reference.is_some(),
                    BusinessException::PromoteurDeReferenceManquant,
                )
            })),
        ]
    }
}

pub struct SoumettrePropositionValidatorList<'a> {
    pub proposition: &'a PropositionDoctorat,
    pub groupe: &'a GroupeDeSupervision,
}

impl BusinessValidatorList for SoumettrePropositionValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldStatutEtreDans {
            statut: &self.proposition.statut,
            autorises: &[Statut::EnAttenteDeSignature],
            exception: BusinessException::PropositionNonEnAttenteDeSignature,
        })]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        let groupe = self.groupe;
        let mut validators: Vec<Validator<'_>> = vec![
            Box::new(Regle(move || {
                exiger(
                    groupe.signature_en_cours(),
                    BusinessException::ProcedureDemandeSignatureNonLancee,
                )
            })),
            Box::new(Regle(move || {
                exiger(
                    groupe.tous_promoteurs_ont_approuve(),
                    BusinessException::PropositionNonApprouveeParPromoteur,
                )
            })),
            Box::new(Regle(move || {
                exiger(
                    groupe.tous_membres_ca_ont_approuve(),
                    BusinessException::PropositionNonApprouveeParMembresCA,
                )
            })),
        ];
        validators.extend(validators_comptabilite(&self.proposition.comptabilite));
        validators
    }
}

// ============================================================================
// Validator lists: checklist, CDD and SIC
// ============================================================================

pub struct EnvoyerAuSicLorsDeLaDecisionCddValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionDoctorale,
    pub decision_cdd: &'a StatutChecklist,
}

impl BusinessValidatorList for EnvoyerAuSicLorsDeLaDecisionCddValidatorList<'_> {
    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldDecisionCddPermettreEnvoiAuSic {
            statut: self.statut,
            decision_cdd: self.decision_cdd,
        })]
    }
}

pub struct RefuserParCddValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionDoctorale,
    pub decision_cdd: &'a StatutChecklist,
    pub motifs: &'a MotifsRefus,
}

impl BusinessValidatorList for RefuserParCddValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_cdd(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![
            Box::new(ShouldMotifsRefusEtreSpecifies {
                motifs: self.motifs,
                exception: BusinessException::MotifRefusCDDNonSpecifie,
            }),
            Box::new(ShouldDecisionCddEtreDifferenteCloture {
                decision_cdd: self.decision_cdd,
            }),
        ]
    }
}

pub struct ApprouverParCddValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionDoctorale,
    pub decision_cdd: &'a StatutChecklist,
    pub titres_acces: &'a [TitreAccesSelectionnable],
    pub informations: &'a InformationsAcceptation,
}

impl BusinessValidatorList for ApprouverParCddValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_cdd(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![
            Box::new(ShouldTitreAccesEtreSelectionne {
                titres: self.titres_acces,
                exception: BusinessException::TitreAccesEtreSelectionnePourEnvoyerASIC,
            }),
            Box::new(ShouldDecisionCddEtreDifferenteCloture {
                decision_cdd: self.decision_cdd,
            }),
            Box::new(ShouldInformationsAcceptationEtreCompletes {
                informations: Some(self.informations),
                exception: BusinessException::InformationsAcceptationNonSpecifiees,
            }),
        ]
    }
}

pub struct CloturerParCddValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionDoctorale,
    pub decision_cdd: &'a StatutChecklist,
}

impl BusinessValidatorList for CloturerParCddValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_cdd(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldDecisionCddEtreDifferenteCloture {
            decision_cdd: self.decision_cdd,
        })]
    }
}

pub struct SpecifierMotifsRefusParSicValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionDoctorale,
    pub motifs: &'a MotifsRefus,
}

impl BusinessValidatorList for SpecifierMotifsRefusParSicValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_sic(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(ShouldMotifsRefusEtreSpecifies {
            motifs: self.motifs,
            exception: BusinessException::MotifRefusNonSpecifie,
        })]
    }
}

pub struct RefuserAdmissionParSicValidatorList<'a> {
    pub statut: &'a ChoixStatutPropositionDoctorale,
    pub decision_sic: &'a StatutChecklist,
}

impl BusinessValidatorList for RefuserAdmissionParSicValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_sic(self.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        vec![Box::new(exiger_configurations(
            self.decision_sic,
            DECISION_SIC,
            &["REFUS_A_VALIDER"],
            BusinessException::DecisionSicNonAValider,
        ))]
    }
}

/// Final SIC approval of an admission or an enrolment request.
pub struct ApprouverParSicValidatorList<'a> {
    pub proposition: &'a PropositionDoctorat,
    pub type_demande_attendu: ChoixTypeDemande,
    pub titres_acces: &'a [TitreAccesSelectionnable],
}

impl BusinessValidatorList for ApprouverParSicValidatorList<'_> {
    fn data_contract_validators(&self) -> Vec<Validator<'_>> {
        vec![statut_sic(&self.proposition.statut)]
    }

    fn invariants_validators(&self) -> Vec<Validator<'_>> {
        let checklist = &self.proposition.checklist_actuelle;
        let mut validators: Vec<Validator<'_>> = Vec::new();

        match self.type_demande_attendu {
            ChoixTypeDemande::Admission => validators.push(Box::new(
                Regle(move || {
                    exiger(
                        self.proposition.type_demande == ChoixTypeDemande::Admission,
                        BusinessException::DemandeDoitEtreAdmission,
                    )
                }),
            )),
            ChoixTypeDemande::Inscription => {
                validators.push(Box::new(Regle(move || {
                    exiger(
                        self.proposition.type_demande == ChoixTypeDemande::Inscription,
                        BusinessException::DemandeDoitEtreInscription,
                    )
                })));
                validators.push(Box::new(Regle(move || {
                    let sic = OngletsChecklistDoctorat::DecisionSic;
                    let accord = checklist.decision_sic.extra.get("derogation").map(String::as_str)
                        == Some("ACCORD_DIRECTION");
                    let derogation = checklist.est_dans(sic, "BESOIN_DEROGATION") && accord;
                    exiger(
                        checklist.est_dans(sic, "A_TRAITER") || derogation,
                        BusinessException::EtatChecklistDecisionSicNonValidePourApprouverUneInscription,
                    )
                })));
            }
        }

        validators.push(Box::new(Regle(move || {
            exiger(
                checklist.est_dans(OngletsChecklistDoctorat::ParcoursAnterieur, "SUFFISANT"),
                BusinessException::ParcoursAnterieurNonSuffisant,
            )
        })));
        validators.push(Box::new(Regle(move || {
            exiger(
                matches!(
                    checklist.financabilite.statut,
                    Some(
                        ChoixStatutChecklist::InitialNonConcerne,
                    ) | Some(ChoixStatutChecklist::GestReussite)
                ),
                BusinessException::EtatChecklistFinancabiliteNonValidePourApprouverDemande,
            )
        })));
        validators.push(Box::new(Regle(move || {
            exiger(
                checklist.donnees_personnelles.statut == Some(ChoixStatutChecklist::GestReussite),
                BusinessException::EtatChecklistDonneesPersonnellesNonValidePourApprouverDemande,
            )
        })));
        validators.push(Box::new(ShouldTitreAccesEtreSelectionne {
            titres: self.titres_acces,
            exception: BusinessException::TitreAccesEtreSelectionnePourEnvoyerASIC,
        }));
        validators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completer_collects_every_failure_in_order() {
        let financement = Financement {
            type_financement: Some(ChoixTypeFinancement::TravailSalarie),
            ..Default::default()
        };
        let experience = ExperiencePrecedenteRecherche {
            doctorat_deja_realise: ChoixDoctoratDejaRealise::Partiel,
            ..Default::default()
        };

        let erreur = CompleterPropositionValidatorList {
            statut: &Statut::EnBrouillon,
            type_admission: ChoixTypeAdmission::PreAdmission,
            justification: "",
            financement: &financement,
            experience: &experience,
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            erreur.exceptions,
            vec![
                BusinessException::JustificationRequise,
                BusinessException::ContratTravailInconsistant,
                BusinessException::InstitutionInconsistante,
                BusinessException::DomaineTheseInconsistant,
            ]
        );
    }

    #[test]
    fn test_comptabilite_rules() {
        let comptabilite = Comptabilite {
            a_frequente_recemment_etablissement_communaute_fr: Some(true),
            etudiant_solidaire: Some(true),
            type_numero_compte: Some(ChoixTypeCompteBancaire::Iban),
            ..Default::default()
        };

        let erreur = ComptabiliteValidatorList {
            comptabilite: &comptabilite,
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            erreur.status_codes(),
            vec!["DOCTORAT-1", "DOCTORAT-5"]
        );
    }

    #[test]
    fn test_cdd_approval_reports_doctorate_acceptance_code() {
        let erreur = ApprouverParCddValidatorList {
            statut: &Statut::TraitementFac,
            decision_cdd: &StatutChecklist::new(
                "To be processed",
                ChoixStatutChecklist::InitialCandidat,
            ),
            titres_acces: &[],
            informations: &InformationsAcceptation::default(),
        }
        .validate()
        .unwrap_err();

        assert_eq!(erreur.status_codes(), vec!["PROPOSITION-56", "DOCTORAT-12"]);
        assert!(erreur
            .exceptions
            .contains(&BusinessException::InformationsAcceptationNonSpecifiees));
    }
}
