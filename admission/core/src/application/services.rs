// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Shared Handler Services
//!
//! Ports used by the handlers of every context, and the steps each handler
//! repeats: load, save with the optimistic version, run a side effect,
//! publish the transition.
//!
//! # Side effects
//!
//! Persistence is authoritative. History and notification run after the
//! save; a failing side effect is logged, counted in
//! `admission_side_effect_failures_total{port}` and published as
//! `DomainEvent::SideEffectFailed`, and the command still succeeds.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer

use crate::domain::events::{Contexte, PropositionEvent};
use crate::domain::shared::checklist::{
    CatalogueChecklist, ChoixStatutChecklist, ConfigurationStatutChecklist, ExtraChecklist,
    StatutChecklist,
};
use crate::domain::shared::exceptions::{AdmissionError, BusinessException};
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::profil::{
    IAcademicYearTranslator, ICurriculumTranslator, IPersonneConnueTranslator,
    IProfilCandidatTranslator,
};
use crate::domain::shared::repository::{
    PropositionAggregate, PropositionRepository, RepositoryError,
    TitreAccesSelectionnableRepository,
};
use crate::domain::shared::titres_acces::{ITitresAcces, TitreAccesSelectionnable};
use crate::infrastructure::event_bus::EventBus;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info};

/// Ports shared by the three contexts.
#[derive(Clone)]
pub struct ServicesCommuns {
    pub titres_selectionnables: Arc<dyn TitreAccesSelectionnableRepository>,
    pub profils: Arc<dyn IProfilCandidatTranslator>,
    pub curriculum: Arc<dyn ICurriculumTranslator>,
    pub annee_academique: Arc<dyn IAcademicYearTranslator>,
    pub personnes: Arc<dyn IPersonneConnueTranslator>,
    pub titres_acces: Arc<dyn ITitresAcces>,
    pub event_bus: Arc<EventBus>,
    /// Non-cancelled propositions a candidate may hold in one context.
    pub maximum_propositions: usize,
}

impl ServicesCommuns {
    /// Runs a side effect, reporting its failure without failing the command.
    pub async fn effet_secondaire<T>(
        &self,
        proposition_id: PropositionIdentity,
        port: &'static str,
        effet: impl Future<Output = Result<T, AdmissionError>>,
    ) -> Option<T> {
        match effet.await {
            Ok(valeur) => Some(valeur),
            Err(erreur) => {
                error!(%proposition_id, port, error = %erreur, "Side effect failed after save");
                metrics::counter!(
                    "admission_side_effect_failures_total",
                    "port" => port
                )
                .increment(1);
                self.event_bus
                    .publish_side_effect_failure(proposition_id, port, erreur.to_string());
                None
            }
        }
    }

    /// Logs and publishes a status change.
    pub fn publier_transition(
        &self,
        contexte: Contexte,
        proposition_id: PropositionIdentity,
        commande: &str,
        ancien_statut: &str,
        nouveau_statut: &str,
        auteur: &str,
    ) {
        info!(
            %proposition_id,
            ?contexte,
            commande,
            from = ancien_statut,
            to = nouveau_statut,
            "Proposition status changed"
        );
        self.event_bus.publish_proposition_event(PropositionEvent::StatutModifie {
            proposition_id,
            contexte,
            commande: commande.to_string(),
            ancien_statut: ancien_statut.to_string(),
            nouveau_statut: nouveau_statut.to_string(),
            auteur: auteur.to_string(),
            modifie_le: Utc::now(),
        });
    }

    /// Logs and publishes a change that leaves the status untouched.
    pub fn publier_modification(
        &self,
        contexte: Contexte,
        proposition_id: PropositionIdentity,
        commande: &str,
        auteur: &str,
    ) {
        info!(%proposition_id, ?contexte, commande, "Proposition updated");
        self.event_bus.publish_proposition_event(PropositionEvent::PropositionModifiee {
            proposition_id,
            contexte,
            commande: commande.to_string(),
            auteur: auteur.to_string(),
            modifie_le: Utc::now(),
        });
    }

    pub fn publier_checklist(
        &self,
        contexte: Contexte,
        proposition_id: PropositionIdentity,
        onglet: &str,
        configuration: &str,
        auteur: &str,
    ) {
        info!(%proposition_id, ?contexte, onglet, configuration, "Checklist tab changed");
        self.event_bus.publish_proposition_event(PropositionEvent::ChecklistModifiee {
            proposition_id,
            contexte,
            onglet: onglet.to_string(),
            configuration: configuration.to_string(),
            auteur: auteur.to_string(),
            modifie_le: Utc::now(),
        });
    }

    pub fn publier_initiation(
        &self,
        contexte: Contexte,
        proposition_id: PropositionIdentity,
        matricule: &str,
    ) {
        info!(%proposition_id, ?contexte, matricule_candidat = matricule, "Proposition initiated");
        self.event_bus.publish_proposition_event(PropositionEvent::PropositionInitiee {
            proposition_id,
            contexte,
            matricule_candidat: matricule.to_string(),
            initiee_le: Utc::now(),
        });
    }

    /// Titles known for a proposition, selected or not.
    pub async fn titres_acces_de(
        &self,
        proposition_id: &PropositionIdentity,
    ) -> Result<Vec<TitreAccesSelectionnable>, AdmissionError> {
        Ok(self.titres_selectionnables.search_by_proposition(proposition_id).await?)
    }
}

/// Loads a proposition; an absent one is reported before any rule runs.
pub async fn charger<P: PropositionAggregate>(
    repository: &dyn PropositionRepository<P>,
    proposition_id: &PropositionIdentity,
) -> Result<P, AdmissionError> {
    repository.get(proposition_id).await.map_err(|erreur| match erreur {
        RepositoryError::NotFound(_) => AdmissionError::PropositionNonTrouvee(
            proposition_id.to_string(),
        ),
        autre => AdmissionError::Repository(autre),
    })
}

/// Saves a proposition and records the version it now has in storage.
pub async fn enregistrer<P: PropositionAggregate>(
    repository: &dyn PropositionRepository<P>,
    proposition: &mut P,
) -> Result<(), AdmissionError> {
    let version = repository.save(proposition).await?;
    proposition.definir_version(version);
    Ok(())
}

/// Non-cancelled propositions of a candidate.
pub async fn nombre_propositions_en_cours<P: PropositionAggregate>(
    repository: &dyn PropositionRepository<P>,
    matricule_candidat: &str,
) -> Result<usize, AdmissionError> {
    Ok(repository
        .search(Some(matricule_candidat))
        .await?
        .iter()
        .filter(|proposition| proposition.est_en_cours())
        .count())
}

/// Configuration of `onglet` matching a raw `(statut, extra)` pair, with the
/// caller's extra entries kept.
pub fn configuration_cible(
    catalogue: &CatalogueChecklist,
    onglet: &str,
    statut: &str,
    extra: &ExtraChecklist,
) -> Result<ConfigurationStatutChecklist, BusinessException> {
    let configuration_onglet =
        catalogue
            .onglet(onglet)
            .ok_or_else(|| BusinessException::OngletChecklistInconnu {
                onglet: onglet.to_string(),
            })?;
    let trouvee = configuration_onglet
        .get_status(ChoixStatutChecklist::from_name(statut), Some(extra))
        .ok_or_else(|| BusinessException::ConfigurationChecklistInconnue {
            onglet: onglet.to_string(),
        })?;
    let mut cible = trouvee.clone();
    cible.extra.extend(extra.iter().map(|(cle, valeur)| (cle.clone(), valeur.clone())));
    Ok(cible)
}

// ============================================================================
// DTOs
// ============================================================================

/// One checklist tab as shown to the staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngletChecklistDTO {
    pub onglet: String,
    /// Identifier of the matching configuration, absent for a node no
    /// configuration describes.
    pub configuration: Option<String>,
    pub libelle: String,
    pub statut: Option<String>,
    pub extra: ExtraChecklist,
    #[serde(default)]
    pub enfants: Vec<OngletChecklistDTO>,
}

impl OngletChecklistDTO {
    pub fn depuis(catalogue: &CatalogueChecklist, onglet: &str, noeud: &StatutChecklist) -> Self {
        let configuration = catalogue.onglet(onglet).and_then(|o| o.get_status_of(noeud));
        let onglet_enfants = crate::domain::shared::onglets_communs::EXPERIENCES_PARCOURS_ANTERIEUR;
        Self {
            onglet: onglet.to_string(),
            configuration: configuration.map(|c| c.identifiant.clone()),
            libelle: configuration
                .map(|c| c.libelle.clone())
                .unwrap_or_else(|| noeud.libelle.clone()),
            statut: noeud.statut.map(|s| s.name().to_string()),
            extra: noeud.extra.clone(),
            enfants: noeud
                .enfants
                .iter()
                .map(|enfant| Self::depuis(catalogue, onglet_enfants, enfant))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::formation_generale::checklist::catalogue;
    use crate::domain::shared::checklist::extra;

    #[test]
    fn test_raw_status_is_resolved_against_the_tab() {
        let cible = configuration_cible(
            catalogue(),
            "decision_facultaire",
            "GEST_BLOCAGE",
            &extra([("decision", "EN_DECISION"), ("commentaire", "incomplet")]),
        )
        .unwrap();

        assert_eq!(cible.identifiant, "REFUS");
        assert_eq!(cible.extra.get("commentaire").map(String::as_str), Some("incomplet"));
    }

    #[test]
    fn test_unknown_tab_and_configuration() {
        assert_eq!(
            configuration_cible(
                catalogue(),
                "inconnu",
                "GEST_BLOCAGE",
                &ExtraChecklist::new(),
            )
            .unwrap_err(),
            BusinessException::OngletChecklistInconnu {
                onglet: "inconnu".to_string()
            }
        );
        assert!(matches!(
            configuration_cible(
                catalogue(),
                "decision_facultaire",
                "SYST_REUSSITE",
                &ExtraChecklist::new(),
            ),
            Err(BusinessException::ConfigurationChecklistInconnue { .. })
        ));
    }
}
