// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the repository traits defined in
//! `crate::domain::shared::repository` and `crate::domain::doctorat`.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve domain aggregates
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! ## PostgreSQL Repositories
//!
//! Aggregates stored as JSONB next to their version counter:
//! - **PostgresPropositionRepository** - one table for the three contexts, discriminated by `contexte`
//! - **PostgresGroupeDeSupervisionRepository** - doctorate supervision groups
//! - **PostgresTitreAccesSelectionnableRepository** - selectable access titles
//!
//! ## In-Memory Repositories
//!
//! Lightweight implementations for tests and local runs, seeded with
//! fixtures and resettable between scenarios.

pub mod postgres;

use crate::domain::doctorat::groupe_de_supervision::{
    GroupeDeSupervision, GroupeDeSupervisionRepository,
};
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::repository::{
    AggregateVersionne, PropositionAggregate, PropositionRepository, RepositoryError,
    TitreAccesSelectionnableRepository,
};
use crate::domain::shared::titres_acces::TitreAccesSelectionnable;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Version check shared by the in-memory stores: returns the version to store.
fn prochaine_version<A: AggregateVersionne>(
    entite: &str,
    stocke: Option<&A>,
    agregat: &A,
) -> Result<u64, RepositoryError> {
    let attendue = stocke.map(AggregateVersionne::version).unwrap_or(0);
    if agregat.version() != attendue {
        return Err(RepositoryError::Conflict {
            entity: entite.to_string(),
            expected: agregat.version(),
            found: attendue,
        });
    }
    Ok(attendue + 1)
}

struct Etat<P> {
    propositions: HashMap<Uuid, P>,
    derniere_reference: u64,
}

#[derive(Clone)]
pub struct InMemoryPropositionRepository<P> {
    etat: Arc<RwLock<Etat<P>>>,
    fixtures: Arc<Vec<P>>,
}

impl<P: PropositionAggregate> InMemoryPropositionRepository<P> {
    pub fn new() -> Self {
        Self::with_fixtures(Vec::new())
    }

    /// Repository pre-loaded with `fixtures`, restored by [`reset`](Self::reset).
    pub fn with_fixtures(fixtures: Vec<P>) -> Self {
        Self {
            etat: Arc::new(RwLock::new(Self::etat_initial(&fixtures))),
            fixtures: Arc::new(fixtures),
        }
    }

    fn etat_initial(fixtures: &[P]) -> Etat<P> {
        Etat {
            derniere_reference: fixtures.iter().map(
                PropositionAggregate::reference,
            )
            .max().unwrap_or(0),
            propositions: fixtures.iter().map(|p| (p.cle(), p.clone())).collect(),
        }
    }

    pub async fn reset(&self) {
        *self.etat.write().await = Self::etat_initial(&self.fixtures);
    }
}

impl<P: PropositionAggregate> Default for InMemoryPropositionRepository<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<P: PropositionAggregate> PropositionRepository<P> for InMemoryPropositionRepository<P> {
    async fn get(&self, entity_id: &PropositionIdentity) -> Result<P, RepositoryError> {
        let etat = self.etat.read().await;
        etat.propositions
            .get(&entity_id.0)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(entity_id.to_string()))
    }

    async fn save(&self, proposition: &P) -> Result<u64, RepositoryError> {
        let mut etat = self.etat.write().await;
        let version = prochaine_version(
            P::CONTEXTE,
            etat.propositions.get(&proposition.cle()),
            proposition,
        )?;
        let mut stockee = proposition.clone();
        stockee.definir_version(version);
        etat.propositions.insert(stockee.cle(), stockee);
        Ok(version)
    }

    async fn search(&self, matricule_candidat: Option<&str>) -> Result<Vec<P>, RepositoryError> {
        let etat = self.etat.read().await;
        let mut propositions: Vec<P> = etat
            .propositions
            .values()
            .filter(|p| matricule_candidat.map_or(true, |m| p.matricule_candidat() == m))
            .cloned()
            .collect();
        propositions.sort_by_key(PropositionAggregate::reference);
        Ok(propositions)
    }

    async fn get_next_reference(&self) -> Result<u64, RepositoryError> {
        let mut etat = self.etat.write().await;
        etat.derniere_reference += 1;
        Ok(etat.derniere_reference)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryGroupeDeSupervisionRepository {
    groupes: Arc<RwLock<HashMap<PropositionIdentity, GroupeDeSupervision>>>,
}

impl InMemoryGroupeDeSupervisionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reset(&self) {
        self.groupes.write().await.clear();
    }
}

#[async_trait]
impl GroupeDeSupervisionRepository for InMemoryGroupeDeSupervisionRepository {
    async fn get_by_proposition_id(
        &self,
        proposition_id: &PropositionIdentity,
    ) -> Result<GroupeDeSupervision, RepositoryError> {
        self.groupes
            .read()
            .await
            .get(proposition_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(proposition_id.to_string()))
    }

    async fn save(&self, groupe: &GroupeDeSupervision) -> Result<u64, RepositoryError> {
        let mut groupes = self.groupes.write().await;
        let version = prochaine_version(
            "groupe_de_supervision",
            groupes.get(&groupe.proposition_id),
            groupe,
        )?;
        let mut stocke = groupe.clone();
        stocke.definir_version(version);
        groupes.insert(stocke.proposition_id, stocke);
        Ok(version)
    }

    async fn search_by_membre(
        &self,
        matricule: &str,
    ) -> Result<Vec<GroupeDeSupervision>, RepositoryError> {
        Ok(self
            .groupes
            .read()
            .await
            .values()
            .filter(|g| g.role_de(matricule).is_some())
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTitreAccesSelectionnableRepository {
    titres: Arc<RwLock<Vec<TitreAccesSelectionnable>>>,
}

impl InMemoryTitreAccesSelectionnableRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reset(&self) {
        self.titres.write().await.clear();
    }
}

#[async_trait]
impl TitreAccesSelectionnableRepository for InMemoryTitreAccesSelectionnableRepository {
    async fn search_by_proposition(
        &self,
        proposition_id: &PropositionIdentity,
    ) -> Result<Vec<TitreAccesSelectionnable>, RepositoryError> {
        Ok(self
            .titres
            .read()
            .await
            .iter()
            .filter(|t| &t.proposition_id == proposition_id)
            .cloned()
            .collect())
    }

    async fn save(&self, titre: &TitreAccesSelectionnable) -> Result<(), RepositoryError> {
        let mut titres = self.titres.write().await;
        match titres.iter_mut().find(|t| {
            t.proposition_id == titre.proposition_id
                && t.uuid_experience == titre.uuid_experience
                && t.type_titre == titre.type_titre
        }) {
            Some(existant) => *existant = titre.clone(),
            None => titres.push(titre.clone()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::formation_generale::proposition::{FormationGenerale, PropositionGenerale};
    use crate::domain::shared::titres_acces::{TrainingType, TypeTitreAccesSelectionnable};

    fn proposition(matricule: &str, reference: u64) -> PropositionGenerale {
        PropositionGenerale::initier(
            matricule.to_string(),
            FormationGenerale {
                sigle: "SINF1BA".into(),
                annee: 2024,
                training_type: TrainingType::Bachelor,
            },
            reference,
            0,
            5,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_increments_version_and_detects_conflicts() {
        let repo = InMemoryPropositionRepository::<PropositionGenerale>::new();
        let mut p = proposition("0001", 1);

        assert_eq!(repo.save(&p).await.unwrap(), 1);
        let perime = p.clone();
        p.definir_version(1);
        assert_eq!(repo.save(&p).await.unwrap(), 2);

        let erreur = repo.save(&perime).await.unwrap_err();
        assert_eq!(
            erreur,
            RepositoryError::Conflict {
                entity: "formation_generale".into(),
                expected: 0,
                found: 2
            }
        );
    }

    #[tokio::test]
    async fn test_fixtures_and_reset() {
        let fixture = proposition("0001", 7);
        let repo = InMemoryPropositionRepository::with_fixtures(vec![fixture.clone()]);
        assert_eq!(repo.get_next_reference().await.unwrap(), 8);

        repo.save(&proposition("0002", 8)).await.unwrap();
        assert_eq!(repo.search(None).await.unwrap().len(), 2);
        assert_eq!(repo.search(Some("0002")).await.unwrap().len(), 1);

        repo.reset().await;
        assert_eq!(repo.search(None).await.unwrap(), vec![fixture]);
        assert!(matches!(
            repo.get(&PropositionIdentity::new()).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_titles_are_upserted() {
        let repo = InMemoryTitreAccesSelectionnableRepository::new();
        let proposition_id = PropositionIdentity::new();
        let mut titre = TitreAccesSelectionnable {
            proposition_id,
            uuid_experience: "exp-1".into(),
            type_titre: TypeTitreAccesSelectionnable::ExperiencesAcademiques,
            annee: Some(2020),
            selectionne: false,
        };
        repo.save(&titre).await.unwrap();
        titre.selectionne = true;
        repo.save(&titre).await.unwrap();

        let titres = repo.search_by_proposition(&proposition_id).await.unwrap();
        assert_eq!(titres, vec![titre]);
    }
}
