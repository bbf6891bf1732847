// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts shared by the three admission contexts. One
//! repository per aggregate root; interfaces live in the domain layer and are
//! implemented in `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `PropositionRepository<P>` | `PropositionDoctorat`, `PropositionGenerale`, `PropositionContinue` | `InMemoryPropositionRepository`, `PostgresPropositionRepository` |
//! | `GroupeDeSupervisionRepository` | `GroupeDeSupervision` | `InMemoryGroupeDeSupervisionRepository`, `PostgresGroupeDeSupervisionRepository` |
//! | `TitreAccesSelectionnableRepository` | `TitreAccesSelectionnable` | `InMemoryTitreAccesSelectionnableRepository`, `PostgresTitreAccesSelectionnableRepository` |
//!
//! ## Optimistic concurrency
//!
//! Every aggregate carries a `version`. `save` succeeds only when the stored
//! version equals the version the aggregate was loaded with; the stored
//! version is then incremented. A mismatch yields [`RepositoryError::Conflict`].

use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::titres_acces::TitreAccesSelectionnable;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage backend enum for pluggable persistence
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    PostgreSQL(PostgresConfig),
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Aggregate root persisted with an optimistic version counter.
pub trait AggregateVersionne: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    fn cle(&self) -> uuid::Uuid;
    fn version(&self) -> u64;
    fn definir_version(&mut self, version: u64);
}

/// Behaviour every proposition aggregate exposes to its repository.
pub trait PropositionAggregate: AggregateVersionne {
    /// Discriminator stored next to the serialized aggregate.
    const CONTEXTE: &'static str;

    fn entity_id(&self) -> PropositionIdentity;
    fn matricule_candidat(&self) -> &str;
    fn reference(&self) -> u64;
    /// False once the proposition was cancelled.
    fn est_en_cours(&self) -> bool;
}

/// Repository interface for proposition aggregates, one instance per context.
#[async_trait]
pub trait PropositionRepository<P: PropositionAggregate>: Send + Sync {
    /// Load a proposition, `NotFound` when absent
    async fn get(&self, entity_id: &PropositionIdentity) -> Result<P, RepositoryError>;

    /// Create or update, enforcing the version check. Returns the new version.
    async fn save(&self, proposition: &P) -> Result<u64, RepositoryError>;

    /// Propositions of one candidate, or every proposition when `None`
    async fn search(&self, matricule_candidat: Option<&str>) -> Result<Vec<P>, RepositoryError>;

    /// Next human-readable reference number
    async fn get_next_reference(&self) -> Result<u64, RepositoryError>;
}

/// Access titles the staff may select for a proposition.
#[async_trait]
pub trait TitreAccesSelectionnableRepository: Send + Sync {
    async fn search_by_proposition(
        &self,
        proposition_id: &PropositionIdentity,
    ) -> Result<Vec<TitreAccesSelectionnable>, RepositoryError>;

    async fn save(&self, titre: &TitreAccesSelectionnable) -> Result<(), RepositoryError>;
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Concurrent modification of {entity}: expected version {expected}, found {found}")]
    Conflict {
        entity: String,
        expected: u64,
        found: u64,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("Row not found".to_string()),
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}
