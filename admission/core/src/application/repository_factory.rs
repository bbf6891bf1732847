// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Repository Factory
//!
//! Picks the repository implementation matching the configured storage backend.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Keeps backend selection out of the handlers

use crate::domain::doctorat::groupe_de_supervision::GroupeDeSupervisionRepository;
use crate::domain::shared::repository::{
    PropositionAggregate, PropositionRepository, StorageBackend, TitreAccesSelectionnableRepository,
};
use crate::infrastructure::repositories::postgres::{
    PostgresGroupeDeSupervisionRepository, PostgresPropositionRepository,
    PostgresTitreAccesSelectionnableRepository,
};
use crate::infrastructure::repositories::{
    InMemoryGroupeDeSupervisionRepository, InMemoryPropositionRepository,
    InMemoryTitreAccesSelectionnableRepository,
};
use anyhow::{anyhow, Result};
use sqlx::PgPool;
use std::sync::Arc;

fn exiger_pool(pool: Option<&PgPool>) -> Result<PgPool> {
    pool.cloned()
        .ok_or_else(|| anyhow!("PostgreSQL backend selected but no connection pool was opened"))
}

/// Create a proposition repository for one admission context based on the
/// storage backend.
pub fn create_proposition_repository<P: PropositionAggregate>(
    backend: &StorageBackend,
    pool: Option<&PgPool>,
) -> Result<Arc<dyn PropositionRepository<P>>> {
    Ok(match backend {
        StorageBackend::InMemory => Arc::new(InMemoryPropositionRepository::<P>::new()),
        StorageBackend::PostgreSQL(_) => Arc::new(
            PostgresPropositionRepository::<P>::new(exiger_pool(pool)?),
        ),
    })
}

/// Create a supervision group repository based on the storage backend.
pub fn create_groupe_repository(
    backend: &StorageBackend,
    pool: Option<&PgPool>,
) -> Result<Arc<dyn GroupeDeSupervisionRepository>> {
    Ok(match backend {
        StorageBackend::InMemory => Arc::new(InMemoryGroupeDeSupervisionRepository::new()),
        StorageBackend::PostgreSQL(_) => Arc::new(
            PostgresGroupeDeSupervisionRepository::new(exiger_pool(pool)?),
        ),
    })
}

/// Create the selectable access title repository based on the storage backend.
pub fn create_titres_repository(
    backend: &StorageBackend,
    pool: Option<&PgPool>,
) -> Result<Arc<dyn TitreAccesSelectionnableRepository>> {
    Ok(match backend {
        StorageBackend::InMemory => Arc::new(InMemoryTitreAccesSelectionnableRepository::new()),
        StorageBackend::PostgreSQL(_) => {
            Arc::new(PostgresTitreAccesSelectionnableRepository::new(exiger_pool(pool)?))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::doctorat::proposition::PropositionDoctorat;
    use crate::domain::shared::repository::PostgresConfig;

    #[test]
    fn test_postgres_backend_requires_a_pool() {
        let backend = StorageBackend::PostgreSQL(PostgresConfig {
            connection_string: "postgres://localhost/admission".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        });
        assert!(create_proposition_repository::<PropositionDoctorat>(&backend, None).is_err());
        assert!(create_groupe_repository(&backend, None).is_err());
    }

    #[tokio::test]
    async fn test_in_memory_backend_starts_empty() {
        let repository = create_proposition_repository::<PropositionDoctorat>(
            &StorageBackend::InMemory,
            None,
        )
        .unwrap();
        assert!(repository.search(None).await.unwrap().is_empty());
    }
}
