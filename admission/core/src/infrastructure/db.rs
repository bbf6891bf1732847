// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Connection Pool
//!
//! Wraps `sqlx::postgres::PgPool` in a thin `Database` newtype injected into
//! the PostgreSQL repository implementations. Only used when
//! `spec.storage.backend` is `postgres`.

use crate::domain::shared::repository::PostgresConfig;
use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

const SCHEMA: &[&str] = &[
    "CREATE SEQUENCE IF NOT EXISTS admission_proposition_reference_seq",
    r#"CREATE TABLE IF NOT EXISTS admission_propositions (
        uuid UUID PRIMARY KEY,
        contexte TEXT NOT NULL,
        matricule_candidat TEXT NOT NULL,
        reference BIGINT NOT NULL,
        version BIGINT NOT NULL,
        donnees JSONB NOT NULL,
        modifiee_le TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    "CREATE INDEX IF NOT EXISTS admission_propositions_candidat ON admission_propositions (contexte, matricule_candidat)",
    r#"CREATE TABLE IF NOT EXISTS admission_groupes_de_supervision (
        uuid UUID PRIMARY KEY,
        proposition_id UUID NOT NULL UNIQUE,
        version BIGINT NOT NULL,
        donnees JSONB NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS admission_titres_acces_selectionnables (
        proposition_id UUID NOT NULL,
        uuid_experience TEXT NOT NULL,
        type_titre TEXT NOT NULL,
        donnees JSONB NOT NULL,
        PRIMARY KEY (proposition_id, uuid_experience, type_titre)
    )"#,
];

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(config: &PostgresConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.connection_string)
            .await?;

        Ok(Self { pool })
    }

    /// Creates the admission tables when missing.
    pub async fn ensure_schema(&self) -> Result<()> {
        for instruction in SCHEMA {
            sqlx::query(instruction).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}
