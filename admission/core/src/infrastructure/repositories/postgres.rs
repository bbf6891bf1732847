// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Repositories
//!
//! Aggregates are serialized to JSONB (`donnees`) next to the columns the
//! repositories filter on. `save` only updates the row whose stored `version`
//! equals the aggregate's, then increments it; a missed update is reported as
//! [`RepositoryError::Conflict`].
//!
//! The tables are created by [`crate::infrastructure::db::Database::ensure_schema`].

use crate::domain::doctorat::groupe_de_supervision::{
    GroupeDeSupervision, GroupeDeSupervisionRepository,
};
use crate::domain::shared::identite::PropositionIdentity;
use crate::domain::shared::repository::{
    PropositionAggregate, PropositionRepository, RepositoryError,
    TitreAccesSelectionnableRepository,
};
use crate::domain::shared::titres_acces::TitreAccesSelectionnable;
use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;
use std::marker::PhantomData;

fn vers_i64(valeur: u64) -> i64 {
    i64::try_from(valeur).unwrap_or(i64::MAX)
}

fn depuis_i64(valeur: i64) -> u64 {
    u64::try_from(valeur).unwrap_or(0)
}

/// Stored version of a row, `None` when the row is absent.
async fn version_stockee(
    pool: &PgPool,
    table: &str,
    uuid: uuid::Uuid,
) -> Result<Option<u64>, RepositoryError> {
    let requete = format!("SELECT version FROM {} WHERE uuid = $1", table);
    let row = sqlx::query(&requete).bind(uuid).fetch_optional(pool).await?;
    Ok(row.map(|r| depuis_i64(r.get::<i64, _>("version"))))
}

pub struct PostgresPropositionRepository<P> {
    pool: PgPool,
    _aggregate: PhantomData<fn() -> P>,
}

impl<P> PostgresPropositionRepository<P> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _aggregate: PhantomData,
        }
    }
}

#[async_trait]
impl<P: PropositionAggregate> PropositionRepository<P> for PostgresPropositionRepository<P> {
    async fn get(&self, entity_id: &PropositionIdentity) -> Result<P, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT donnees, version
            FROM admission_propositions
            WHERE uuid = $1 AND contexte = $2
            "#,
        )
        .bind(entity_id.0)
        .bind(P::CONTEXTE)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(entity_id.to_string()))?;

        let donnees: serde_json::Value = row.get("donnees");
        let mut proposition: P = serde_json::from_value(donnees)?;
        proposition.definir_version(depuis_i64(row.get("version")));
        Ok(proposition)
    }

    async fn save(&self, proposition: &P) -> Result<u64, RepositoryError> {
        let donnees = serde_json::to_value(proposition)?;
        let nouvelle_version = proposition.version() + 1;

        let resultat = if proposition.version() == 0 {
            sqlx::query(
                r#"
                INSERT INTO admission_propositions (
                    uuid, contexte, matricule_candidat, reference, version, donnees, modifiee_le
                )
                VALUES ($1, $2, $3, $4, $5, $6, NOW())
                ON CONFLICT (uuid) DO NOTHING
                "#,
            )
            .bind(proposition.cle())
            .bind(P::CONTEXTE)
            .bind(proposition.matricule_candidat())
            .bind(vers_i64(proposition.reference()))
            .bind(vers_i64(nouvelle_version))
            .bind(&donnees)
            .execute(&self.pool)
            .await?
        } else {
            sqlx::query(
                r#"
                UPDATE admission_propositions
                SET donnees = $3, version = $4, modifiee_le = NOW()
                WHERE uuid = $1 AND version = $2
                "#,
            )
            .bind(proposition.cle())
            .bind(vers_i64(proposition.version()))
            .bind(&donnees)
            .bind(vers_i64(nouvelle_version))
            .execute(&self.pool)
            .await?
        };

        if resultat.rows_affected() == 0 {
            let trouvee = version_stockee(
                &self.pool,
                "admission_propositions",
                proposition.cle(),
            )
            .await?;
            return Err(match trouvee {
                Some(found) => RepositoryError::Conflict {
                    entity: P::CONTEXTE.to_string(),
                    expected: proposition.version(),
                    found,
                },
                None => RepositoryError::NotFound(proposition.entity_id().to_string()),
            });
        }
        Ok(nouvelle_version)
    }

    async fn search(&self, matricule_candidat: Option<&str>) -> Result<Vec<P>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT donnees, version
            FROM admission_propositions
            WHERE contexte = $1 AND ($2::TEXT IS NULL OR matricule_candidat = $2)
            ORDER BY reference
            "#,
        )
        .bind(P::CONTEXTE)
        .bind(matricule_candidat)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let mut proposition: P = serde_json::from_value(row.get("donnees"))?;
                proposition.definir_version(depuis_i64(row.get("version")));
                Ok(proposition)
            })
            .collect()
    }

    async fn get_next_reference(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT nextval('admission_proposition_reference_seq') AS reference")
            .fetch_one(&self.pool)
            .await?;
        Ok(depuis_i64(row.get("reference")))
    }
}

pub struct PostgresGroupeDeSupervisionRepository {
    pool: PgPool,
}

impl PostgresGroupeDeSupervisionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn depuis_ligne(row: sqlx::postgres::PgRow) -> Result<GroupeDeSupervision, RepositoryError> {
        let mut groupe: GroupeDeSupervision = serde_json::from_value(row.get("donnees"))?;
        groupe.version = depuis_i64(row.get("version"));
        Ok(groupe)
    }
}

#[async_trait]
impl GroupeDeSupervisionRepository for PostgresGroupeDeSupervisionRepository {
    async fn get_by_proposition_id(
        &self,
        proposition_id: &PropositionIdentity,
    ) -> Result<GroupeDeSupervision, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT donnees, version
            FROM admission_groupes_de_supervision
            WHERE proposition_id = $1
            "#,
        )
        .bind(proposition_id.0)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(proposition_id.to_string()))?;

        Self::depuis_ligne(row)
    }

    async fn save(&self, groupe: &GroupeDeSupervision) -> Result<u64, RepositoryError> {
        let donnees = serde_json::to_value(groupe)?;
        let nouvelle_version = groupe.version + 1;

        let resultat = if groupe.version == 0 {
            sqlx::query(
                r#"
                INSERT INTO admission_groupes_de_supervision (uuid, proposition_id, version, donnees)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (uuid) DO NOTHING
                "#,
            )
            .bind(groupe.entity_id.0)
            .bind(groupe.proposition_id.0)
            .bind(vers_i64(nouvelle_version))
            .bind(&donnees)
            .execute(&self.pool)
            .await?
        } else {
            sqlx::query(
                r#"
                UPDATE admission_groupes_de_supervision
                SET donnees = $3, version = $4
                WHERE uuid = $1 AND version = $2
                "#,
            )
            .bind(groupe.entity_id.0)
            .bind(vers_i64(groupe.version))
            .bind(&donnees)
            .bind(vers_i64(nouvelle_version))
            .execute(&self.pool)
            .await?
        };

        if resultat.rows_affected() == 0 {
            let trouvee = version_stockee(
                &self.pool,
                "admission_groupes_de_supervision",
                groupe.entity_id.0,
            )
            .await?;
            return Err(match trouvee {
                Some(found) => RepositoryError::Conflict {
                    entity: "groupe_de_supervision".to_string(),
                    expected: groupe.version,
                    found,
                },
                None => RepositoryError::NotFound(groupe.entity_id.to_string()),
            });
        }
        Ok(nouvelle_version)
    }

    async fn search_by_membre(
        &self,
        matricule: &str,
    ) -> Result<Vec<GroupeDeSupervision>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT donnees, version
            FROM admission_groupes_de_supervision
            WHERE donnees->'signatures_promoteurs' @> jsonb_build_array(
                jsonb_build_object('matricule', $1::TEXT),
            )
               OR donnees->'signatures_membres_ca' @> jsonb_build_array(
                   jsonb_build_object('matricule', $1::TEXT),
               )
            "#,
        )
        .bind(matricule)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::depuis_ligne).collect()
    }
}

pub struct PostgresTitreAccesSelectionnableRepository {
    pool: PgPool,
}

impl PostgresTitreAccesSelectionnableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TitreAccesSelectionnableRepository for PostgresTitreAccesSelectionnableRepository {
    async fn search_by_proposition(
        &self,
        proposition_id: &PropositionIdentity,
    ) -> Result<Vec<TitreAccesSelectionnable>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT donnees
            FROM admission_titres_acces_selectionnables
            WHERE proposition_id = $1
            ORDER BY uuid_experience
            "#,
        )
        .bind(proposition_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Ok(serde_json::from_value(row.get("donnees"))?))
            .collect()
    }

    async fn save(&self, titre: &TitreAccesSelectionnable) -> Result<(), RepositoryError> {
        let type_titre = serde_json::to_value(titre.type_titre)?;
        sqlx::query(
            r#"
            INSERT INTO admission_titres_acces_selectionnables (proposition_id, uuid_experience, type_titre, donnees)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (proposition_id, uuid_experience, type_titre) DO UPDATE SET
                donnees = EXCLUDED.donnees
            "#,
        )
        .bind(titre.proposition_id.0)
        .bind(&titre.uuid_experience)
        .bind(type_titre.as_str().unwrap_or_default())
        .bind(serde_json::to_value(titre)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
