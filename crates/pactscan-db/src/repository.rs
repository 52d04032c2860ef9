//! Analysis record repository.
//!
//! Records are created once and never mutated. Every query filters by the
//! owning user; a record belonging to a different user is indistinguishable
//! from an absent one.

use crate::cache::AnalysisCache;
use pactscan_core::models::{Analysis, AnalysisRow, NewAnalysis};
use pactscan_core::AppError;
use sqlx::{PgPool, Postgres};
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone)]
pub struct AnalysisRepository {
    pool: PgPool,
}

impl AnalysisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "analyses", db.operation = "insert"))]
    pub async fn create(&self, new: NewAnalysis) -> Result<Analysis, AppError> {
        let id = Uuid::new_v4();

        let row: AnalysisRow = sqlx::query_as::<Postgres, AnalysisRow>(
            r#"
            INSERT INTO analyses (
                id, user_id, contract_type, summary, risks, opportunities,
                extracted_text, model, language
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, contract_type, summary, risks, opportunities,
                      extracted_text, model, language, created_at
            "#,
        )
        .bind(id)
        .bind(new.user_id)
        .bind(&new.contract_type)
        .bind(&new.summary)
        .bind(sqlx::types::Json(&new.risks))
        .bind(sqlx::types::Json(&new.opportunities))
        .bind(&new.extracted_text)
        .bind(&new.model)
        .bind(&new.language)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(db.table = "analyses", db.operation = "select"))]
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Analysis>, AppError> {
        let rows: Vec<AnalysisRow> = sqlx::query_as::<Postgres, AnalysisRow>(
            r#"
            SELECT id, user_id, contract_type, summary, risks, opportunities,
                   extracted_text, model, language, created_at
            FROM analyses
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Analysis::from).collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "analyses", db.operation = "select"))]
    pub async fn get_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Analysis>, AppError> {
        let row: Option<AnalysisRow> = sqlx::query_as::<Postgres, AnalysisRow>(
            r#"
            SELECT id, user_id, contract_type, summary, risks, opportunities,
                   extracted_text, model, language, created_at
            FROM analyses
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Analysis::from))
    }
}

/// Read-through store over the repository and the record cache.
///
/// `get_by_id` checks the cache first and populates it on a miss; creates
/// and listings go straight to the database. Cache entries are never
/// invalidated because records are immutable after creation.
#[derive(Clone)]
pub struct CachedAnalysisStore {
    repository: AnalysisRepository,
    cache: AnalysisCache,
}

impl CachedAnalysisStore {
    pub fn new(repository: AnalysisRepository, cache_ttl: Duration) -> Self {
        Self {
            repository,
            cache: AnalysisCache::new(cache_ttl),
        }
    }

    pub async fn create(&self, new: NewAnalysis) -> Result<Analysis, AppError> {
        self.repository.create(new).await
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Analysis>, AppError> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn get_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Analysis>, AppError> {
        if let Some(analysis) = self.cache.get_owned(user_id, id).await {
            tracing::debug!(analysis_id = %id, "Analysis cache hit");
            return Ok(Some(analysis));
        }

        let analysis = self.repository.get_by_id(user_id, id).await?;
        if let Some(ref found) = analysis {
            self.cache.insert(found.clone()).await;
        }
        Ok(analysis)
    }
}
