//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// PostgreSQL repository for url mappings.
///
/// Short code uniqueness is enforced by the `url_mappings_short_code_key`
/// constraint; a violation surfaces as [`AppError::Conflict`].
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MappingRow {
    id: i64,
    original_url: String,
    short_code: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
    click_count: i64,
}

impl From<MappingRow> for UrlMapping {
    fn from(r: MappingRow) -> Self {
        UrlMapping::new(
            r.id,
            r.original_url,
            r.short_code,
            r.owner_id,
            r.created_at,
            r.click_count,
        )
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO url_mappings (short_code, original_url, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_code, owner_id, created_at, click_count
            "#,
        )
        .bind(&new_mapping.short_code)
        .bind(&new_mapping.original_url)
        .bind(new_mapping.owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, original_url, short_code, owner_id, created_at, click_count
            FROM url_mappings
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<UrlMapping>, AppError> {
        let rows = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, original_url, short_code, owner_id, created_at, click_count
            FROM url_mappings
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
