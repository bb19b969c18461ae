//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::ClickEvent;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click events and the per-mapping counter.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ClickRow {
    id: i64,
    mapping_id: i64,
    occurred_at: DateTime<Utc>,
}

impl From<ClickRow> for ClickEvent {
    fn from(r: ClickRow) -> Self {
        ClickEvent::new(r.id, r.mapping_id, r.occurred_at)
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    /// Increments the counter and appends the event in one transaction.
    ///
    /// The `UPDATE` takes the mapping's row lock, so concurrent clicks on the
    /// same mapping serialize while other mappings proceed independently.
    async fn record_click(&self, mapping_id: i64) -> Result<ClickEvent, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE url_mappings SET click_count = click_count + 1 WHERE id = $1",
        )
        .bind(mapping_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Mapping not found",
                json!({ "mapping_id": mapping_id }),
            ));
        }

        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO click_events (mapping_id)
            VALUES ($1)
            RETURNING id, mapping_id, occurred_at
            "#,
        )
        .bind(mapping_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn clicks_between(
        &self,
        mapping_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClickEvent>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, mapping_id, occurred_at
            FROM click_events
            WHERE mapping_id = $1
              AND occurred_at >= $2
              AND occurred_at <= $3
            ORDER BY occurred_at
            "#,
        )
        .bind(mapping_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn clicks_for_owner(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<ClickEvent>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT ce.id, ce.mapping_id, ce.occurred_at
            FROM click_events ce
            JOIN url_mappings um ON um.id = ce.mapping_id
            WHERE um.owner_id = $1
              AND ce.occurred_at >= $2
              AND ce.occurred_at < $3
            ORDER BY ce.occurred_at
            "#,
        )
        .bind(owner_id)
        .bind(from)
        .bind(until)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
