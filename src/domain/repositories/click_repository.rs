//! Repository trait for click recording and click history queries.

use crate::domain::entities::ClickEvent;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Click counter and append-only click log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Increments the mapping's `click_count` and appends one click event
    /// stamped with the current time.
    ///
    /// Both effects are applied as one unit: readers never observe the
    /// counter without the event or the event without the counter.
    /// Concurrent calls for the same mapping are serialized; calls for
    /// different mappings do not contend.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the mapping does not exist.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn record_click(&self, mapping_id: i64) -> Result<ClickEvent, AppError>;

    /// Returns the mapping's click events with `from <= occurred_at <= to`.
    async fn clicks_between(
        &self,
        mapping_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClickEvent>, AppError>;

    /// Returns click events of every mapping owned by `owner_id` with
    /// `from <= occurred_at < until`.
    async fn clicks_for_owner(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<ClickEvent>, AppError>;
}
