//! Repository trait for url mapping storage.

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for url mappings, keyed by short code with an owner index.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Inserts a new mapping if its short code is not used yet.
    ///
    /// The uniqueness check and the insert are a single atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` if found
    /// - `Ok(None)` if no mapping uses that code
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Lists every mapping owned by `owner_id` in insertion order.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<UrlMapping>, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
