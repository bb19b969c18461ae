//! Creation and lookup of url mappings.

use std::sync::Arc;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
use serde_json::json;

/// Default number of candidate codes tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Owns mapping creation (code assignment with collision retry) and lookup.
///
/// The owner is always passed explicitly; the registry never reads any
/// ambient authentication state.
pub struct MappingRegistry<M: MappingRepository + ?Sized> {
    repository: Arc<M>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
}

impl<M: MappingRepository + ?Sized> MappingRegistry<M> {
    /// Creates a registry drawing codes from [`RandomCodeGenerator`].
    pub fn new(repository: Arc<M>) -> Self {
        Self::with_generator(repository, Arc::new(RandomCodeGenerator), DEFAULT_MAX_ATTEMPTS)
    }

    /// Creates a registry with an explicit code source and retry budget.
    ///
    /// A `max_attempts` of zero is treated as one.
    pub fn with_generator(
        repository: Arc<M>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a new mapping owned by `owner_id`.
    ///
    /// The URL is stored verbatim. Each attempt draws a code, skips it if a
    /// mapping already uses it, and otherwise inserts. A uniqueness conflict
    /// on insert (a concurrent create drew the same code) also counts as a
    /// collision.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original_url` is blank.
    /// Returns [`AppError::CodeSpaceExhausted`] if every attempt collided.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    #[tracing::instrument(skip(self, original_url))]
    pub async fn create(&self, original_url: &str, owner_id: i64) -> Result<UrlMapping, AppError> {
        if original_url.trim().is_empty() {
            return Err(AppError::bad_request(
                "Original URL must not be empty",
                json!({ "field": "originalUrl" }),
            ));
        }

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();

            if self.repository.find_by_code(&code).await?.is_some() {
                tracing::debug!(attempt, code = %code, "Short code collision");
                continue;
            }

            let new_mapping = NewMapping {
                short_code: code.clone(),
                original_url: original_url.to_string(),
                owner_id,
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    tracing::info!(code = %mapping.short_code, "Mapping created");
                    return Ok(mapping);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, code = %code, "Short code taken concurrently");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            attempts = self.max_attempts,
            "Failed to assign a unique short code"
        );

        Err(AppError::code_space_exhausted(
            "Failed to generate unique code",
            json!({ "attempts": self.max_attempts }),
        ))
    }

    /// Looks a mapping up by short code.
    ///
    /// `Ok(None)` is the ordinary "no such link" outcome.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        self.repository.find_by_code(short_code).await
    }

    /// Lists all mappings owned by `owner_id`.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<UrlMapping>, AppError> {
        self.repository.list_by_owner(owner_id).await
    }
}
