//! Best-effort click recording on the redirect path.

use std::sync::Arc;

use crate::domain::entities::{ClickEvent, UrlMapping};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Records one click per successful resolution.
///
/// The counter increment and the event append are delegated to
/// [`ClickRepository::record_click`], which applies both atomically.
pub struct ClickRecorder<C: ClickRepository + ?Sized> {
    repository: Arc<C>,
}

impl<C: ClickRepository + ?Sized> ClickRecorder<C> {
    /// Creates a new click recorder.
    pub fn new(repository: Arc<C>) -> Self {
        Self { repository }
    }

    /// Records a click for `mapping`, swallowing failures.
    ///
    /// A failure is logged at `WARN` and yields `None`. Redirects must never
    /// fail because analytics could not be written.
    pub async fn record(&self, mapping: &UrlMapping) -> Option<ClickEvent> {
        match self.record_strict(mapping).await {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(
                    code = %mapping.short_code,
                    mapping_id = mapping.id,
                    error = %e,
                    "Failed to record click"
                );
                None
            }
        }
    }

    /// Records a click for `mapping` and reports failures to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the mapping vanished.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    pub async fn record_strict(&self, mapping: &UrlMapping) -> Result<ClickEvent, AppError> {
        let event = self.repository.record_click(mapping.id).await?;
        tracing::debug!(code = %mapping.short_code, "Click recorded");
        Ok(event)
    }
}
