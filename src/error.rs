//! Application error type shared by every layer.
//!
//! Errors carry a human-readable message plus a free-form JSON `details`
//! payload and render as
//!
//! ```json
//! { "error": { "code": "not_found", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// `start > end` (or an unrepresentable bound) in an aggregation query.
    #[error("{message}")]
    InvalidRange { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Every candidate short code collided within the retry budget.
    #[error("{message}")]
    CodeSpaceExhausted { message: String, details: Value },

    /// The underlying store failed or could not be reached.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_range(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidRange {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn code_space_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CodeSpaceExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::InvalidRange { .. } => (StatusCode::BAD_REQUEST, "invalid_range"),
            AppError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::CodeSpaceExhausted { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "code_space_exhausted")
            }
            AppError::StoreUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable")
            }
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let details = match self {
            AppError::Validation { details, .. }
            | AppError::InvalidRange { details, .. }
            | AppError::Unauthorized { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Conflict { details, .. }
            | AppError::CodeSpaceExhausted { details, .. }
            | AppError::StoreUnavailable { details, .. }
            | AppError::Internal { details, .. } => details.clone(),
        };

        ErrorInfo {
            code,
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::store_unavailable("Store unavailable", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}
