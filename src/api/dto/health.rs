//! Body of `GET /health`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
}

/// Outcome of one probe; `message` is set only on failure.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.message.is_none()
    }
}
