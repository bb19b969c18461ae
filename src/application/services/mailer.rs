//! Outbound email for the password-reset flow.

use async_trait::async_trait;

use crate::error::AppError;

/// Delivers account emails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the password-reset link to `email`.
    async fn send_password_reset(&self, email: &str, reset_url: &str) -> Result<(), AppError>;
}

/// Mailer that writes the message to the log instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(&self, email: &str, reset_url: &str) -> Result<(), AppError> {
        tracing::info!(
            to = %email,
            subject = "Password Reset Request",
            url = %reset_url,
            "Password reset email"
        );
        Ok(())
    }
}
