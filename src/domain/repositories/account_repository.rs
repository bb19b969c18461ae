//! Repository traits for accounts, sessions and password-reset tokens.

use crate::domain::entities::{Account, NewAccount, PasswordResetToken, Session};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Account storage with unique username and email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Replaces the stored password hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError>;

    /// Lists all accounts ordered by id.
    async fn list(&self) -> Result<Vec<Account>, AppError>;
}

/// Bearer session storage keyed by the token's HMAC.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(
        &self,
        account_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError>;

    /// Finds the account behind an unexpired session.
    async fn find_account_by_token(&self, token_hash: &str) -> Result<Option<Account>, AppError>;
}

/// Password-reset token storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    /// Deletes any token the account already has and stores a new one,
    /// as a single step.
    async fn replace_for_account(
        &self,
        account_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, AppError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
