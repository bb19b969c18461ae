//! Accounts, bearer sessions and password reset.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::application::services::mailer::Mailer;
use crate::domain::entities::{Account, NewAccount, ROLE_USER};
use crate::domain::repositories::{AccountRepository, PasswordResetRepository, SessionRepository};
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::token::generate_token;

type HmacSha256 = Hmac<Sha256>;

/// Tunables for [`AuthService`].
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// HMAC key for session token hashes.
    pub signing_secret: String,
    pub session_ttl: Duration,
    pub reset_token_ttl: Duration,
    /// Base of the link sent in password-reset emails.
    pub public_base_url: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            signing_secret: String::new(),
            session_ttl: Duration::hours(24),
            reset_token_ttl: Duration::minutes(15),
            public_base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// A freshly issued bearer session.
///
/// `token` is the raw credential; it is only ever returned here.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub account: Account,
    pub expires_at: DateTime<Utc>,
}

/// Registers accounts, issues and checks bearer sessions, and runs the
/// forgot-password flow.
///
/// Session tokens are hashed with HMAC-SHA256 (keyed by the signing secret)
/// before storage and comparison. An attacker with read-only access to the
/// database cannot verify or forge tokens without the server-side secret.
pub struct AuthService<A, S, P>
where
    A: AccountRepository + ?Sized,
    S: SessionRepository + ?Sized,
    P: PasswordResetRepository + ?Sized,
{
    accounts: Arc<A>,
    sessions: Arc<S>,
    resets: Arc<P>,
    mailer: Arc<dyn Mailer>,
    settings: AuthSettings,
}

impl<A, S, P> AuthService<A, S, P>
where
    A: AccountRepository + ?Sized,
    S: SessionRepository + ?Sized,
    P: PasswordResetRepository + ?Sized,
{
    pub fn new(
        accounts: Arc<A>,
        sessions: Arc<S>,
        resets: Arc<P>,
        mailer: Arc<dyn Mailer>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            accounts,
            sessions,
            resets,
            mailer,
            settings,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.settings.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Creates an account with role `ROLE_USER` and logs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    #[tracing::instrument(skip(self, email, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        if self.accounts.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(
                "Username is already taken",
                json!({ "field": "username" }),
            ));
        }
        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(
                "Email is already registered",
                json!({ "field": "email" }),
            ));
        }

        let account = self
            .accounts
            .create(NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
                role: ROLE_USER.to_string(),
            })
            .await?;

        tracing::info!(account_id = account.id, "Account registered");

        self.issue_session(account).await
    }

    /// Verifies credentials and issues a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown user or a wrong
    /// password; the two cases are indistinguishable to the caller.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AppError> {
        let account = self.accounts.find_by_username(username).await?;

        match account {
            Some(account) if verify_password(password, &account.password_hash) => {
                self.issue_session(account).await
            }
            _ => {
                tracing::debug!("Login rejected");
                Err(AppError::unauthorized(
                    "Invalid username or password",
                    json!({}),
                ))
            }
        }
    }

    async fn issue_session(&self, account: Account) -> Result<AuthSession, AppError> {
        let token = generate_token();
        let expires_at = Utc::now() + self.settings.session_ttl;

        self.sessions
            .create_session(account.id, &self.hash_token(&token), expires_at)
            .await?;

        Ok(AuthSession {
            token,
            account,
            expires_at,
        })
    }

    /// Resolves a raw bearer token to its account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or expired.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    pub async fn authenticate(&self, token: &str) -> Result<Account, AppError> {
        let token_hash = self.hash_token(token);

        self.sessions
            .find_account_by_token(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid or expired token"}),
                )
            })
    }

    /// Issues a reset token for the account behind `email` and mails the link.
    ///
    /// Any previous token of the account is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account uses `email`.
    #[tracing::instrument(skip(self, email))]
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let account = self.accounts.find_by_email(email).await?.ok_or_else(|| {
            AppError::not_found("No account with that email", json!({ "field": "email" }))
        })?;

        let token = generate_token();
        let expires_at = Utc::now() + self.settings.reset_token_ttl;

        self.resets
            .replace_for_account(account.id, &token, expires_at)
            .await?;

        let reset_url = format!(
            "{}/reset-password?token={}",
            self.settings.public_base_url.trim_end_matches('/'),
            token
        );

        self.mailer
            .send_password_reset(&account.email, &reset_url)
            .await?;

        tracing::info!(account_id = account.id, "Password reset requested");
        Ok(())
    }

    /// Consumes a reset token and stores the new password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the token is unknown, or if it has
    /// expired (the stale token is deleted).
    #[tracing::instrument(skip_all)]
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let reset = self
            .resets
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::bad_request("Invalid token", json!({ "field": "token" })))?;

        if reset.is_expired() {
            self.resets.delete(reset.id).await?;
            return Err(AppError::bad_request(
                "Token has expired",
                json!({ "field": "token" }),
            ));
        }

        self.accounts
            .update_password(reset.account_id, &hash_password(new_password)?)
            .await?;
        self.resets.delete(reset.id).await?;

        tracing::info!(account_id = reset.account_id, "Password reset completed");
        Ok(())
    }
}
