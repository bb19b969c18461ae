//! Account, session and password-reset entities.
//!
//! Mapping and analytics code only ever sees an account's `id`; the rest of
//! these types belong to the authentication flow.

use chrono::{DateTime, Utc};

/// Role granted to self-registered accounts.
pub const ROLE_USER: &str = "ROLE_USER";

/// A registered user.
///
/// `password_hash` is an argon2 PHC string and never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// A bearer session. Only the HMAC of the raw token is stored.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub account_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Single-use token for the reset-password flow.
///
/// At most one token exists per account; issuing a new one replaces the old.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetToken {
    pub id: i64,
    pub token: String,
    pub account_id: i64,
    pub expires_at: DateTime<Utc>,
}

impl PasswordResetToken {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
