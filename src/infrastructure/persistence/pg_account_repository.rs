//! PostgreSQL implementations of the account, session and password-reset
//! repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Account, NewAccount, PasswordResetToken, Session};
use crate::domain::repositories::{AccountRepository, PasswordResetRepository, SessionRepository};
use crate::error::AppError;

/// PostgreSQL repository for accounts.
pub struct PgAccountRepository {
    pool: Arc<PgPool>,
}

impl PgAccountRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(r: AccountRow) -> Self {
        Account {
            id: r.id,
            username: r.username,
            email: r.email,
            password_hash: r.password_hash,
            role: r.role,
            created_at: r.created_at,
        }
    }
}

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, role, created_at";

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            INSERT INTO accounts (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&new_account.username)
        .bind(&new_account.email)
        .bind(&new_account.password_hash)
        .bind(&new_account.role)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE accounts SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Account not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL repository for bearer sessions.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRow {
    id: i64,
    account_id: i64,
    token_hash: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create_session(
        &self,
        account_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        let r = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (account_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, account_id, token_hash, expires_at, created_at
            "#,
        )
        .bind(account_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Session {
            id: r.id,
            account_id: r.account_id,
            token_hash: r.token_hash,
            expires_at: r.expires_at,
            created_at: r.created_at,
        })
    }

    async fn find_account_by_token(&self, token_hash: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT a.id, a.username, a.email, a.password_hash, a.role, a.created_at
            FROM sessions s
            JOIN accounts a ON a.id = s.account_id
            WHERE s.token_hash = $1
              AND s.expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }
}

/// PostgreSQL repository for password-reset tokens.
pub struct PgPasswordResetRepository {
    pool: Arc<PgPool>,
}

impl PgPasswordResetRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ResetRow {
    id: i64,
    token: String,
    account_id: i64,
    expires_at: DateTime<Utc>,
}

impl From<ResetRow> for PasswordResetToken {
    fn from(r: ResetRow) -> Self {
        PasswordResetToken {
            id: r.id,
            token: r.token,
            account_id: r.account_id,
            expires_at: r.expires_at,
        }
    }
}

#[async_trait]
impl PasswordResetRepository for PgPasswordResetRepository {
    async fn replace_for_account(
        &self,
        account_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM password_reset_tokens WHERE account_id = $1")
            .bind(account_id)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, ResetRow>(
            r#"
            INSERT INTO password_reset_tokens (token, account_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, token, account_id, expires_at
            "#,
        )
        .bind(token)
        .bind(account_id)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, AppError> {
        let row = sqlx::query_as::<_, ResetRow>(
            r#"
            SELECT id, token, account_id, expires_at
            FROM password_reset_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM password_reset_tokens WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
