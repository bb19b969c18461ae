use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use super::{MemoryStore, Sequences};
use crate::domain::entities::{Account, NewAccount, PasswordResetToken, Session};
use crate::domain::repositories::{AccountRepository, PasswordResetRepository, SessionRepository};
use crate::error::AppError;

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let mut tables = self.auth.write().await;

        let clash = tables
            .accounts
            .values()
            .find(|a| a.username == new_account.username || a.email == new_account.email);

        if let Some(existing) = clash {
            let constraint = if existing.username == new_account.username {
                "accounts_username_key"
            } else {
                "accounts_email_key"
            };
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": constraint }),
            ));
        }

        let account = Account {
            id: Sequences::next(&self.sequences.account),
            username: new_account.username,
            email: new_account.email,
            password_hash: new_account.password_hash,
            role: new_account.role,
            created_at: Utc::now(),
        };
        tables.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError> {
        Ok(self.auth.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .auth
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .auth
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let mut tables = self.auth.write().await;

        let account = tables
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Account not found", json!({ "id": id })))?;
        account.password_hash = password_hash.to_string();

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.auth.read().await.accounts.values().cloned().collect())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create_session(
        &self,
        account_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        let session = Session {
            id: Sequences::next(&self.sequences.session),
            account_id,
            token_hash: token_hash.to_string(),
            expires_at,
            created_at: Utc::now(),
        };

        self.auth
            .write()
            .await
            .sessions
            .insert(session.token_hash.clone(), session.clone());

        Ok(session)
    }

    async fn find_account_by_token(&self, token_hash: &str) -> Result<Option<Account>, AppError> {
        let tables = self.auth.read().await;

        Ok(tables
            .sessions
            .get(token_hash)
            .filter(|s| s.expires_at > Utc::now())
            .and_then(|s| tables.accounts.get(&s.account_id))
            .cloned())
    }
}

#[async_trait]
impl PasswordResetRepository for MemoryStore {
    async fn replace_for_account(
        &self,
        account_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, AppError> {
        let mut tables = self.auth.write().await;

        tables.resets.retain(|_, r| r.account_id != account_id);

        let reset = PasswordResetToken {
            id: Sequences::next(&self.sequences.reset),
            token: token.to_string(),
            account_id,
            expires_at,
        };
        tables.resets.insert(reset.id, reset.clone());

        Ok(reset)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, AppError> {
        Ok(self
            .auth
            .read()
            .await
            .resets
            .values()
            .find(|r| r.token == token)
            .cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.auth.write().await.resets.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_account(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: "ROLE_USER".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unique_username_and_email() {
        let store = MemoryStore::new();

        store
            .create(new_account("alice", "alice@example.com"))
            .await
            .unwrap();

        let same_name = store.create(new_account("alice", "other@example.com")).await;
        let same_mail = store.create(new_account("bob", "alice@example.com")).await;

        assert!(matches!(same_name.unwrap_err(), AppError::Conflict { .. }));
        assert!(matches!(same_mail.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_expired_session_is_ignored() {
        let store = MemoryStore::new();
        let account = store
            .create(new_account("alice", "alice@example.com"))
            .await
            .unwrap();

        store
            .create_session(account.id, "live", Utc::now() + Duration::hours(1))
            .await
            .unwrap();
        store
            .create_session(account.id, "stale", Utc::now() - Duration::seconds(1))
            .await
            .unwrap();

        assert!(store.find_account_by_token("live").await.unwrap().is_some());
        assert!(store.find_account_by_token("stale").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reset_token_replaced_per_account() {
        let store = MemoryStore::new();
        let expires = Utc::now() + Duration::minutes(15);

        store.replace_for_account(1, "first", expires).await.unwrap();
        store.replace_for_account(1, "second", expires).await.unwrap();

        assert!(store.find_by_token("first").await.unwrap().is_none());
        assert!(store.find_by_token("second").await.unwrap().is_some());
    }
}
