//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence.
//!
//! # Modules
//!
//! - [`memory`] - In-process store for tests and single-node development
//! - [`persistence`] - PostgreSQL repository implementations

pub mod memory;
pub mod persistence;

use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::{
    AccountRepository, ClickRepository, MappingRepository, PasswordResetRepository,
    SessionRepository,
};
use memory::MemoryStore;
use persistence::{
    PgAccountRepository, PgClickRepository, PgMappingRepository, PgPasswordResetRepository,
    PgSessionRepository,
};

/// One handle per repository trait, all backed by the same store.
#[derive(Clone)]
pub struct Stores {
    pub mappings: Arc<dyn MappingRepository>,
    pub clicks: Arc<dyn ClickRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub resets: Arc<dyn PasswordResetRepository>,
}

impl Stores {
    /// Repositories over a PostgreSQL pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            mappings: Arc::new(PgMappingRepository::new(pool.clone())),
            clicks: Arc::new(PgClickRepository::new(pool.clone())),
            accounts: Arc::new(PgAccountRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool.clone())),
            resets: Arc::new(PgPasswordResetRepository::new(pool)),
        }
    }

    /// Repositories over a fresh [`MemoryStore`].
    pub fn memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()))
    }

    /// Repositories over an existing [`MemoryStore`].
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            mappings: store.clone(),
            clicks: store.clone(),
            accounts: store.clone(),
            sessions: store.clone(),
            resets: store,
        }
    }
}
