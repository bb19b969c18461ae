//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgMappingRepository`] - Url mapping storage and lookup
//! - [`PgClickRepository`] - Atomic click recording and range queries
//! - [`PgAccountRepository`] - Accounts
//! - [`PgSessionRepository`] - Bearer sessions
//! - [`PgPasswordResetRepository`] - Password-reset tokens

pub mod pg_account_repository;
pub mod pg_click_repository;
pub mod pg_mapping_repository;

pub use pg_account_repository::{
    PgAccountRepository, PgPasswordResetRepository, PgSessionRepository,
};
pub use pg_click_repository::PgClickRepository;
pub use pg_mapping_repository::PgMappingRepository;
