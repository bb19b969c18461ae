//! Repository trait definitions for the domain layer.
//!
//! The traits abstract data access following the Repository pattern and are
//! implemented by the infrastructure layer, once for PostgreSQL and once
//! in memory.
//!
//! # Available Repositories
//!
//! - [`MappingRepository`] - short code to URL mappings
//! - [`ClickRepository`] - atomic click recording and click history
//! - [`AccountRepository`] - registered accounts
//! - [`SessionRepository`] - bearer sessions
//! - [`PasswordResetRepository`] - password-reset tokens
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`.

pub mod account_repository;
pub mod click_repository;
pub mod mapping_repository;

pub use account_repository::{AccountRepository, PasswordResetRepository, SessionRepository};
pub use click_repository::ClickRepository;
pub use mapping_repository::MappingRepository;

#[cfg(test)]
pub use account_repository::{
    MockAccountRepository, MockPasswordResetRepository, MockSessionRepository,
};
#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
