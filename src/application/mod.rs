//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::MappingRegistry`] - Short code assignment, resolution and listing
//! - [`services::ClickRecorder`] - Atomic, best-effort click recording
//! - [`services::AnalyticsAggregator`] - Daily click histograms per mapping or owner
//! - [`services::AuthService`] - Accounts, bearer sessions and password reset

pub mod services;
