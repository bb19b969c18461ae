//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts that the infrastructure layer
//! implements; business rules live in [`crate::application::services`].
//!
//! # Redirect Flow
//!
//! 1. HTTP handler resolves the short code through the mapping registry
//! 2. On a hit, the click recorder calls [`repositories::ClickRepository::record_click`]
//! 3. The handler answers with a temporary redirect whether or not recording succeeded

pub mod entities;
pub mod repositories;
