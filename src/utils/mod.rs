//! Utility functions used across the application.
//!
//! - [`code_generator`] - short code candidates
//! - [`password`] - argon2 password hashing
//! - [`redirect_target`] - scheme normalization for redirect targets
//! - [`token`] - random opaque tokens

pub mod code_generator;
pub mod password;
pub mod redirect_target;
pub mod token;
