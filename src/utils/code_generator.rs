//! Short code generation.
//!
//! Codes are 8 characters drawn uniformly from `[A-Za-z0-9]`. The alphabet
//! and length are part of the public URL format and must not change.
//!
//! A generator only proposes candidates. Uniqueness is enforced by the
//! mapping registry together with the store.

use rand::Rng;

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 8;

/// The 62-symbol code alphabet.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Source of candidate short codes.
///
/// Injected into [`crate::application::services::MappingRegistry`] so tests
/// can script collisions.
pub trait CodeGenerator: Send + Sync {
    /// Produces one candidate code. Never fails.
    fn generate(&self) -> String;
}

/// Draws codes from the thread-local random number generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();

        (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
