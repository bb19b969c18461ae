//! Random opaque tokens for sessions and password resets.

use base64::Engine as _;

/// Number of random bytes behind every token.
const TOKEN_BYTES: usize = 32;

/// Generates a cryptographically secure token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 43-character string.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_token() -> String {
    let mut buffer = [0u8; TOKEN_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
