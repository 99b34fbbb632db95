//! Short code generation.
//!
//! Codes are drawn from the operating system's CSPRNG and encoded with the
//! URL-safe base64 alphabet (`A-Z`, `a-z`, `0-9`, `-`, `_`) without padding.
//! The generator is stateless: uniqueness is enforced by the caller against
//! the mapping store.

use base64::Engine as _;

/// Default length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Codes that collide with fixed route segments and must never be issued.
///
/// Must list the first path segment of every fixed route in
/// [`crate::api::routes`]; a test there enforces it. Only codes whose length
/// matches the configured code length can ever be generated.
const RESERVED_CODES: &[&str] = &["shorten", "update", "delete", "health"];

/// The entropy source failed to produce random bytes.
#[derive(Debug, thiserror::Error)]
#[error("failed to read random bytes from the system entropy source: {0}")]
pub struct GenerationError(#[from] getrandom::Error);

/// Number of random bytes drawn for a code of `length` characters.
///
/// Each base64 symbol carries 6 bits, so `ceil(length * 6 / 8)` bytes are
/// enough; one extra byte keeps the encoded output strictly longer than
/// `length` before truncation.
pub fn random_byte_count(length: usize) -> usize {
    (length * 6).div_ceil(8) + 1
}

/// Generates a random short code of exactly `length` characters.
///
/// # Errors
///
/// Returns [`GenerationError`] if the system random number generator fails.
/// Such a failure is not transient and callers should not retry it.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(7)?;
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
pub fn generate_code(length: usize) -> Result<String, GenerationError> {
    let mut buffer = vec![0u8; random_byte_count(length)];

    getrandom::fill(&mut buffer)?;

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buffer);
    code.truncate(length);

    Ok(code)
}

/// Returns true if `code` would be shadowed by a fixed API route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
