//! Short code generation and validation.
//!
//! Codes are 6-8 characters drawn from the 62-symbol alphabet `[A-Za-z0-9]`.
//! Generated codes are always 6 characters; uniqueness is left to storage.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Symbols a code may contain.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Path segments the HTTP surface routes itself; never usable as codes.
pub const RESERVED_CODES: &[&str] = &["api", "healthz", "code"];

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// Returns true iff `code` is 6 to 8 ASCII letters or digits.
///
/// # Examples
///
/// ```
/// use link_registry::utils::code_generator::validate_code;
///
/// assert!(validate_code("abc123"));
/// assert!(validate_code("AbCd1234"));
/// assert!(!validate_code("abc12"));
/// assert!(!validate_code("abc-123"));
/// ```
pub fn validate_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Returns true if `code` collides with one of the service's own routes.
///
/// Matching is exact, as routing is case-sensitive.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Generates a random 6-character code.
///
/// Each symbol is drawn uniformly, with replacement, from [`CODE_ALPHABET`]
/// using the thread-local generator.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}
