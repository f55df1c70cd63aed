//! Target URL validation.

use url::Url;

/// Returns true if `input` parses as an absolute URL with a host.
///
/// The URL is only checked, never rewritten; links store the target exactly
/// as supplied.
///
/// # Examples
///
/// ```
/// use link_registry::utils::url_validator::is_valid_url;
///
/// assert!(is_valid_url("https://example.com"));
/// assert!(!is_valid_url("not-a-url"));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}
