//! Syntactic URL validation.
//!
//! A purely lexical check used to decide whether input looks like a URL worth
//! sending to the shortening service. No parsing into components, no DNS.

use regex::Regex;
use std::sync::LazyLock;

/// Anchored, ASCII-only, case-insensitive URL pattern.
///
/// Host is a dotted name ending in a 2+ letter label, `localhost`, or four
/// dot-separated groups of 1-3 digits. Octet values are not range-checked, so
/// `999.999.999.999` passes.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i-u)^",
        r"(https?://)?",
        r"((([a-z0-9-]+\.)+[a-z]{2,})|localhost|[0-9]{1,3}(\.[0-9]{1,3}){3})",
        r"(:[0-9]+)?",
        r"(/[-a-z0-9%_.~+]*)*",
        r"(\?[;&a-z0-9%_.~+=-]*)?",
        r"(#[-a-z0-9_]*)?",
        r"$",
    ))
    .unwrap()
});

/// Returns true if `input` is a syntactically plausible URL.
///
/// Accepts an optional `http://` / `https://` scheme, a host, an optional
/// `:port`, `/`-prefixed path segments, an optional `?query` and an optional
/// `#fragment`. The whole string must match.
///
/// # Examples
///
/// ```
/// use url_shortener_client::utils::url_validator::is_valid_url;
///
/// assert!(is_valid_url("https://example.com"));
/// assert!(is_valid_url("localhost:3000/path?q=1"));
/// assert!(!is_valid_url("not a url"));
/// assert!(!is_valid_url(""));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    URL_REGEX.is_match(input)
}
