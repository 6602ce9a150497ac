//! Input sanitization and email format checks
//!
//! Both functions are pure and total. They are applied to every piece of
//! free text before it reaches the store.

use once_cell::sync::Lazy;
use regex::Regex;

/// HTML-tag-like runs, including an unterminated tag at end of input.
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[^>]+(>|$)").expect("invalid tag regex"));

/// `local@domain.tld` shape: no whitespace, a single `@`, and a final
/// dot-free label after the last `.`.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("invalid email regex")
});

/// Trim surrounding whitespace, then strip every tag-like substring.
///
/// Trimming happens first, so whitespace left behind by a stripped tag is
/// kept as-is.
///
/// # Example
/// ```
/// use classqueue_core::sanitize;
///
/// assert_eq!(sanitize("  <b>Al</b> Smith "), "Al Smith");
/// assert_eq!(sanitize("Bob <script"), "Bob ");
/// ```
pub fn sanitize(input: &str) -> String {
    TAG_RE.replace_all(input.trim(), "").into_owned()
}

/// Check that `input` looks like an email address after trimming.
///
/// # Example
/// ```
/// use classqueue_core::is_valid_email;
///
/// assert!(is_valid_email("al@example.com"));
/// assert!(!is_valid_email("not-an-email"));
/// ```
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_RE.is_match(input.trim())
}
