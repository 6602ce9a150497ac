//! Validation error types

use std::fmt;

/// Validation error for domain models
///
/// The `Display` output is the message shown to whoever submitted the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are absent or blank
    Missing { fields: &'static [&'static str] },

    /// Field exceeds maximum length (in characters, after sanitization)
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body could not be decoded
    InvalidBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { fields } => {
                let verb = if fields.len() > 1 { "are" } else { "is" };
                write!(f, "{} {} required.", capitalize(&fields.join(" and ")), verb)
            }
            Self::TooLong { field, max } => write!(
                f,
                "{} exceeds maximum length of {} characters.",
                capitalize(field),
                max
            ),
            Self::InvalidFormat { field, reason } => write!(f, "Invalid {}: {}", field, reason),
            Self::InvalidBody { reason } => write!(f, "Invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
