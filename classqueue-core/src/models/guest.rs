//! Guest name and email validation

use crate::sanitize::{is_valid_email, sanitize};

use super::ValidationError;

/// Maximum length for guest names
pub const MAX_GUEST_NAME_LEN: usize = 75;

/// Maximum length for guest emails
pub const MAX_EMAIL_LEN: usize = 75;

/// Validated, sanitized guest name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestName(String);

impl GuestName {
    /// Sanitize and validate a guest name (non-blank, max 75 characters).
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let name = sanitize(raw);

        if name.trim().is_empty() {
            return Err(ValidationError::Missing { fields: &["name"] });
        }

        if name.chars().count() > MAX_GUEST_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_GUEST_NAME_LEN,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated, sanitized email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Sanitize and validate an email address.
    ///
    /// # Rules
    /// - Non-blank after sanitizing
    /// - Max 75 characters
    /// - `local@domain.tld` shape, see [`is_valid_email`]
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let email = sanitize(raw);

        if email.trim().is_empty() {
            return Err(ValidationError::Missing { fields: &["email"] });
        }

        if email.chars().count() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "please enter a valid email address such as example@example.com",
            });
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Name and email of someone joining a queue, validated together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestContact {
    pub name: GuestName,
    pub email: Email,
}

impl GuestContact {
    /// Validate a submitted name/email pair.
    ///
    /// Absent or empty fields are reported together before any other check,
    /// so `("", "x@x.com")` yields "Name and email are required.".
    pub fn new(name: Option<&str>, email: Option<&str>) -> Result<Self, ValidationError> {
        let (Some(name), Some(email)) = (non_empty(name), non_empty(email)) else {
            return Err(ValidationError::Missing {
                fields: &["name", "email"],
            });
        };

        Ok(Self {
            name: GuestName::new(name)?,
            email: Email::new(email)?,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
