//! Page name validation

use crate::sanitize::sanitize;

use super::ValidationError;

/// Maximum length for page names
pub const MAX_PAGE_NAME_LEN: usize = 255;

/// Validated, sanitized page (classroom) name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageName(String);

impl PageName {
    /// Sanitize and validate a page name.
    ///
    /// # Rules
    /// - Markup and surrounding whitespace are stripped first
    /// - Must not be blank afterwards
    /// - Max 255 characters
    ///
    /// # Example
    /// ```
    /// use classqueue_core::models::PageName;
    ///
    /// assert_eq!(PageName::new(" Room <i>101</i> ").unwrap().as_str(), "Room 101");
    /// assert!(PageName::new("<br>").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let name = sanitize(raw);

        if name.trim().is_empty() {
            return Err(ValidationError::Missing {
                fields: &["page name"],
            });
        }

        if name.chars().count() > MAX_PAGE_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "page name",
                max: MAX_PAGE_NAME_LEN,
            });
        }

        Ok(Self(name))
    }

    /// Get the page name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for PageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
