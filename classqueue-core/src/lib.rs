//! classqueue-core: validation, sanitization and configuration
//!
//! Shared by the HTTP server and the command-line client so both sides
//! apply the same rules to names, emails and page references.

pub mod config;
pub mod models;
pub mod sanitize;

pub use config::QueueConfig;
pub use models::{Email, GuestContact, GuestName, PageName, ValidationError};
pub use sanitize::{is_valid_email, sanitize};
