//! Domain models with validation at construction
//!
//! All user input is sanitized and validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod guest;
pub mod page;
pub mod validation;

pub use guest::{Email, GuestContact, GuestName, MAX_EMAIL_LEN, MAX_GUEST_NAME_LEN};
pub use page::{PageName, MAX_PAGE_NAME_LEN};
pub use validation::ValidationError;
