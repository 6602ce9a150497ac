//! Storage seam between the HTTP handlers and the database
//!
//! Handlers only see [`QueueStore`]. The Postgres store backs real
//! deployments; the in-memory store backs demos and router tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use classqueue_core::{GuestContact, PageName};

/// Page (classroom) record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Page {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Page {
    /// New page with a fresh id, stamped now.
    pub fn new(name: PageName) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into_string(),
            created_at: Utc::now(),
        }
    }
}

/// Queue entry record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Entry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub page_id: Option<Uuid>,
    pub entered_at: DateTime<Utc>,
}

impl Entry {
    /// New entry with a fresh id, stamped now.
    pub fn new(contact: GuestContact, page_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: contact.name.into_string(),
            email: contact.email.into_string(),
            page_id,
            entered_at: Utc::now(),
        }
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("already exists: {resource} '{id}'")]
    Conflict { resource: &'static str, id: String },
}

/// Persistence operations needed by the page and guest handlers.
///
/// Every method is a single statement; implementations must not hold a
/// connection beyond the call.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Insert a page. Fails with [`DbError::Conflict`] when the name is taken.
    async fn insert_page(&self, page: Page) -> Result<Page, DbError>;

    /// All pages, oldest first.
    async fn list_pages(&self) -> Result<Vec<Page>, DbError>;

    /// Look a page up by its (sanitized) name.
    async fn find_page_by_name(&self, name: &str) -> Result<Option<Page>, DbError>;

    async fn insert_entry(&self, entry: Entry) -> Result<Entry, DbError>;

    /// Entries of one page in arrival order (oldest first).
    async fn list_entries_for_page(&self, page_id: Uuid) -> Result<Vec<Entry>, DbError>;

    /// Every entry, newest first.
    async fn list_entries(&self) -> Result<Vec<Entry>, DbError>;

    /// Delete by id, returning the number of rows removed (0 or 1).
    async fn delete_entry(&self, id: Uuid) -> Result<u64, DbError>;

    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Round-trip to the backing storage.
    async fn ping(&self) -> Result<(), DbError>;
}
