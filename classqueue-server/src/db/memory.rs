//! In-memory store
//!
//! Same contract as the Postgres store, kept in process. Used by
//! `serve --in-memory` and by the router tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{DbError, Entry, Page, QueueStore};

#[derive(Default)]
struct Tables {
    pages: Vec<Page>,
    entries: Vec<Entry>,
}

/// Thread-safe in-memory tables, insertion ordered
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueueStore for MemoryStore {
    async fn insert_page(&self, page: Page) -> Result<Page, DbError> {
        let mut tables = self.tables.write().await;

        if tables.pages.iter().any(|p| p.name == page.name) {
            return Err(DbError::Conflict {
                resource: "page",
                id: page.name,
            });
        }

        tables.pages.push(page.clone());
        Ok(page)
    }

    async fn list_pages(&self) -> Result<Vec<Page>, DbError> {
        let tables = self.tables.read().await;
        let mut pages = tables.pages.clone();
        pages.sort_by_key(|p| p.created_at);
        Ok(pages)
    }

    async fn find_page_by_name(&self, name: &str) -> Result<Option<Page>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.pages.iter().find(|p| p.name == name).cloned())
    }

    async fn insert_entry(&self, entry: Entry) -> Result<Entry, DbError> {
        let mut tables = self.tables.write().await;
        tables.entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_entries_for_page(&self, page_id: Uuid) -> Result<Vec<Entry>, DbError> {
        let tables = self.tables.read().await;
        let mut entries: Vec<Entry> = tables
            .entries
            .iter()
            .filter(|e| e.page_id == Some(page_id))
            .cloned()
            .collect();
        // stable: equal timestamps keep insertion order
        entries.sort_by_key(|e| e.entered_at);
        Ok(entries)
    }

    async fn list_entries(&self) -> Result<Vec<Entry>, DbError> {
        let tables = self.tables.read().await;
        let mut entries: Vec<Entry> = tables.entries.iter().rev().cloned().collect();
        entries.sort_by(|a, b| b.entered_at.cmp(&a.entered_at));
        Ok(entries)
    }

    async fn delete_entry(&self, id: Uuid) -> Result<u64, DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.entries.len();
        tables.entries.retain(|e| e.id != id);
        Ok((before - tables.entries.len()) as u64)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
