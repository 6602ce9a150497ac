//! Postgres repositories
//!
//! Each repository borrows the pool and acquires one connection per call;
//! the connection goes back to the pool when the call returns, on success
//! or error alike.

pub mod entries;
pub mod pages;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub use entries::EntryRepo;
pub use pages::PageRepo;

use super::store::{DbError, Entry, Page, QueueStore};

/// [`QueueStore`] backed by a Postgres pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueStore for PgStore {
    async fn insert_page(&self, page: Page) -> Result<Page, DbError> {
        PageRepo::new(&self.pool).create(page).await
    }

    async fn list_pages(&self) -> Result<Vec<Page>, DbError> {
        PageRepo::new(&self.pool).list().await
    }

    async fn find_page_by_name(&self, name: &str) -> Result<Option<Page>, DbError> {
        PageRepo::new(&self.pool).find_by_name(name).await
    }

    async fn insert_entry(&self, entry: Entry) -> Result<Entry, DbError> {
        EntryRepo::new(&self.pool).create(entry).await
    }

    async fn list_entries_for_page(&self, page_id: Uuid) -> Result<Vec<Entry>, DbError> {
        EntryRepo::new(&self.pool).list_for_page(page_id).await
    }

    async fn list_entries(&self) -> Result<Vec<Entry>, DbError> {
        EntryRepo::new(&self.pool).list().await
    }

    async fn delete_entry(&self, id: Uuid) -> Result<u64, DbError> {
        EntryRepo::new(&self.pool).delete(id).await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
