//! Queue entry repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::store::{DbError, Entry};

/// Queue entry repository
pub struct EntryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EntryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an entry and return the stored row.
    pub async fn create(&self, entry: Entry) -> Result<Entry, DbError> {
        let mut conn = self.pool.acquire().await?;

        let stored = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO queue (id, name, email, page_id, entered_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, page_id, entered_at
            "#,
        )
        .bind(entry.id)
        .bind(&entry.name)
        .bind(&entry.email)
        .bind(entry.page_id)
        .bind(entry.entered_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored)
    }

    /// Entries of one page, oldest first (queue order).
    ///
    /// `seq` breaks ties between entries stamped in the same microsecond.
    pub async fn list_for_page(&self, page_id: Uuid) -> Result<Vec<Entry>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, name, email, page_id, entered_at
            FROM queue
            WHERE page_id = $1
            ORDER BY entered_at ASC, seq ASC
            "#,
        )
        .bind(page_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(entries)
    }

    /// Every entry, newest first.
    pub async fn list(&self) -> Result<Vec<Entry>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, name, email, page_id, entered_at
            FROM queue
            ORDER BY entered_at DESC, seq DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(entries)
    }

    /// Delete at most one entry. Missing ids are not an error.
    pub async fn delete(&self, id: Uuid) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM queue WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
