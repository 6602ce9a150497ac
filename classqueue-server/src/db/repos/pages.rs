//! Page repository
//!
//! - create: plain INSERT, unique violation on name maps to Conflict
//! - list: all pages, oldest first
//! - find_by_name: name lookup used to scope entries

use sqlx::PgPool;

use crate::db::store::{DbError, Page};

/// Page repository
pub struct PageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a page and return the stored row.
    pub async fn create(&self, page: Page) -> Result<Page, DbError> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query_as::<_, Page>(
            r#"
            INSERT INTO pages (id, name, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, created_at
            "#,
        )
        .bind(page.id)
        .bind(&page.name)
        .bind(page.created_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => DbError::Conflict {
                resource: "page",
                id: page.name.clone(),
            },
            other => DbError::Sqlx(other),
        })
    }

    /// List all pages in creation order.
    pub async fn list(&self) -> Result<Vec<Page>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let pages = sqlx::query_as::<_, Page>(
            "SELECT id, name, created_at FROM pages ORDER BY created_at ASC",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(pages)
    }

    /// Find a page by name.
    ///
    /// Databases provisioned without the unique constraint may hold
    /// duplicates; the oldest one wins.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Page>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let page = sqlx::query_as::<_, Page>(
            r#"
            SELECT id, name, created_at
            FROM pages
            WHERE name = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(page)
    }
}
