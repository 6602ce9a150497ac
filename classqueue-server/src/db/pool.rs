//! Database connection pool management
//!
//! The pool is created lazily: no connection is opened until the first
//! request acquires one. It lives in the server state for the whole process.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a lazily-connecting PostgreSQL pool.
///
/// # Errors
///
/// Returns an error only if `database_url` cannot be parsed; connection
/// failures surface on first use.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/classqueue")?;
/// ```
pub fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS)
}

/// Create a lazily-connecting PostgreSQL pool with a custom size.
pub fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy(database_url)
}
