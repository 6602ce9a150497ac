//! classqueue-server: HTTP API for page-scoped waitlists
//!
//! Pages (classrooms) group queue entries. Entries join in arrival order
//! and are removed by id. Storage is Postgres through a lazily-connected
//! sqlx pool, or an in-memory store for local runs and tests.

pub mod db;
pub mod http;

pub use db::{create_pool, MemoryStore, PgStore, QueueStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
