//! Database layer - connection pool, storage trait and its two backends

pub mod memory;
pub mod pool;
pub mod repos;
pub mod schema;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::PgStore;
pub use store::{DbError, Entry, Page, QueueStore};
