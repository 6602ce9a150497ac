//! HTTP server command for the classqueue API

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use classqueue_core::QueueConfig;
use classqueue_server::db::{create_pool_with_options, schema};
use classqueue_server::http::{run_server, ServerConfig};
use classqueue_server::{MemoryStore, PgStore, QueueStore};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "CLASSQUEUE_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep pages and entries in memory instead of Postgres (lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Create the pages/queue tables if they do not exist
    #[arg(long)]
    pub init_schema: bool,

    /// Accept entries that name no page
    #[arg(long)]
    pub allow_unscoped: bool,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,
}

impl ServeArgs {
    /// Merge flags over the config file. Flags win.
    fn server_config(&self, config: &QueueConfig) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind.unwrap_or(config.server.bind),
            cors_permissive: self.cors_permissive || config.server.cors_permissive,
            require_page: !self.allow_unscoped && config.server.require_page,
            timeout: Duration::from_secs(config.server.timeout_secs),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = QueueConfig::load()?;
    let server_config = args.server_config(&config);

    let store: Arc<dyn QueueStore> = if args.in_memory {
        if args.database_url.is_some() {
            tracing::warn!("--in-memory set, ignoring database URL");
        }
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let database_url = args
            .database_url
            .or(config.database.url)
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or [database].url in ~/.classqueue/config.toml")?;

        let max_connections = args
            .max_connections
            .unwrap_or(config.database.max_connections);

        // Lazy: no connection is opened until the first request
        let pool = create_pool_with_options(&database_url, max_connections)
            .context("Failed to create database pool")?;

        if args.init_schema || config.database.init_schema {
            schema::ensure(&pool)
                .await
                .context("Failed to initialize database schema")?;
        }

        Arc::new(PgStore::new(pool))
    };

    tracing::info!("Starting classqueue server on {}", server_config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(store, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
