//! Optional schema bootstrap
//!
//! Deployments normally provision the tables themselves. `serve --init-schema`
//! runs these idempotent statements before accepting requests.

use sqlx::PgPool;

/// Create the `pages` and `queue` tables if they don't exist
pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring classqueue schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pages (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS queue (
            id UUID PRIMARY KEY,
            name VARCHAR(75) NOT NULL,
            email VARCHAR(75) NOT NULL,
            page_id UUID REFERENCES pages(id),
            entered_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            seq BIGSERIAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Tables created before the insertion sequence existed
    sqlx::query("ALTER TABLE queue ADD COLUMN IF NOT EXISTS seq BIGSERIAL NOT NULL")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_queue_page_entered ON queue(page_id, entered_at, seq)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema ready");
    Ok(())
}
