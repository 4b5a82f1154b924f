//! Schema bootstrap for the users and streams tables
//!
//! Statements are idempotent, so running them on every start is safe.

use sqlx::PgPool;

/// `streams.user_id` carries no foreign key: ownership is a logical link and
/// a stream may name a user that was never registered.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id UUID PRIMARY KEY
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS streams (
        stream_id UUID PRIMARY KEY,
        user_id UUID NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_streams_created_at ON streams (created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_streams_user_created ON streams (user_id, created_at DESC)",
];

/// Create tables and indexes if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Schema migrations complete");
    Ok(())
}
