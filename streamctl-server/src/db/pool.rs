//! Database connection pool management
//!
//! Uses sqlx PgPool with an explicit connection limit. When every connection
//! is checked out, callers wait up to `acquire_timeout` instead of failing.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default wait for a free connection, matching the request deadline.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pool sizing and checkout behaviour
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

/// Create a PostgreSQL connection pool and verify it is reachable.
///
/// A connection is checked out and pinged before the pool is returned, so a
/// bad URL or a down server fails here rather than on the first request.
///
/// # Errors
///
/// Returns an error if the connection or the ping fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/streamctl", PoolOptions::default()).await?;
/// ```
pub async fn create_pool(database_url: &str, options: PoolOptions) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(options.max_connections)
        .acquire_timeout(options.acquire_timeout)
        .connect(database_url)
        .await?;

    if let Err(e) = ping(&pool).await {
        pool.close().await;
        return Err(e);
    }

    tracing::debug!(
        max_connections = options.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    conn.ping().await
}

/// Close the pool, waiting for checked-out connections to be returned.
///
/// Safe to call more than once.
pub async fn close_pool(pool: &PgPool) {
    if !pool.is_closed() {
        pool.close().await;
        tracing::info!("database pool closed");
    }
}
