//! Repository implementations for database access
//!
//! Each repository is a trait with a PostgreSQL adapter and an in-memory
//! adapter. Lookups by primary key return `Ok(None)` when nothing matched;
//! `Err` is reserved for execution failures.

pub mod memory;
pub mod streams;
pub mod users;

use std::future::Future;
use std::time::Duration;

pub use memory::{MemoryStreamRepo, MemoryUserRepo};
pub use streams::{PgStreamRepo, Stream, StreamRepository};
pub use users::{PgUserRepo, User, UserRepository};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("query exceeded deadline of {0:?}")]
    Timeout(Duration),
}

/// Run a repository call under a deadline.
///
/// On expiry the call's future is dropped, which aborts the in-flight query
/// and returns its connection to the pool.
pub async fn with_deadline<T, F>(limit: Duration, call: F) -> Result<T, DbError>
where
    F: Future<Output = Result<T, DbError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(DbError::Timeout(limit)),
    }
}
