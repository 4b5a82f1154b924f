//! Stream repository
//!
//! Owns all SQL for the `streams` table:
//! - create/update/delete are single statements
//! - lists are ordered newest first, ties broken by id
//! - update/delete report affected rows but never fail on a missing row

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::models::{StreamDescription, StreamTitle};

/// Stream record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Stream {
    pub stream_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Stream {
    /// Build a new stream with a fresh id and the current time.
    ///
    /// `created_at` is truncated to microseconds, the precision of
    /// `TIMESTAMPTZ`, so the value handed back to the client is the value
    /// that gets stored.
    pub fn new(user_id: Uuid, title: StreamTitle, description: StreamDescription) -> Self {
        Self {
            stream_id: Uuid::new_v4(),
            user_id,
            title: title.into_string(),
            description: description.into_string(),
            created_at: Utc::now().trunc_subsecs(6),
        }
    }
}

/// Data access for streams
#[async_trait]
pub trait StreamRepository: Send + Sync {
    /// Insert a stream. Id collisions are not pre-checked.
    async fn create(&self, stream: &Stream) -> Result<(), DbError>;

    /// `Ok(None)` when no stream has this id.
    async fn find_by_id(&self, stream_id: Uuid) -> Result<Option<Stream>, DbError>;

    /// All streams of a user, newest first.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Stream>, DbError>;

    /// All streams, newest first.
    async fn find_all(&self) -> Result<Vec<Stream>, DbError>;

    /// Overwrite title and description. Returns the number of rows changed,
    /// which is 0 (not an error) for an unknown id.
    async fn update(&self, stream: &Stream) -> Result<u64, DbError>;

    /// Delete by id. Returns the number of rows removed; 0 is not an error.
    async fn delete(&self, stream_id: Uuid) -> Result<u64, DbError>;
}

/// PostgreSQL stream repository
#[derive(Clone)]
pub struct PgStreamRepo {
    pool: PgPool,
}

impl PgStreamRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StreamRepository for PgStreamRepo {
    async fn create(&self, stream: &Stream) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO streams (stream_id, user_id, title, description, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(stream.stream_id)
        .bind(stream.user_id)
        .bind(&stream.title)
        .bind(&stream.description)
        .bind(stream.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, stream_id: Uuid) -> Result<Option<Stream>, DbError> {
        let stream = sqlx::query_as::<_, Stream>(
            r#"
            SELECT stream_id, user_id, title, description, created_at
            FROM streams
            WHERE stream_id = $1
            "#,
        )
        .bind(stream_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stream)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Stream>, DbError> {
        let streams = sqlx::query_as::<_, Stream>(
            r#"
            SELECT stream_id, user_id, title, description, created_at
            FROM streams
            WHERE user_id = $1
            ORDER BY created_at DESC, stream_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(streams)
    }

    async fn find_all(&self) -> Result<Vec<Stream>, DbError> {
        let streams = sqlx::query_as::<_, Stream>(
            r#"
            SELECT stream_id, user_id, title, description, created_at
            FROM streams
            ORDER BY created_at DESC, stream_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(streams)
    }

    async fn update(&self, stream: &Stream) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE streams
            SET title = $2, description = $3
            WHERE stream_id = $1
            "#,
        )
        .bind(stream.stream_id)
        .bind(&stream.title)
        .bind(&stream.description)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, stream_id: Uuid) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM streams WHERE stream_id = $1")
            .bind(stream_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
