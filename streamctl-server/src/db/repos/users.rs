//! User repository
//!
//! Same shape as the stream repository, narrower: no update and no lookup
//! by owner. Nothing in the HTTP layer uses it yet.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// User record from database
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRow)]
pub struct User {
    pub user_id: Uuid,
}

/// Data access for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), DbError>;

    /// `Ok(None)` when no user has this id.
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, DbError>;

    /// All users, ordered by id.
    async fn find_all(&self) -> Result<Vec<User>, DbError>;

    /// Delete by id. Returns the number of rows removed; 0 is not an error.
    async fn delete(&self, user_id: Uuid) -> Result<u64, DbError>;
}

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepo {
    async fn create(&self, user: &User) -> Result<(), DbError> {
        sqlx::query("INSERT INTO users (user_id) VALUES ($1)")
            .bind(user.user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>("SELECT user_id FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>("SELECT user_id FROM users ORDER BY user_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn delete(&self, user_id: Uuid) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> PgUserRepo {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url, Default::default())
            .await
            .expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");
        PgUserRepo::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_find_delete() {
        let repo = repo().await;
        let user = User {
            user_id: Uuid::new_v4(),
        };

        repo.create(&user).await.expect("create failed");
        assert_eq!(repo.find_by_id(user.user_id).await.unwrap(), Some(user));
        assert!(repo.find_all().await.unwrap().contains(&user));

        assert_eq!(repo.delete(user.user_id).await.unwrap(), 1);
        assert_eq!(repo.find_by_id(user.user_id).await.unwrap(), None);
        assert_eq!(repo.delete(user.user_id).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_create_is_an_error() {
        let repo = repo().await;
        let user = User {
            user_id: Uuid::new_v4(),
        };

        repo.create(&user).await.expect("create failed");
        assert!(matches!(repo.create(&user).await, Err(DbError::Sqlx(_))));

        repo.delete(user.user_id).await.expect("cleanup failed");
    }
}
