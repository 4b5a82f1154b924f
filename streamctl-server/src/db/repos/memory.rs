//! In-memory repositories
//!
//! Satisfy the same contracts as the PostgreSQL adapters without a database,
//! for handler tests and local experiments. `set_unavailable(true)` makes
//! every call fail the way a closed pool would.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DbError, Stream, StreamRepository, User, UserRepository};

fn duplicate_key(table: &str, id: Uuid) -> DbError {
    DbError::Sqlx(sqlx::Error::Protocol(format!(
        "duplicate key in {table}: {id}"
    )))
}

/// Stream repository backed by a map keyed by stream id
#[derive(Default)]
pub struct MemoryStreamRepo {
    rows: RwLock<HashMap<Uuid, Stream>>,
    unavailable: AtomicBool,
}

impl MemoryStreamRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored streams.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn check(&self) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

/// Newest first; equal timestamps fall back to id so order is stable.
fn sort_newest_first(streams: &mut [Stream]) {
    streams.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.stream_id.cmp(&a.stream_id))
    });
}

#[async_trait]
impl StreamRepository for MemoryStreamRepo {
    async fn create(&self, stream: &Stream) -> Result<(), DbError> {
        self.check()?;
        let mut rows = self.rows.write().await;
        if rows.contains_key(&stream.stream_id) {
            return Err(duplicate_key("streams", stream.stream_id));
        }
        rows.insert(stream.stream_id, stream.clone());
        Ok(())
    }

    async fn find_by_id(&self, stream_id: Uuid) -> Result<Option<Stream>, DbError> {
        self.check()?;
        Ok(self.rows.read().await.get(&stream_id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Stream>, DbError> {
        self.check()?;
        let mut streams: Vec<Stream> = self
            .rows
            .read()
            .await
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut streams);
        Ok(streams)
    }

    async fn find_all(&self) -> Result<Vec<Stream>, DbError> {
        self.check()?;
        let mut streams: Vec<Stream> = self.rows.read().await.values().cloned().collect();
        sort_newest_first(&mut streams);
        Ok(streams)
    }

    async fn update(&self, stream: &Stream) -> Result<u64, DbError> {
        self.check()?;
        match self.rows.write().await.get_mut(&stream.stream_id) {
            Some(row) => {
                row.title.clone_from(&stream.title);
                row.description.clone_from(&stream.description);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, stream_id: Uuid) -> Result<u64, DbError> {
        self.check()?;
        let removed = self.rows.write().await.remove(&stream_id);
        Ok(u64::from(removed.is_some()))
    }
}

/// User repository backed by an ordered set of ids
#[derive(Default)]
pub struct MemoryUserRepo {
    rows: RwLock<BTreeSet<Uuid>>,
    unavailable: AtomicBool,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn create(&self, user: &User) -> Result<(), DbError> {
        self.check()?;
        if !self.rows.write().await.insert(user.user_id) {
            return Err(duplicate_key("users", user.user_id));
        }
        Ok(())
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, DbError> {
        self.check()?;
        let found = self.rows.read().await.contains(&user_id);
        Ok(found.then_some(User { user_id }))
    }

    async fn find_all(&self) -> Result<Vec<User>, DbError> {
        self.check()?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .map(|&user_id| User { user_id })
            .collect())
    }

    async fn delete(&self, user_id: Uuid) -> Result<u64, DbError> {
        self.check()?;
        Ok(u64::from(self.rows.write().await.remove(&user_id)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;
    use crate::models::{StreamDescription, StreamTitle};

    fn sample(user_id: Uuid, title: &str) -> Stream {
        Stream::new(
            user_id,
            StreamTitle::new(title).unwrap(),
            StreamDescription::new("d").unwrap(),
        )
    }

    #[tokio::test]
    async fn create_then_find_by_id() {
        let repo = MemoryStreamRepo::new();
        let stream = sample(Uuid::new_v4(), "t");

        repo.create(&stream).await.unwrap();
        assert_eq!(repo.find_by_id(stream.stream_id).await.unwrap(), Some(stream));
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let repo = MemoryStreamRepo::new();
        let stream = sample(Uuid::new_v4(), "t");

        repo.create(&stream).await.unwrap();
        assert!(repo.create(&stream).await.is_err());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_is_none_not_error() {
        let repo = MemoryStreamRepo::new();
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn lists_newest_first_with_stable_ties() {
        let repo = MemoryStreamRepo::new();
        let user = Uuid::new_v4();

        let base = sample(user, "base");
        let mut tie_a = sample(user, "tie a");
        let mut tie_b = sample(user, "tie b");
        let mut oldest = sample(user, "oldest");
        tie_a.created_at = base.created_at + Duration::seconds(1);
        tie_b.created_at = tie_a.created_at;
        oldest.created_at = base.created_at - Duration::seconds(1);

        for s in [&oldest, &tie_b, &base, &tie_a] {
            repo.create(s).await.unwrap();
        }

        let first = repo.find_all().await.unwrap();
        let second = repo.find_by_user_id(user).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert!(first
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(first[2].title, "base");
        assert_eq!(first[3].title, "oldest");
    }

    #[tokio::test]
    async fn find_by_user_id_filters_owner() {
        let repo = MemoryStreamRepo::new();
        let owner = Uuid::new_v4();
        repo.create(&sample(owner, "mine")).await.unwrap();
        repo.create(&sample(Uuid::new_v4(), "theirs")).await.unwrap();

        let mine = repo.find_by_user_id(owner).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "mine");
        assert!(repo.find_by_user_id(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_changes_only_title_and_description() {
        let repo = MemoryStreamRepo::new();
        let stream = sample(Uuid::new_v4(), "before");
        repo.create(&stream).await.unwrap();

        let mut edit = stream.clone();
        edit.title = "after".into();
        edit.description = "edited".into();
        edit.user_id = Uuid::new_v4();
        edit.created_at += Duration::days(1);
        assert_eq!(repo.update(&edit).await.unwrap(), 1);

        let found = repo.find_by_id(stream.stream_id).await.unwrap().unwrap();
        assert_eq!(found.title, "after");
        assert_eq!(found.description, "edited");
        assert_eq!(found.user_id, stream.user_id);
        assert_eq!(found.created_at, stream.created_at);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_succeed() {
        let repo = MemoryStreamRepo::new();
        let ghost = sample(Uuid::new_v4(), "ghost");

        assert_eq!(repo.update(&ghost).await.unwrap(), 0);
        assert_eq!(repo.delete(ghost.stream_id).await.unwrap(), 0);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn unavailable_repo_errors() {
        let repo = MemoryStreamRepo::new();
        repo.set_unavailable(true);
        assert!(matches!(
            repo.find_all().await,
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        ));

        repo.set_unavailable(false);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_creates_never_collide() {
        let repo = Arc::new(MemoryStreamRepo::new());
        let user = Uuid::new_v4();

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.create(&sample(user, &format!("s{i}"))).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task panicked").expect("create failed");
        }

        assert_eq!(repo.find_all().await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn user_repo_contract() {
        let repo = MemoryUserRepo::new();
        let a = User { user_id: Uuid::new_v4() };
        let b = User { user_id: Uuid::new_v4() };

        repo.create(&a).await.unwrap();
        repo.create(&b).await.unwrap();
        assert!(repo.create(&a).await.is_err());

        assert_eq!(repo.find_by_id(a.user_id).await.unwrap(), Some(a));
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), None);

        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(repo.find_all().await.unwrap(), expected);

        assert_eq!(repo.delete(a.user_id).await.unwrap(), 1);
        assert_eq!(repo.delete(a.user_id).await.unwrap(), 0);
        assert_eq!(repo.find_all().await.unwrap(), vec![b]);

        repo.set_unavailable(true);
        assert!(repo.find_by_id(b.user_id).await.is_err());
    }
}
