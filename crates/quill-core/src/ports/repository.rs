use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ListOptions, Post, PostDraft, PostId, PostPatch};
use crate::error::RepoError;

/// Lookup and removal by primary key, shared by every entity store.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Returns the number of records removed.
    async fn delete(&self, id: ID) -> Result<u64, RepoError>;
}

/// Post store. Each method is a single round-trip to the backend.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Short backend name for logs and health reports.
    fn backend(&self) -> &'static str;

    /// Persist a new post. The store assigns the id; both timestamps are `now`.
    async fn insert(&self, draft: PostDraft, now: DateTime<Utc>) -> Result<Post, RepoError>;

    async fn find_all(&self, options: ListOptions) -> Result<Vec<Post>, RepoError>;

    /// Posts whose author equals `author` exactly.
    async fn find_by_author(&self, author: &str) -> Result<Vec<Post>, RepoError>;

    /// Posts whose tag list contains `tag`.
    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Post>, RepoError>;

    /// Apply `patch` and return the updated post, or `None` if the id is unknown.
    ///
    /// `updatedAt` becomes `next_updated_at(previous, now)`.
    async fn update(
        &self,
        id: PostId,
        patch: PostPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError>;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<(), RepoError>;
}
