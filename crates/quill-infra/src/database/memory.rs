//! In-memory post store - used when no database is configured, and by tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use quill_core::domain::{ListOptions, Post, PostDraft, PostId, PostPatch, next_updated_at};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

/// Process-wide so ids stay unique across several stores.
static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// In-memory post store backed by a `Vec` behind an async RwLock.
///
/// Insertion order is the natural order used to break sort ties.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
        }
    }

    /// Object-id shaped: 4 bytes of unix seconds then an 8 byte counter.
    fn next_id() -> PostId {
        let seconds = Utc::now().timestamp() as u32;
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&sequence.to_be_bytes());
        PostId::from_bytes(bytes)
    }

    async fn find_where(&self, predicate: impl Fn(&Post) -> bool) -> Vec<Post> {
        let store = self.store.read().await;
        store.iter().filter(|p| predicate(*p)).cloned().collect()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: PostId) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        match store.iter().position(|p| p.id == id) {
            Some(index) => {
                store.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, draft: PostDraft, now: DateTime<Utc>) -> Result<Post, RepoError> {
        let post = Post::from_draft(Self::next_id(), draft, now);

        let mut store = self.store.write().await;
        store.push(post.clone());

        Ok(post)
    }

    async fn find_all(&self, options: ListOptions) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.store.read().await.clone();
        // Stable, so ties keep insertion order
        posts.sort_by(|a, b| options.compare(a, b));
        Ok(posts)
    }

    async fn find_by_author(&self, author: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .find_where(|p| p.author.as_deref() == Some(author))
            .await)
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self.find_where(|p| p.has_tag(tag)).await)
    }

    async fn update(
        &self,
        id: PostId,
        patch: PostPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let Some(post) = store.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        let updated_at = next_updated_at(post.updated_at, now);
        patch.apply_to(post, updated_at);
        Ok(Some(post.clone()))
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
