//! Post service - the operations callers use to manage posts.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{self, ListOptions, NewPost, Post, PostId, PostPatch};
use crate::error::PostError;
use crate::ports::PostRepository;

/// Outcome of a delete. Removing an unknown id is a success with a zero count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn is_deleted(&self) -> bool {
        self.deleted_count > 0
    }
}

/// CRUD over posts, backed by an injected [`PostRepository`].
///
/// Holds no state of its own besides the store handle, so it is cheap to
/// clone and share across handlers.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Name of the backend behind this service.
    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    pub async fn ping(&self) -> Result<(), PostError> {
        Ok(self.repo.ping().await?)
    }

    /// Validate and persist a new post.
    pub async fn create_post(&self, new: NewPost) -> Result<Post, PostError> {
        let draft = new.validate()?;
        let post = self.repo.insert(draft, domain::now()).await?;
        tracing::debug!(post_id = %post.id, "Post created");
        Ok(post)
    }

    /// Every post, ordered by `options`.
    pub async fn list_all_posts(&self, options: ListOptions) -> Result<Vec<Post>, PostError> {
        Ok(self.repo.find_all(options).await?)
    }

    pub async fn list_posts_by_author(&self, author: &str) -> Result<Vec<Post>, PostError> {
        Ok(self.repo.find_by_author(author).await?)
    }

    pub async fn list_posts_by_tag(&self, tag: &str) -> Result<Vec<Post>, PostError> {
        Ok(self.repo.find_by_tag(tag).await?)
    }

    /// `Ok(None)` when no post has this id.
    pub async fn get_post_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Apply a partial update. `Ok(None)` when no post has this id.
    pub async fn update_post(
        &self,
        id: PostId,
        patch: PostPatch,
    ) -> Result<Option<Post>, PostError> {
        patch.validate()?;
        let updated = self.repo.update(id, patch, domain::now()).await?;
        if updated.is_none() {
            tracing::debug!(post_id = %id, "Update matched no post");
        }
        Ok(updated)
    }

    pub async fn delete_post(&self, id: PostId) -> Result<DeleteResult, PostError> {
        let deleted_count = self.repo.delete(id).await?;
        tracing::debug!(post_id = %id, deleted_count, "Post delete");
        Ok(DeleteResult { deleted_count })
    }

    /// [`Self::get_post_by_id`] for an id that still needs parsing.
    pub async fn get_post(&self, raw_id: &str) -> Result<Option<Post>, PostError> {
        self.get_post_by_id(raw_id.parse()?).await
    }

    pub async fn update_post_by_raw_id(
        &self,
        raw_id: &str,
        patch: PostPatch,
    ) -> Result<Option<Post>, PostError> {
        self.update_post(raw_id.parse()?, patch).await
    }

    pub async fn delete_post_by_raw_id(&self, raw_id: &str) -> Result<DeleteResult, PostError> {
        self.delete_post(raw_id.parse()?).await
    }
}
