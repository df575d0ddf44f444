//! Smoke run of the post service.
//!
//! Uses MongoDB when `MONGODB_URI` is set, otherwise the in-memory store.
//! Exits non-zero as soon as an observed behaviour is wrong.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, ensure};
use quill_core::PostService;
use quill_core::domain::{ListOptions, NewPost, PostId, PostPatch, SortField, SortOrder};
use quill_core::ports::PostRepository;
use quill_infra::{InMemoryPostRepository, MongoConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("info,quill_core=debug")
        .init();

    let repo = repository(MongoConfig::from_env()).await?;
    let service = PostService::new(repo);
    tracing::info!(backend = service.backend(), "Smoke run starting");

    run(&service).await?;

    tracing::info!("Smoke run passed");
    Ok(())
}

#[cfg(feature = "mongodb")]
async fn repository(config: Option<MongoConfig>) -> anyhow::Result<Arc<dyn PostRepository>> {
    use quill_infra::{MongoConnection, MongoPostRepository};

    match config {
        Some(config) => {
            let conn = MongoConnection::init(&config)
                .await
                .context("connecting to MONGODB_URI")?;
            Ok(Arc::new(MongoPostRepository::from_connection(&conn, &config)))
        }
        None => Ok(Arc::new(InMemoryPostRepository::new())),
    }
}

#[cfg(not(feature = "mongodb"))]
async fn repository(_config: Option<MongoConfig>) -> anyhow::Result<Arc<dyn PostRepository>> {
    Ok(Arc::new(InMemoryPostRepository::new()))
}

async fn run(service: &PostService) -> anyhow::Result<()> {
    let fixtures = [
        NewPost::titled("Smoke: hello")
            .author("Ada")
            .contents("First post")
            .tags(["intro", "good"]),
        NewPost::titled("Smoke: second").author("Grace").tags(["good"]),
        NewPost::titled("Smoke: third").author("Unknown"),
    ];

    let mut created = Vec::new();
    for fixture in fixtures {
        let post = service.create_post(fixture).await?;
        ensure!(post.created_at == post.updated_at, "fresh post has differing timestamps");
        tracing::info!(id = %post.id, title = %post.title, "Created");
        created.push(post);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    match service.create_post(NewPost::default().author("Ada")).await {
        Ok(post) => anyhow::bail!("post without a title was accepted as {}", post.id),
        Err(e) => tracing::info!(error = %e, "Untitled post rejected"),
    }

    let newest_first = service.list_all_posts(ListOptions::default()).await?;
    ensure!(
        newest_first.windows(2).all(|w| w[0].created_at >= w[1].created_at),
        "default listing is not newest first"
    );
    tracing::info!(count = newest_first.len(), "Listed newest first");

    let oldest_update_first = service
        .list_all_posts(ListOptions::new(SortField::UpdatedAt, SortOrder::Ascending))
        .await?;
    ensure!(
        oldest_update_first.windows(2).all(|w| w[0].updated_at <= w[1].updated_at),
        "updatedAt ascending listing is out of order"
    );

    // Containment only: a shared database may already hold other posts
    let by_author = service.list_posts_by_author("Unknown").await?;
    ensure!(
        by_author.iter().any(|p| p.id == created[2].id),
        "by-author listing misses the post by Unknown"
    );
    ensure!(
        by_author.iter().all(|p| p.author.as_deref() == Some("Unknown")),
        "by-author listing returned another author"
    );
    tracing::info!(count = by_author.len(), "Posts by Unknown");

    let tagged = service.list_posts_by_tag("good").await?;
    ensure!(
        created[..2].iter().all(|c| tagged.iter().any(|p| p.id == c.id)),
        "tag listing misses a post tagged good"
    );
    ensure!(
        tagged.iter().all(|p| p.has_tag("good")),
        "tag listing returned an untagged post"
    );
    tracing::info!(count = tagged.len(), "Posts tagged good");

    let target = &created[0];
    let fetched = service.get_post_by_id(target.id).await?;
    ensure!(fetched.as_ref() == Some(target), "fetched post differs from created one");

    let missing = PostId::from_bytes([0; 12]);
    ensure!(
        service.get_post_by_id(missing).await?.is_none(),
        "all-zero id resolved to a post"
    );
    ensure!(
        service.update_post(missing, PostPatch::default()).await?.is_none(),
        "update of an all-zero id found a post"
    );

    let patch = PostPatch {
        author: Some("Ada Lovelace".to_string()),
        ..PostPatch::default()
    };
    let updated = service
        .update_post(target.id, patch)
        .await?
        .context("update lost the post")?;
    ensure!(updated.title == target.title, "update changed the title");
    ensure!(updated.created_at == target.created_at, "update changed createdAt");
    ensure!(updated.updated_at > target.updated_at, "updatedAt did not advance");
    tracing::info!(id = %updated.id, author = ?updated.author, "Updated");

    for post in &created {
        let result = service.delete_post(post.id).await?;
        ensure!(result.deleted_count == 1, "delete of {} removed nothing", post.id);
    }
    let again = service.delete_post(target.id).await?;
    ensure!(again.deleted_count == 0, "second delete removed something");
    tracing::info!(count = created.len(), "Cleaned up");

    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use quill_core::RepoError;
    use quill_core::domain::{Post, PostDraft};
    use quill_core::ports::BaseRepository;

    use super::*;

    #[derive(Clone, Copy)]
    enum Lose {
        Author,
        Tag,
    }

    /// Memory store whose author or tag filter loses every match.
    struct LossyFilter {
        inner: InMemoryPostRepository,
        lose: Lose,
    }

    #[async_trait]
    impl BaseRepository<Post, PostId> for LossyFilter {
        async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
            self.inner.find_by_id(id).await
        }

        async fn delete(&self, id: PostId) -> Result<u64, RepoError> {
            self.inner.delete(id).await
        }
    }

    #[async_trait]
    impl PostRepository for LossyFilter {
        fn backend(&self) -> &'static str {
            "lossy"
        }

        async fn insert(&self, draft: PostDraft, now: DateTime<Utc>) -> Result<Post, RepoError> {
            self.inner.insert(draft, now).await
        }

        async fn find_all(&self, options: ListOptions) -> Result<Vec<Post>, RepoError> {
            self.inner.find_all(options).await
        }

        async fn find_by_author(&self, author: &str) -> Result<Vec<Post>, RepoError> {
            match self.lose {
                Lose::Author => Ok(Vec::new()),
                Lose::Tag => self.inner.find_by_author(author).await,
            }
        }

        async fn find_by_tag(&self, tag: &str) -> Result<Vec<Post>, RepoError> {
            match self.lose {
                Lose::Tag => Ok(Vec::new()),
                Lose::Author => self.inner.find_by_tag(tag).await,
            }
        }

        async fn update(
            &self,
            id: PostId,
            patch: PostPatch,
            now: DateTime<Utc>,
        ) -> Result<Option<Post>, RepoError> {
            self.inner.update(id, patch, now).await
        }

        async fn ping(&self) -> Result<(), RepoError> {
            Ok(())
        }
    }

    fn lossy(lose: Lose) -> PostService {
        PostService::new(Arc::new(LossyFilter {
            inner: InMemoryPostRepository::new(),
            lose,
        }))
    }

    #[tokio::test]
    async fn test_run_passes_on_memory_store() {
        let service = PostService::new(Arc::new(InMemoryPostRepository::new()));
        run(&service).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_fails_when_author_filter_loses_posts() {
        let err = run(&lossy(Lose::Author)).await.unwrap_err();
        assert!(err.to_string().contains("by-author"));
    }

    #[tokio::test]
    async fn test_run_fails_when_tag_filter_loses_posts() {
        let err = run(&lossy(Lose::Tag)).await.unwrap_err();
        assert!(err.to_string().contains("tag listing"));
    }
}
