//! Behaviour every post backend must show, written once and run per backend.

use std::time::Duration;

use quill_core::domain::{ListOptions, NewPost, Post, PostId, PostPatch, SortField, SortOrder};
use quill_core::{PostError, PostService};

/// Creation timestamps have millisecond resolution; space fixtures out so
/// orderings are unambiguous.
pub async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

/// Four posts, one by "Unknown", two tagged "good".
pub async fn seed(service: &PostService) -> Vec<Post> {
    let fixtures = [
        NewPost::titled("First post")
            .author("Ada")
            .contents("Hello world")
            .tags(["intro", "good"]),
        NewPost::titled("Second post").author("Grace").tags(["good"]),
        NewPost::titled("Third post").author("Unknown").tags(["meh"]),
        NewPost::titled("Fourth post").author("Ada"),
    ];

    let mut created = Vec::new();
    for fixture in fixtures {
        created.push(service.create_post(fixture).await.unwrap());
        tick().await;
    }
    created
}

pub async fn create_sets_equal_timestamps(service: &PostService) {
    let post = service
        .create_post(NewPost::titled("Hello").author("Ada"))
        .await
        .unwrap();

    assert_eq!(post.title, "Hello");
    assert_eq!(post.created_at, post.updated_at);
    assert!(post.tags.is_empty());
}

pub async fn create_without_title_fails(service: &PostService) {
    let err = service
        .create_post(NewPost::default().author("Ada"))
        .await
        .unwrap_err();

    assert!(matches!(err, PostError::Validation(_)));
    assert!(err.to_string().contains("title"));
}

pub async fn list_defaults_to_newest_first(service: &PostService) {
    seed(service).await;

    let posts = service.list_all_posts(ListOptions::default()).await.unwrap();

    assert_eq!(posts.len(), 4);
    assert!(posts.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert_eq!(posts[0].title, "Fourth post");
}

pub async fn list_sorts_by_updated_at_ascending(service: &PostService) {
    let seeded = seed(service).await;
    // Touch the oldest post so updatedAt order differs from createdAt order
    service
        .update_post(seeded[0].id, PostPatch::default())
        .await
        .unwrap();

    let options = ListOptions::new(SortField::UpdatedAt, SortOrder::Ascending);
    let posts = service.list_all_posts(options).await.unwrap();

    assert!(posts.windows(2).all(|w| w[0].updated_at <= w[1].updated_at));
    assert_eq!(posts.last().unwrap().id, seeded[0].id);
}

pub async fn filter_by_author(service: &PostService) {
    seed(service).await;

    let posts = service.list_posts_by_author("Unknown").await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Third post");

    // Exact, case-sensitive match
    assert!(service.list_posts_by_author("unknown").await.unwrap().is_empty());
    assert_eq!(service.list_posts_by_author("Ada").await.unwrap().len(), 2);
}

pub async fn filter_by_tag(service: &PostService) {
    seed(service).await;

    let posts = service.list_posts_by_tag("good").await.unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.has_tag("good")));

    assert!(service.list_posts_by_tag("missing").await.unwrap().is_empty());
}

pub async fn get_by_id(service: &PostService) {
    let seeded = seed(service).await;

    let found = service.get_post_by_id(seeded[1].id).await.unwrap();
    assert_eq!(found.as_ref(), Some(&seeded[1]));

    let missing: PostId = "000000000000000000000000".parse().unwrap();
    assert_eq!(service.get_post_by_id(missing).await.unwrap(), None);
}

pub async fn update_changes_only_given_fields(service: &PostService) {
    let original = service
        .create_post(NewPost::titled("Hello").author("Ada").contents("body"))
        .await
        .unwrap();
    tick().await;

    let patch = PostPatch {
        author: Some("Grace".to_string()),
        ..PostPatch::default()
    };
    let updated = service
        .update_post(original.id, patch)
        .await
        .unwrap()
        .expect("post exists");

    assert_eq!(updated.author.as_deref(), Some("Grace"));
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.contents, original.contents);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);

    let reread = service.get_post_by_id(original.id).await.unwrap();
    assert_eq!(reread, Some(updated));
}

pub async fn update_missing_returns_none(service: &PostService) {
    let missing: PostId = "000000000000000000000000".parse().unwrap();
    let patch = PostPatch {
        title: Some("Nope".to_string()),
        ..PostPatch::default()
    };

    assert_eq!(service.update_post(missing, patch).await.unwrap(), None);
}

pub async fn delete_is_idempotent(service: &PostService) {
    let post = service.create_post(NewPost::titled("Doomed")).await.unwrap();

    let first = service.delete_post(post.id).await.unwrap();
    assert_eq!(first.deleted_count, 1);
    assert_eq!(service.get_post_by_id(post.id).await.unwrap(), None);

    let second = service.delete_post(post.id).await.unwrap();
    assert_eq!(second.deleted_count, 0);
    assert!(!second.is_deleted());
}
