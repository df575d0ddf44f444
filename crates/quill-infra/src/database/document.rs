//! BSON shape of a post and the query documents built from domain types.

use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, DateTime as BsonDateTime, Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

use quill_core::domain::{ListOptions, Post, PostId, PostPatch};
use quill_core::error::RepoError;

/// A post as stored in the `posts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

pub fn to_object_id(id: PostId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

pub fn to_bson_datetime(at: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(at.timestamp_millis())
}

fn to_chrono(at: BsonDateTime) -> Result<DateTime<Utc>, RepoError> {
    DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis()).ok_or_else(|| {
        RepoError::Serialization(format!("timestamp {at} is out of range"))
    })
}

impl From<&Post> for PostDocument {
    fn from(post: &Post) -> Self {
        Self {
            id: to_object_id(post.id),
            title: post.title.clone(),
            author: post.author.clone(),
            contents: post.contents.clone(),
            tags: post.tags.clone(),
            created_at: to_bson_datetime(post.created_at),
            updated_at: to_bson_datetime(post.updated_at),
        }
    }
}

impl TryFrom<PostDocument> for Post {
    type Error = RepoError;

    fn try_from(document: PostDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PostId::from_bytes(document.id.bytes()),
            title: document.title,
            author: document.author,
            contents: document.contents,
            tags: document.tags,
            created_at: to_chrono(document.created_at)?,
            updated_at: to_chrono(document.updated_at)?,
        })
    }
}

pub fn id_filter(id: PostId) -> Document {
    doc! { "_id": to_object_id(id) }
}

pub fn sort_document(options: ListOptions) -> Document {
    let mut sort = Document::new();
    sort.insert(options.sort_by.as_str(), options.sort_order.as_i32());
    sort
}

/// Aggregation-pipeline update for a patch.
///
/// User values are wrapped in `$literal` so strings starting with `$` are
/// stored as-is rather than read as field paths. `updatedAt` moves to
/// `max(now, updatedAt + 1ms)` so it always advances.
pub fn update_pipeline(patch: PostPatch, now: DateTime<Utc>) -> Vec<Document> {
    let mut set = Document::new();

    if let Some(title) = patch.title {
        set.insert("title", literal(title));
    }
    if let Some(author) = patch.author {
        set.insert("author", literal(author));
    }
    if let Some(contents) = patch.contents {
        set.insert("contents", literal(contents));
    }
    if let Some(tags) = patch.tags {
        set.insert("tags", literal(tags));
    }
    let now = to_bson_datetime(now);
    set.insert(
        "updatedAt",
        doc! { "$max": [now, { "$add": ["$updatedAt", 1] }] },
    );

    vec![doc! { "$set": set }]
}

fn literal(value: impl Into<Bson>) -> Document {
    let value: Bson = value.into();
    doc! { "$literal": value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;
    use quill_core::domain::{NewPost, SortField, SortOrder, now};

    fn sample_post() -> Post {
        let draft = NewPost::titled("Hello")
            .author("Ada")
            .tags(["good"])
            .validate()
            .unwrap();
        Post::from_draft(PostId::from_bytes([7; 12]), draft, now())
    }

    #[test]
    fn test_document_round_trip_preserves_post() {
        let post = sample_post();
        let document = PostDocument::from(&post);

        assert_eq!(document.id.to_hex(), post.id.to_hex());
        assert_eq!(Post::try_from(document).unwrap(), post);
    }

    #[test]
    fn test_document_uses_camel_case_keys() {
        let post = sample_post();
        let raw = bson::to_document(&PostDocument::from(&post)).unwrap();

        assert!(raw.contains_key("_id"));
        assert!(raw.contains_key("createdAt"));
        assert!(raw.contains_key("updatedAt"));
        assert!(!raw.contains_key("contents"));
    }

    #[test]
    fn test_missing_optional_fields_decode() {
        let raw = doc! {
            "_id": ObjectId::from_bytes([1; 12]),
            "title": "Bare",
            "createdAt": BsonDateTime::from_millis(1_000),
            "updatedAt": BsonDateTime::from_millis(2_000),
        };

        let document: PostDocument = bson::from_document(raw).unwrap();
        let post = Post::try_from(document).unwrap();
        assert_eq!(post.title, "Bare");
        assert_eq!(post.author, None);
        assert!(post.tags.is_empty());
        assert_eq!(post.updated_at.timestamp_millis(), 2_000);
    }

    #[test]
    fn test_sort_document() {
        let sort = sort_document(ListOptions::default());
        assert_eq!(sort, doc! { "createdAt": -1 });

        let sort = sort_document(ListOptions::new(SortField::UpdatedAt, SortOrder::Ascending));
        assert_eq!(sort, doc! { "updatedAt": 1 });
    }

    #[test]
    fn test_update_pipeline_sets_only_patched_fields() {
        let patch = PostPatch {
            author: Some("$where".to_string()),
            ..PostPatch::default()
        };
        let pipeline = update_pipeline(patch, now());

        assert_eq!(pipeline.len(), 1);
        let set = pipeline[0].get_document("$set").unwrap();
        assert_eq!(
            set.get_document("author").unwrap(),
            &doc! { "$literal": "$where" }
        );
        assert!(set.contains_key("updatedAt"));
        assert!(!set.contains_key("title"));
        assert!(!set.contains_key("createdAt"));
    }
}
