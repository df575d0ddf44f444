//! MongoDB post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use quill_core::domain::{ListOptions, Post, PostDraft, PostId, PostPatch};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

use super::connections::{MongoConfig, MongoConnection};
use super::document::{self, PostDocument};

/// Post repository over a single MongoDB collection.
pub struct MongoPostRepository {
    database: Database,
    collection: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(database: Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
            database,
        }
    }

    pub fn from_connection(conn: &MongoConnection, config: &MongoConfig) -> Self {
        Self::new(conn.database.clone(), &config.collection)
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Post>, RepoError> {
        let cursor = self.collection.find(filter).await.map_err(map_err)?;
        collect(cursor).await
    }
}

async fn collect(cursor: mongodb::Cursor<PostDocument>) -> Result<Vec<Post>, RepoError> {
    let documents: Vec<PostDocument> = cursor.try_collect().await.map_err(map_err)?;
    documents.into_iter().map(Post::try_from).collect()
}

/// Sort driver errors into the repository taxonomy. Nothing is retried here.
fn map_err(err: MongoError) -> RepoError {
    let message = err.to_string();
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::DnsResolve { .. } => {
            RepoError::Connection(message)
        }
        ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
            RepoError::Serialization(message)
        }
        _ => RepoError::Query(message),
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for MongoPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = %id, "Finding post by id");

        let result = self
            .collection
            .find_one(document::id_filter(id))
            .await
            .map_err(map_err)?;

        result.map(Post::try_from).transpose()
    }

    async fn delete(&self, id: PostId) -> Result<u64, RepoError> {
        let result = self
            .collection
            .delete_one(document::id_filter(id))
            .await
            .map_err(map_err)?;

        Ok(result.deleted_count)
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn insert(&self, draft: PostDraft, now: DateTime<Utc>) -> Result<Post, RepoError> {
        let id = PostId::from_bytes(ObjectId::new().bytes());
        let post = Post::from_draft(id, draft, now);

        self.collection
            .insert_one(PostDocument::from(&post))
            .await
            .map_err(map_err)?;

        Ok(post)
    }

    async fn find_all(&self, options: ListOptions) -> Result<Vec<Post>, RepoError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(document::sort_document(options))
            .await
            .map_err(map_err)?;

        collect(cursor).await
    }

    async fn find_by_author(&self, author: &str) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(author = %author, "Finding posts by author");
        self.find_many(doc! { "author": author }).await
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(tag = %tag, "Finding posts by tag");
        // Equality on an array field matches any element
        self.find_many(doc! { "tags": tag }).await
    }

    async fn update(
        &self,
        id: PostId,
        patch: PostPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let result = self
            .collection
            .find_one_and_update(document::id_filter(id), document::update_pipeline(patch, now))
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_err)?;

        result.map(Post::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_err)?;
        Ok(())
    }
}
