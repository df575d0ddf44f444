//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::PostRepository;
use quill_infra::{InMemoryPostRepository, MongoConfig};

#[cfg(feature = "mongodb")]
use quill_infra::{MongoConnection, MongoPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the application state with the configured post store.
    ///
    /// Falls back to the in-memory store when no database is configured or
    /// the configured one cannot be reached.
    pub async fn new(db_config: Option<&MongoConfig>) -> Self {
        let repo = Self::post_repository(db_config).await;
        tracing::info!(backend = repo.backend(), "Application state initialized");

        Self::with_repository(repo)
    }

    pub fn with_repository(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            posts: PostService::new(repo),
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()))
    }

    #[cfg(feature = "mongodb")]
    async fn post_repository(db_config: Option<&MongoConfig>) -> Arc<dyn PostRepository> {
        let Some(config) = db_config else {
            tracing::warn!("MONGODB_URI not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryPostRepository::new());
        };

        match MongoConnection::init(config).await {
            Ok(conn) => Arc::new(MongoPostRepository::from_connection(&conn, config)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryPostRepository::new())
            }
        }
    }

    #[cfg(not(feature = "mongodb"))]
    async fn post_repository(db_config: Option<&MongoConfig>) -> Arc<dyn PostRepository> {
        if db_config.is_some() {
            tracing::warn!("Built without mongodb feature - ignoring MONGODB_URI");
        }
        tracing::info!("Using in-memory post repository");
        Arc::new(InMemoryPostRepository::new())
    }
}
