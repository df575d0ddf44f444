use std::time::Duration;

#[cfg(feature = "mongodb")]
use mongodb::{Client, Database, bson::doc, options::ClientOptions};
#[cfg(feature = "mongodb")]
use quill_core::error::RepoError;

/// Configuration for the document database.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string (e.g., mongodb://localhost:27017)
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// Bounds both the TCP connect and server selection.
    pub connect_timeout: Duration,
    /// Reported to the server for its logs.
    pub app_name: String,
}

impl MongoConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: "quill".to_string(),
            collection: "posts".to_string(),
            connect_timeout: Duration::from_secs(10),
            app_name: "quill".to_string(),
        }
    }

    /// Load configuration from environment variables.
    /// Returns `None` when `MONGODB_URI` is not set.
    pub fn from_env() -> Option<Self> {
        let uri = std::env::var("MONGODB_URI").ok()?;
        let defaults = Self::new(uri);

        Some(Self {
            database: std::env::var("MONGODB_DATABASE").unwrap_or(defaults.database.clone()),
            collection: std::env::var("MONGODB_COLLECTION")
                .unwrap_or(defaults.collection.clone()),
            connect_timeout: std::env::var("MONGODB_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            ..defaults
        })
    }
}

/// Long-lived handle to the document database.
///
/// Created once at startup and cloned into each repository; the driver
/// pools connections internally.
#[cfg(feature = "mongodb")]
#[derive(Clone)]
pub struct MongoConnection {
    pub client: Client,
    pub database: Database,
}

#[cfg(feature = "mongodb")]
impl MongoConnection {
    /// Connect and ping the server so misconfiguration surfaces at startup.
    pub async fn init(config: &MongoConfig) -> Result<Self, RepoError> {
        tracing::info!("Initializing database connection...");

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        options.app_name = Some(config.app_name.clone());
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);

        let client =
            Client::with_options(options).map_err(|e| RepoError::Connection(e.to_string()))?;
        let database = client.database(&config.database);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Document database connected"
        );

        Ok(Self { client, database })
    }
}
