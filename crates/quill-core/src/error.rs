//! Domain-level error types.

use thiserror::Error;

/// A rule on a post field was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {message}")]
pub struct ValidationError {
    /// Name of the offending field as it appears on the wire.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    /// The field is missing or empty.
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("`{field}` is required"),
        }
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A string that cannot name a post.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid post id `{0}`: expected 24 hexadecimal characters")]
pub struct InvalidPostId(pub String);

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Document mapping failed: {0}")]
    Serialization(String),
}

/// Errors raised by the post service.
///
/// "No such post" is not an error: lookups return `Option` and deletes
/// report a zero count.
#[derive(Debug, Error)]
pub enum PostError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidId(#[from] InvalidPostId),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}
