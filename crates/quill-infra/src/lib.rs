//! # Quill Infrastructure
//!
//! Concrete implementations of the storage port defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mongodb` - MongoDB document store via the official driver

pub mod database;

pub use database::{InMemoryPostRepository, MongoConfig};

#[cfg(feature = "mongodb")]
pub use database::{MongoConnection, MongoPostRepository};
