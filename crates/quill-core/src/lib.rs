//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains the post model, its validation rules, the storage port
//! and the post service. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{PostError, RepoError, ValidationError};
pub use service::{DeleteResult, PostService};
