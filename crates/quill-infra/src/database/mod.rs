//! Post storage backends and database connection management.

mod connections;
mod memory;

#[cfg(feature = "mongodb")]
pub mod document;
#[cfg(feature = "mongodb")]
mod mongo_repo;

pub use connections::MongoConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "mongodb")]
pub use connections::MongoConnection;
#[cfg(feature = "mongodb")]
pub use mongo_repo::MongoPostRepository;
