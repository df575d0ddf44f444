//! Domain entities - the core business objects.

mod listing;
mod post;
mod post_id;
mod timestamp;

pub use listing::{ListOptions, SortField, SortOrder};
pub use post::{NewPost, Post, PostDraft, PostPatch};
pub use post_id::PostId;
pub use timestamp::{next_updated_at, now};
