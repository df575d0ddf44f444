use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PostId;
use crate::error::ValidationError;

/// Post entity - a single blog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Assemble a post from a validated draft.
    ///
    /// `createdAt` and `updatedAt` both start at `now`.
    pub fn from_draft(id: PostId, draft: PostDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            contents: draft.contents,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Caller-supplied fields for a post that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewPost {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewPost {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check the creation rules and produce a draft ready to persist.
    pub fn validate(self) -> Result<PostDraft, ValidationError> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(ValidationError::required("title")),
        };

        Ok(PostDraft {
            title,
            author: self.author,
            contents: self.contents,
            tags: self.tags,
        })
    }
}

/// A [`NewPost`] that passed validation. Only obtainable via
/// [`NewPost::validate`], so a draft always carries a non-blank title.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    title: String,
    author: Option<String>,
    contents: Option<String>,
    tags: Vec<String>,
}

impl PostDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.contents.is_none()
            && self.tags.is_none()
    }

    /// A patch may omit the title but must not blank it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.title {
            Some(title) if title.trim().is_empty() => Err(ValidationError::required("title")),
            _ => Ok(()),
        }
    }

    /// Write the supplied fields onto `post` and stamp `updated_at`.
    /// `id` and `created_at` are never touched.
    pub fn apply_to(self, post: &mut Post, updated_at: DateTime<Utc>) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(author) = self.author {
            post.author = Some(author);
        }
        if let Some(contents) = self.contents {
            post.contents = Some(contents);
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        post.updated_at = updated_at;
    }
}
