//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Request to create a post. `title` is checked server-side so a missing one
/// yields a validation error rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

/// `null` reads as an empty list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Partial update. Omitted fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Query string for `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub author: Option<String>,
    pub tag: Option<String>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostResponse {
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_tags_default_to_empty() {
        let omitted: CreatePostRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert!(omitted.tags.is_empty());

        let null: CreatePostRequest =
            serde_json::from_str(r#"{"title":"x","tags":null}"#).unwrap();
        assert!(null.tags.is_empty());

        let given: CreatePostRequest =
            serde_json::from_str(r#"{"title":"x","tags":["a","b"]}"#).unwrap();
        assert_eq!(given.tags, ["a", "b"]);
    }

    #[test]
    fn test_list_query_uses_camel_case() {
        let query: ListPostsQuery =
            serde_json::from_str(r#"{"sortBy":"updatedAt","sortOrder":"ascending"}"#).unwrap();
        assert_eq!(query.sort_by.as_deref(), Some("updatedAt"));
        assert_eq!(query.sort_order.as_deref(), Some("ascending"));
    }
}
