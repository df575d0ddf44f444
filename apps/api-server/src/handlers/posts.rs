//! Post CRUD handlers.

use actix_web::{HttpResponse, web};

use quill_core::PostError;
use quill_core::domain::{ListOptions, NewPost, Post, PostPatch};
use quill_shared::ApiResponse;
use quill_shared::dto::{
    CreatePostRequest, DeletePostResponse, ListPostsQuery, PostResponse, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_hex(),
        title: post.title,
        author: post.author,
        contents: post.contents,
        tags: post.tags,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Post {} not found", id))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new = NewPost {
        title: req.title,
        author: req.author,
        contents: req.contents,
        tags: req.tags,
    };

    let post = state.posts.create_post(new).await?;
    tracing::info!(request_id = %request_id.as_str(), post_id = %post.id, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(post))))
}

/// GET /api/posts?sortBy=&sortOrder=  |  ?author=  |  ?tag=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let options = ListOptions::parse(query.sort_by.as_deref(), query.sort_order.as_deref())
        .map_err(PostError::from)?;
    let sorted = query.sort_by.is_some() || query.sort_order.is_some();

    let posts = match (query.author, query.tag) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "Filter by either author or tag, not both".to_string(),
            ));
        }
        (Some(_), None) | (None, Some(_)) if sorted => {
            return Err(AppError::BadRequest(
                "sortBy and sortOrder apply only to the unfiltered listing".to_string(),
            ));
        }
        (Some(author), None) => state.posts.list_posts_by_author(&author).await?,
        (None, Some(tag)) => state.posts.list_posts_by_tag(&tag).await?,
        (None, None) => state.posts.list_all_posts(options).await?,
    };

    let posts: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state.posts.get_post(&id).await?.ok_or_else(|| not_found(&id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// PATCH /api/posts/{id} (PUT is accepted as an alias)
pub async fn update_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let patch = PostPatch {
        title: req.title,
        author: req.author,
        contents: req.contents,
        tags: req.tags,
    };

    let post = state
        .posts
        .update_post_by_raw_id(&id, patch)
        .await?
        .ok_or_else(|| not_found(&id))?;
    tracing::info!(request_id = %request_id.as_str(), post_id = %post.id, "Post updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// DELETE /api/posts/{id} - deleting an unknown id reports a zero count.
pub async fn delete_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let result = state.posts.delete_post_by_raw_id(&id).await?;
    tracing::info!(
        request_id = %request_id.as_str(),
        post_id = %id,
        deleted_count = result.deleted_count,
        "Post delete"
    );

    let body = DeletePostResponse {
        deleted_count: result.deleted_count,
    };
    let message = if result.is_deleted() {
        "Post deleted"
    } else {
        "No post matched"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(body, message)))
}
