//! Handlers for the public blog endpoints.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::ListResponse;
use crate::domain::entities::BlogPost;
use crate::error::AppError;
use crate::state::AppState;

/// Lists published posts, newest first.
///
/// # Endpoint
///
/// `GET /api/posts`
pub async fn list_posts_handler(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<BlogPost>>, AppError> {
    let posts = state.blog_service.list_published().await?;
    Ok(Json(posts.into()))
}

/// Returns one published post.
///
/// # Endpoint
///
/// `GET /api/posts/{slug}`
///
/// # Errors
///
/// Returns 404 for unknown slugs and for posts that are not published.
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, AppError> {
    let post = state.blog_service.get_published(&slug).await?;
    Ok(Json(post))
}
