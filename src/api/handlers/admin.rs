//! Handlers for the admin API.
//!
//! Every route here sits behind [`crate::api::middleware::auth`], which puts the
//! authorized [`AdminSession`] in the request extensions.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::{CreatePostRequest, ListResponse, UpdateMessageRequest, UpdatePostRequest};
use crate::domain::entities::{AdminSession, BlogPost, ContactMessage, NewsletterSubscriber};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/admin/posts` - every post, published or not.
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<Json<ListResponse<BlogPost>>, AppError> {
    let posts = state.blog_service.list_all(&session.access_token).await?;
    Ok(Json(posts.into()))
}

/// Creates a post.
///
/// # Endpoint
///
/// `POST /api/admin/posts`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Educar com presença",
///   "excerpt": "...",
///   "content": "<p>...</p>",
///   "cover_image": "https://...",
///   "published": false
/// }
/// ```
///
/// # Errors
///
/// - 422 when validation fails or the title has no letters or digits
/// - 409 when another post already has the same slug
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<BlogPost>), AppError> {
    let payload = payload.normalized();
    payload.validate()?;

    let post = state
        .blog_service
        .create_post(&session.access_token, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// `PATCH /api/admin/posts/{id}` - publishes or unpublishes a post.
pub async fn update_post_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<BlogPost>, AppError> {
    let post = state
        .blog_service
        .set_published(&session.access_token, id, payload.published)
        .await?;

    Ok(Json(post))
}

/// `DELETE /api/admin/posts/{id}`
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .blog_service
        .delete_post(&session.access_token, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/admin/subscribers`
pub async fn list_subscribers_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<Json<ListResponse<NewsletterSubscriber>>, AppError> {
    let subscribers = state
        .newsletter_service
        .list(&session.access_token)
        .await?;

    Ok(Json(subscribers.into()))
}

/// `GET /api/admin/messages`
pub async fn list_messages_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<Json<ListResponse<ContactMessage>>, AppError> {
    let messages = state.contact_service.list(&session.access_token).await?;
    Ok(Json(messages.into()))
}

/// `PATCH /api/admin/messages/{id}` - marks a message as read or unread.
pub async fn update_message_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMessageRequest>,
) -> Result<Json<ContactMessage>, AppError> {
    let message = state
        .contact_service
        .set_read(&session.access_token, id, payload.read)
        .await?;

    Ok(Json(message))
}
