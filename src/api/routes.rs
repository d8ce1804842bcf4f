//! API route configuration.

use crate::api::handlers::{
    admin, contact_handler, get_post_handler, list_posts_handler, login_handler, logout_handler,
    newsletter_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Public reads, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET  /posts`          - Published posts, newest first
/// - `GET  /posts/{slug}`   - One published post
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts_handler))
        .route("/posts/{slug}", get(get_post_handler))
}

/// Public writes, mounted under `/api` with the strict rate limiter.
///
/// # Endpoints
///
/// - `POST /newsletter`     - Newsletter signup
/// - `POST /contact`        - Contact message
/// - `POST /auth/login`     - Admin sign-in
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/newsletter", post(newsletter_handler))
        .route("/contact", post(contact_handler))
        .route("/auth/login", post(login_handler))
}

/// Sign-out, mounted under `/api` behind [`crate::api::middleware::auth`].
///
/// # Endpoints
///
/// - `POST /auth/logout`    - Revoke the Bearer token's session
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/auth/logout", post(logout_handler))
}

/// Admin routes, mounted under `/api/admin` behind
/// [`crate::api::middleware::auth`].
///
/// # Endpoints
///
/// - `GET    /posts`            - All posts
/// - `POST   /posts`            - Create a post
/// - `PATCH  /posts/{id}`       - Publish or unpublish
/// - `DELETE /posts/{id}`       - Delete a post
/// - `GET    /subscribers`      - Newsletter subscribers
/// - `GET    /messages`         - Contact messages
/// - `PATCH  /messages/{id}`    - Mark read or unread
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(admin::list_posts_handler).post(admin::create_post_handler),
        )
        .route(
            "/posts/{id}",
            patch(admin::update_post_handler).delete(admin::delete_post_handler),
        )
        .route("/subscribers", get(admin::list_subscribers_handler))
        .route("/messages", get(admin::list_messages_handler))
        .route("/messages/{id}", patch(admin::update_message_handler))
}
