//! Site route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    about_handler, admin, blog_handler, blog_post_handler, contact_page_handler,
    contact_submit_handler, home_handler, method_handler, newsletter_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Public pages.
///
/// # Endpoints
///
/// - `GET /`             - Home
/// - `GET /sobre`        - About
/// - `GET /metodo`       - The method
/// - `GET /contacto`     - Contact form
/// - `GET /blog`         - Published posts
/// - `GET /blog/{slug}`  - One post
/// - `GET /admin/login`  - Admin sign-in form
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/sobre", get(about_handler))
        .route("/metodo", get(method_handler))
        .route("/contacto", get(contact_page_handler))
        .route("/blog", get(blog_handler))
        .route("/blog/{slug}", get(blog_post_handler))
        .route("/admin/login", get(admin::login_page_handler))
}

/// Form posts, served with the strict rate limiter.
///
/// # Endpoints
///
/// - `POST /contacto`      - Contact message
/// - `POST /newsletter`    - Newsletter signup from any page
/// - `POST /admin/login`   - Admin sign-in
/// - `POST /admin/logout`  - Admin sign-out
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/contacto", post(contact_submit_handler))
        .route("/newsletter", post(newsletter_handler))
        .route("/admin/login", post(admin::login_submit_handler))
        .route("/admin/logout", post(admin::logout_handler))
}

/// Admin panel, behind [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET  /admin`                      - Dashboard (`?tab=blog|newsletter|messages`)
/// - `POST /admin/posts`                - Create a post
/// - `POST /admin/posts/{id}/publish`   - Publish or unpublish
/// - `POST /admin/posts/{id}/delete`    - Delete a post
/// - `POST /admin/messages/{id}/read`   - Mark a message read or unread
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard_handler))
        .route("/admin/posts", post(admin::create_post_handler))
        .route("/admin/posts/{id}/publish", post(admin::publish_post_handler))
        .route("/admin/posts/{id}/delete", post(admin::delete_post_handler))
        .route("/admin/messages/{id}/read", post(admin::message_read_handler))
}
