//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod auth;
pub mod forms;
pub mod health;
pub mod posts;

pub use auth::{login_handler, logout_handler};
pub use forms::{contact_handler, newsletter_handler};
pub use health::health_handler;
pub use posts::{get_post_handler, list_posts_handler};
