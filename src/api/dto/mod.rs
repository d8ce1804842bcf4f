//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs double as the validation schemas of the site's forms: the HTML
//! handlers deserialize the same types from `application/x-www-form-urlencoded`
//! bodies. Each one is normalized (trimmed, emails lowercased) before validation.

pub mod auth;
pub mod blog_post;
pub mod contact;
pub mod contact_message;
pub mod health;
pub mod list;
pub mod newsletter;

pub use auth::{LoginRequest, LoginResponse};
pub use blog_post::{CreatePostRequest, PublishForm, UpdatePostRequest};
pub use contact::ContactRequest;
pub use contact_message::{ReadForm, UpdateMessageRequest};
pub use health::{CheckState, CheckStatus, HealthChecks, HealthResponse, ServiceStatus};
pub use list::ListResponse;
pub use newsletter::NewsletterRequest;
