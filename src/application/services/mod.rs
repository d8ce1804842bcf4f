//! Business logic services for the application layer.

pub mod admin_service;
pub mod auth_service;
pub mod blog_service;
pub mod contact_service;
pub mod newsletter_service;

pub use admin_service::{AdminService, Dashboard};
pub use auth_service::{ACCESS_DENIED, AuthService};
pub use blog_service::BlogService;
pub use contact_service::ContactService;
pub use newsletter_service::NewsletterService;
