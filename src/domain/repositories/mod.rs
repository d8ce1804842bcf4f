//! Repository trait definitions for the domain layer.
//!
//! These traits are the seam between the site and the hosted backend. Implementations
//! live in [`crate::infrastructure::supabase`]; mocks are generated with `mockall` for
//! unit tests and the integration tests use in-memory fakes.
//!
//! # Available Repositories
//!
//! - [`BlogPostRepository`] - Blog posts
//! - [`SubscriberRepository`] - Newsletter subscribers
//! - [`ContactMessageRepository`] - Contact messages
//! - [`RoleRepository`] - Role grants
//! - [`AuthProvider`] - Password sign-in, sign-out and session lookup

pub mod auth_provider;
pub mod blog_post_repository;
pub mod contact_message_repository;
pub mod role_repository;
pub mod subscriber_repository;

pub use auth_provider::AuthProvider;
pub use blog_post_repository::BlogPostRepository;
pub use contact_message_repository::ContactMessageRepository;
pub use role_repository::RoleRepository;
pub use subscriber_repository::{SUBSCRIBER_EMAIL_CONSTRAINT, SubscriberRepository};

#[cfg(test)]
pub use auth_provider::MockAuthProvider;
#[cfg(test)]
pub use blog_post_repository::MockBlogPostRepository;
#[cfg(test)]
pub use contact_message_repository::MockContactMessageRepository;
#[cfg(test)]
pub use role_repository::MockRoleRepository;
#[cfg(test)]
pub use subscriber_repository::MockSubscriberRepository;
