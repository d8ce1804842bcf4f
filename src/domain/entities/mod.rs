//! Core domain entities representing the site's data model.
//!
//! All rows are owned by the hosted database; these structs are request-scoped copies
//! deserialized from its REST responses.
//!
//! # Entity Types
//!
//! - [`BlogPost`] - An article of the blog
//! - [`NewsletterSubscriber`] - A newsletter signup
//! - [`ContactMessage`] - A message from the contact form
//! - [`AuthSession`] / [`AdminSession`] - Backend sessions and authorized admin sessions
//!
//! `New*` structs carry validated, normalized input for inserts.

pub mod blog_post;
pub mod contact_message;
pub mod session;
pub mod subscriber;

pub use blog_post::{BlogPost, NewBlogPost};
pub use contact_message::{ContactMessage, NewContactMessage};
pub use session::{AdminSession, AppRole, AuthSession, AuthUser};
pub use subscriber::{NewSubscriber, NewsletterSubscriber};
