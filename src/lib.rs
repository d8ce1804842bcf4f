//! # Método Raízes website
//!
//! Public site, blog, newsletter and contact forms, and a content panel for the
//! Método Raízes® coaching practice. Content, subscribers and messages live in a
//! hosted Supabase project; this crate renders the pages and talks to the
//! project's REST and auth services.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits and the admin sign-in
//!   state machine
//! - **Application Layer** ([`application`]) - Business logic and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Hosted backend client and
//!   repository implementations
//! - **API Layer** ([`api`]) - JSON API handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - Server-rendered pages and the admin panel
//!
//! ## Quick Start
//!
//! ```bash
//! export SUPABASE_URL="https://abcd.supabase.co"
//! export SUPABASE_ANON_KEY="..."
//!
//! # Apply the schema, then grant the first administrator
//! cargo run --bin admin -- schema > schema.sql
//! cargo run --bin admin -- role grant ana@example.com
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AdminService, AuthService, BlogService, ContactService, NewsletterService,
    };
    pub use crate::domain::admin_auth::{AuthEvent, AuthState};
    pub use crate::domain::entities::{
        AdminSession, AppRole, AuthSession, AuthUser, BlogPost, ContactMessage, NewBlogPost,
        NewContactMessage, NewSubscriber, NewsletterSubscriber,
    };
    pub use crate::error::AppError;
    pub use crate::state::{AppState, Backend};
}
