//! Application layer services implementing business logic.
//!
//! Services consume the repository traits of [`crate::domain`] and are shared by the
//! JSON API and the HTML site. Input reaching a service has already been validated
//! and normalized by the request layer.
//!
//! # Available Services
//!
//! - [`services::BlogService`] - Public blog reads and post management
//! - [`services::NewsletterService`] - Newsletter signups
//! - [`services::ContactService`] - Contact messages
//! - [`services::AuthService`] - Admin sign-in and role checks
//! - [`services::AdminService`] - Concurrent dashboard loading

pub mod services;
