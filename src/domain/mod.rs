//! Domain layer containing the site's data model and backend contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Blog posts, subscribers, contact messages and sessions
//! - [`repositories`] - Data access traits implemented by the infrastructure layer
//! - [`admin_auth`] - Authenticate-then-authorize state machine for the admin panel
//!
//! # Design Principles
//!
//! - The domain layer has no dependency on HTTP, templates or the backend client
//! - Repository traits are the only way services reach the hosted backend
//! - Business rules live in [`crate::application::services`]

pub mod admin_auth;
pub mod entities;
pub mod repositories;
