//! Browser-facing middleware.
//!
//! - [`web_auth`] - Admin session check

pub mod web_auth;
