//! Middleware shared by the API and the HTML site.
//!
//! [`auth`] guards `/api/admin` and API sign-out; the panel's session guard lives in
//! [`crate::web::middleware`]. [`rate_limit`] and [`tracing`] wrap both surfaces.

pub mod auth;
pub mod rate_limit;
pub mod tracing;
