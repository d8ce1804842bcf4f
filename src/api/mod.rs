//! JSON API mounted under `/api`.
//!
//! Mirrors what the HTML site does (published posts, the two public forms, admin
//! content management) for scripted clients. Admin endpoints take the backend access
//! token as a Bearer token instead of the session cookie used by the panel.
//!
//! - [`dto`] - request bodies with their validation rules, response envelopes
//! - [`handlers`] - one handler per endpoint
//! - [`middleware`] - Bearer authorization, rate limiting, request tracing
//! - [`routes`] - public, form and admin route groups

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
