//! Server-rendered site.
//!
//! Public pages, the blog, the contact and newsletter forms, and the admin panel,
//! rendered with Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Admin session guard
//! - [`session`] - Browser sessions holding the admin and pending notices
//! - [`routes`] - Route tables
//! - [`notice`] - Notices carried across redirects
//! - [`layout`] - Navbar and footer state shared by every page

pub mod handlers;
pub mod layout;
pub mod middleware;
pub mod notice;
pub mod routes;
pub mod session;
