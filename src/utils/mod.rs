//! Utility functions shared by the API and web layers.
//!
//! - [`slug`] - Slug derivation for blog post titles
//! - [`validation`] - Field-scoped messages from `validator` errors
//! - [`dates`] - Portuguese date formatting
//! - [`redirect`] - Local redirect targets from form input

pub mod dates;
pub mod redirect;
pub mod slug;
pub mod validation;
