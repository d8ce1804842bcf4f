//! Infrastructure layer for external integrations.
//!
//! Implements the domain repository traits against the hosted backend.
//!
//! # Modules
//!
//! - [`supabase`] - REST/auth client and repository implementations

pub mod supabase;
