//! Hosted backend integration.
//!
//! The backend exposes a REST service over the project's tables (`/rest/v1`) and an
//! auth service (`/auth/v1`). [`SupabaseClient`] speaks both; the `Supabase*`
//! repositories implement the domain traits on top of it.
//!
//! The server holds one client, installed once at startup with [`init_global`] and
//! shared by every repository.

pub mod auth_provider;
pub mod blog_post_repository;
pub mod client;
pub mod contact_message_repository;
pub mod error;
pub mod query;
pub mod role_repository;
pub mod subscriber_repository;

pub use auth_provider::SupabaseAuthProvider;
pub use blog_post_repository::SupabaseBlogPostRepository;
pub use client::{SupabaseClient, SupabaseConfig};
pub use contact_message_repository::SupabaseContactMessageRepository;
pub use error::RemoteError;
pub use query::TableQuery;
pub use role_repository::{RoleGrant, SupabaseRoleRepository};
pub use subscriber_repository::SupabaseSubscriberRepository;

use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Arc<SupabaseClient>> = OnceLock::new();

/// Builds the process-wide client from `config` and installs it.
///
/// # Errors
///
/// Returns [`RemoteError::AlreadyInitialized`] on any call after the first
/// successful one; the installed client is never replaced.
pub fn init_global(config: &SupabaseConfig) -> Result<Arc<SupabaseClient>, RemoteError> {
    if GLOBAL.get().is_some() {
        return Err(RemoteError::AlreadyInitialized);
    }

    let client = Arc::new(SupabaseClient::new(config)?);
    GLOBAL
        .set(client.clone())
        .map_err(|_| RemoteError::AlreadyInitialized)?;

    tracing::info!(url = %client.base_url(), "Backend client initialized");
    Ok(client)
}
