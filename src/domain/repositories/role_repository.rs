//! Repository trait for role grants.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::AppRole;
use crate::error::AppError;

/// Lookup of role grants (`user_roles` table).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Returns whether `user_id` holds `role`.
    ///
    /// Runs with the user's own access token; the backend only lets a user read their
    /// own grants.
    async fn has_role(
        &self,
        access_token: &str,
        user_id: Uuid,
        role: AppRole,
    ) -> Result<bool, AppError>;
}
