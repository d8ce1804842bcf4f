//! Authentication backend boundary.

use async_trait::async_trait;

use crate::domain::entities::{AuthSession, AuthUser};
use crate::error::AppError;

/// Session-based authentication delegated to the hosted backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for wrong credentials.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppError>;

    /// Revokes the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), AppError>;

    /// Resolves the identity of a session.
    ///
    /// Returns `Ok(None)` when the session is unknown, revoked or expired.
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AppError>;

    /// Checks whether the backend answers at all.
    async fn health_check(&self) -> bool;
}
