//! Password authentication through the backend's auth service.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::{RemoteError, SupabaseClient};
use crate::domain::entities::{AuthSession, AuthUser};
use crate::domain::repositories::AuthProvider;
use crate::error::AppError;

pub struct SupabaseAuthProvider {
    client: Arc<SupabaseClient>,
}

impl SupabaseAuthProvider {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        match self.client.sign_in_with_password(email, password).await {
            Ok(session) => Ok(session),
            Err(e @ RemoteError::Api { status: 400..=401, .. }) => Err(AppError::unauthorized(
                "Email ou palavra-passe incorretos.",
                json!({ "reason": e.to_string() }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        Ok(self.client.sign_out(access_token).await?)
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AppError> {
        Ok(self.client.get_user(access_token).await?)
    }

    async fn health_check(&self) -> bool {
        match self.client.health().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Backend health check failed");
                false
            }
        }
    }
}
