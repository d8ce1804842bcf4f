//! Role grant lookup against the `user_roles` table.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde::de::IgnoredAny;
use std::sync::Arc;
use uuid::Uuid;

use super::SupabaseClient;
use crate::domain::entities::AppRole;
use crate::domain::repositories::RoleRepository;
use crate::error::AppError;

pub(crate) const TABLE: &str = "user_roles";

/// One row of `user_roles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub user_id: Uuid,
    pub role: AppRole,
}

pub struct SupabaseRoleRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseRoleRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    // The operator methods below run with the client's own key and only work when
    // that key is the service-role key, which bypasses row-level security.

    /// Grants `role` to `user_id`. Returns `false` if the grant already existed.
    pub async fn grant(&self, user_id: Uuid, role: AppRole) -> Result<bool, AppError> {
        let result = self
            .client
            .table(TABLE)
            .insert(&RoleGrant { user_id, role })
            .await;

        match result {
            Ok(()) => {
                tracing::info!(user_id = %user_id, role = role.as_str(), "Role granted");
                Ok(true)
            }
            Err(e) if e.is_unique_violation() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes `role` from `user_id`. Returns `false` if there was no such grant.
    pub async fn revoke(&self, user_id: Uuid, role: AppRole) -> Result<bool, AppError> {
        let removed: Vec<IgnoredAny> = self
            .client
            .table(TABLE)
            .select("user_id")
            .eq("user_id", user_id)
            .eq("role", role.as_str())
            .delete_returning()
            .await?;

        if !removed.is_empty() {
            tracing::info!(user_id = %user_id, role = role.as_str(), "Role revoked");
        }
        Ok(!removed.is_empty())
    }

    /// Every holder of `role`.
    pub async fn list(&self, role: AppRole) -> Result<Vec<RoleGrant>, AppError> {
        let grants = self
            .client
            .table(TABLE)
            .select("user_id,role")
            .eq("role", role.as_str())
            .fetch()
            .await?;

        Ok(grants)
    }
}

#[async_trait]
impl RoleRepository for SupabaseRoleRepository {
    async fn has_role(
        &self,
        access_token: &str,
        user_id: Uuid,
        role: AppRole,
    ) -> Result<bool, AppError> {
        let grant: Option<RoleGrant> = self
            .client
            .table(TABLE)
            .bearer(access_token)
            .select("user_id,role")
            .eq("user_id", user_id)
            .eq("role", role.as_str())
            .fetch_optional()
            .await?;

        Ok(grant.is_some())
    }
}
