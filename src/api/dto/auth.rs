//! DTOs for admin sign-in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::AdminSession;
use crate::utils::validation::not_blank;

/// Email/password sign-in.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "O email é obrigatório"),
        email(message = "Email inválido")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "A palavra-passe é obrigatória"))]
    pub password: String,
}

impl LoginRequest {
    /// Trims and lowercases the email. The password is left untouched.
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self
    }
}

/// Successful sign-in of an administrator.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: Option<String>,
}

impl From<AdminSession> for LoginResponse {
    fn from(session: AdminSession) -> Self {
        LoginResponse {
            access_token: session.access_token,
            token_type: "bearer",
            expires_at: session.expires_at,
            user: SessionUser {
                id: session.user.id,
                email: session.user.email,
            },
        }
    }
}
