//! Authenticated identities and admin sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role names of the `app_role` enum in the hosted database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Admin,
}

impl AppRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::Admin => "admin",
        }
    }
}

/// An identity known to the authentication backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// A session issued by the authentication backend after a password sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

/// A session that passed both checks: a live backend session and an admin grant.
///
/// Only the auth service constructs this type, so holding one means the request was
/// authenticated and authorized. The copy kept in a browser session is only trusted
/// again after `AuthService::revalidate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub access_token: String,
    pub user: AuthUser,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AdminSession {
    pub(crate) fn new(
        access_token: String,
        user: AuthUser,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token,
            user,
            expires_at,
        }
    }

    /// Seconds until the backend session expires, if known and still in the future.
    pub fn remaining_seconds(&self) -> Option<i64> {
        self.expires_at
            .map(|at| (at - Utc::now()).num_seconds())
            .filter(|s| *s > 0)
    }

    pub fn email(&self) -> &str {
        self.user.email.as_deref().unwrap_or_default()
    }
}
