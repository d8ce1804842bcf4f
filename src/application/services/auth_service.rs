//! Admin authentication and authorization service.

use metrics::counter;
use serde_json::json;
use std::sync::Arc;

use crate::domain::admin_auth::{AuthEvent, AuthState};
use crate::domain::entities::{AdminSession, AppRole, AuthSession};
use crate::domain::repositories::{AuthProvider, RoleRepository};
use crate::error::AppError;

/// Shown when a signed-in identity has no admin grant.
pub const ACCESS_DENIED: &str = "Acesso negado";

/// Service gating the admin panel.
///
/// A backend session alone is not enough: every login and every protected request
/// also checks the `admin` role grant. Identities without the grant get their
/// session revoked on the spot.
pub struct AuthService<A: AuthProvider + ?Sized, R: RoleRepository + ?Sized> {
    auth: Arc<A>,
    roles: Arc<R>,
}

impl<A: AuthProvider + ?Sized, R: RoleRepository + ?Sized> AuthService<A, R> {
    pub fn new(auth: Arc<A>, roles: Arc<R>) -> Self {
        Self { auth, roles }
    }

    /// Signs in with email and password, then checks the admin grant.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] for wrong credentials
    /// - [`AppError::Forbidden`] when the identity is not an administrator; its
    ///   session has already been signed out when this is returned
    /// - [`AppError::Upstream`] when the backend cannot be reached
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminSession, AppError> {
        let state = advance(AuthState::Unauthenticated, AuthEvent::Submit)?;

        let session = match self.auth.sign_in_with_password(email, password).await {
            Ok(session) => session,
            Err(e) => {
                advance(state, AuthEvent::SignInFailed)?;
                tracing::info!(error = %e, "Admin sign-in failed");
                return Err(e);
            }
        };

        let state = advance(state, AuthEvent::SignedIn(session))?;
        self.check_grant(state).await
    }

    /// Checks a bearer token presented to the JSON API.
    ///
    /// The token carries no earlier login state, so an unknown token is simply
    /// unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the session is expired or revoked and
    /// [`AppError::Forbidden`] when the identity has no admin grant.
    pub async fn authorize(&self, access_token: &str) -> Result<AdminSession, AppError> {
        let user = self
            .auth
            .current_user(access_token)
            .await?
            .ok_or_else(session_expired)?;

        let state = AuthState::RoleChecked(AuthSession {
            access_token: access_token.to_string(),
            refresh_token: None,
            expires_at: None,
            user,
        });

        self.check_grant(state).await
    }

    /// Re-checks an admin session stored by the site before serving a protected page.
    ///
    /// When the backend no longer knows the session, or it now belongs to another
    /// identity, the flow leaves `Authenticated` through the session-lost transition.
    /// Otherwise the admin grant is checked again.
    ///
    /// # Errors
    ///
    /// Same as [`AuthService::authorize`].
    pub async fn revalidate(&self, session: AdminSession) -> Result<AdminSession, AppError> {
        let current = self.auth.current_user(&session.access_token).await?;

        match current {
            Some(user) if user.id == session.user.id => {
                let state = AuthState::RoleChecked(AuthSession {
                    access_token: session.access_token,
                    refresh_token: None,
                    expires_at: session.expires_at,
                    user,
                });
                self.check_grant(state).await
            }
            _ => {
                let user_id = session.user.id;
                advance(AuthState::Authenticated(session), AuthEvent::SessionLost)?;
                tracing::info!(%user_id, "Admin session lost");
                Err(session_expired())
            }
        }
    }

    /// Ends an admin session and returns the state the flow settles in.
    ///
    /// # Errors
    ///
    /// Returns the backend error when the sign-out request fails; the session is
    /// left as it was.
    pub async fn logout(&self, session: AdminSession) -> Result<AuthState, AppError> {
        let user_id = session.user.id;
        self.auth.sign_out(&session.access_token).await?;

        let state = advance(AuthState::Authenticated(session), AuthEvent::Logout)?;
        tracing::info!(%user_id, "Admin signed out");
        Ok(state)
    }

    async fn check_grant(&self, state: AuthState) -> Result<AdminSession, AppError> {
        let AuthState::RoleChecked(session) = &state else {
            return Err(AppError::internal(
                "Internal server error",
                json!({ "state": state.name() }),
            ));
        };

        let event = match self
            .roles
            .has_role(&session.access_token, session.user.id, AppRole::Admin)
            .await
        {
            Ok(true) => AuthEvent::GrantFound,
            Ok(false) => AuthEvent::GrantMissing,
            Err(e) => {
                tracing::warn!(user_id = %session.user.id, error = %e, "Role lookup failed");
                AuthEvent::GrantLookupFailed
            }
        };

        match advance(state, event)? {
            AuthState::Authenticated(admin) => {
                tracing::info!(user_id = %admin.user.id, "Admin authorized");
                Ok(admin)
            }
            AuthState::Denied(session) => Err(self.deny(session).await),
            other => Err(AppError::internal(
                "Internal server error",
                json!({ "state": other.name() }),
            )),
        }
    }

    /// Tears down the session of a denied identity.
    async fn deny(&self, session: AuthSession) -> AppError {
        let user_id = session.user.id;

        if let Err(e) = self.auth.sign_out(&session.access_token).await {
            tracing::warn!(%user_id, error = %e, "Forced sign-out failed");
        }

        if let Err(e) = advance(AuthState::Denied(session), AuthEvent::SignedOut) {
            return e;
        }

        counter!("admin_denials_total").increment(1);
        tracing::warn!(%user_id, "Admin access denied");

        AppError::forbidden(ACCESS_DENIED, json!({ "reason": "missing_admin_role" }))
    }
}

fn session_expired() -> AppError {
    AppError::unauthorized(
        "A sessão expirou. Inicie sessão novamente.",
        json!({ "reason": "session_expired" }),
    )
}

fn advance(state: AuthState, event: AuthEvent) -> Result<AuthState, AppError> {
    state.on(event).map_err(|e| {
        tracing::error!(error = %e, "Auth state machine rejected transition");
        AppError::internal("Internal server error", json!({}))
    })
}
