//! Admin authorization state machine.
//!
//! Admin access needs two independent checks: a live backend session
//! (authentication) and an `admin` role grant for that identity (authorization).
//!
//! ```text
//! Unauthenticated --submit--> CredentialsSubmitted --signed in--> RoleChecked
//!        ^                              |                              |
//!        |                         sign-in failed               grant present
//!        |                              v                              v
//!        +<---------------------- Unauthenticated              Authenticated
//!        |                                                             |
//!        +<------ Denied <-- grant missing / lookup failed             |
//!        +<------------------------- logout / session lost ------------+
//! ```
//!
//! `Denied` is transient: once the forced sign-out has been issued the flow settles
//! back in `Unauthenticated`.

use std::fmt;

use crate::domain::entities::{AdminSession, AuthSession};

/// States of an admin login flow.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Unauthenticated,
    CredentialsSubmitted,
    /// Signed in with the backend, role grant not checked yet.
    RoleChecked(AuthSession),
    Authenticated(AdminSession),
    /// The identity has no admin grant; its session must be torn down.
    Denied(AuthSession),
}

/// Inputs that drive [`AuthState`] transitions.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    Submit,
    SignedIn(AuthSession),
    SignInFailed,
    GrantFound,
    GrantMissing,
    GrantLookupFailed,
    SignedOut,
    Logout,
    SessionLost,
}

/// A transition the state machine does not allow.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid auth transition from {from} on {event}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub event: &'static str,
}

impl AuthState {
    pub fn name(&self) -> &'static str {
        match self {
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::CredentialsSubmitted => "credentials_submitted",
            AuthState::RoleChecked(_) => "role_checked",
            AuthState::Authenticated(_) => "authenticated",
            AuthState::Denied(_) => "denied",
        }
    }

    /// Applies an event and returns the next state.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] for events that make no sense in the current
    /// state (e.g. a role grant arriving before sign-in).
    pub fn on(self, event: AuthEvent) -> Result<AuthState, InvalidTransition> {
        use AuthEvent as E;
        use AuthState as S;

        match (self, event) {
            (S::Unauthenticated, E::Submit) => Ok(S::CredentialsSubmitted),
            (S::CredentialsSubmitted, E::SignedIn(session)) => Ok(S::RoleChecked(session)),
            (S::CredentialsSubmitted, E::SignInFailed) => Ok(S::Unauthenticated),
            (S::RoleChecked(session), E::GrantFound) => Ok(S::Authenticated(AdminSession::new(
                session.access_token,
                session.user,
                session.expires_at,
            ))),
            (S::RoleChecked(session), E::GrantMissing | E::GrantLookupFailed) => {
                Ok(S::Denied(session))
            }
            (S::Denied(_), E::SignedOut) => Ok(S::Unauthenticated),
            (S::Authenticated(_), E::Logout | E::SessionLost) => Ok(S::Unauthenticated),
            (state, event) => Err(InvalidTransition {
                from: state.name(),
                event: event.name(),
            }),
        }
    }
}

impl AuthEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AuthEvent::Submit => "submit",
            AuthEvent::SignedIn(_) => "signed_in",
            AuthEvent::SignInFailed => "sign_in_failed",
            AuthEvent::GrantFound => "grant_found",
            AuthEvent::GrantMissing => "grant_missing",
            AuthEvent::GrantLookupFailed => "grant_lookup_failed",
            AuthEvent::SignedOut => "signed_out",
            AuthEvent::Logout => "logout",
            AuthEvent::SessionLost => "session_lost",
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
