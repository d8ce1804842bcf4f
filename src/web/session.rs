//! Browser sessions for the site.
//!
//! One server-side session per browser, identified by the `raizes_session` cookie.
//! It holds the signed-in [`AdminSession`] and the notice waiting for the next page.

use tower_sessions::{
    Expiry, MemoryStore, Session, SessionManagerLayer,
    cookie::{SameSite, time::Duration},
};
use tracing::warn;

use crate::domain::entities::AdminSession;

pub const SESSION_COOKIE: &str = "raizes_session";

const ADMIN_KEY: &str = "admin";
pub(crate) const NOTICE_KEY: &str = "notice";

/// Admin sessions whose backend expiry is unknown last this long without activity.
const DEFAULT_ADMIN_SECONDS: i64 = 3600;

/// Session layer for the browser-facing routes.
///
/// Visitor sessions end with the browser; signing in as admin replaces the expiry
/// with the backend session's lifetime.
pub fn layer(secure: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// The admin stored by a previous sign-in, not yet re-checked.
pub async fn stored_admin(session: &Session) -> Option<AdminSession> {
    match session.get::<AdminSession>(ADMIN_KEY).await {
        Ok(admin) => admin,
        Err(e) => {
            warn!(error = %e, "Unreadable admin session, ignoring it");
            None
        }
    }
}

/// Stores a signed-in admin under a fresh session id.
pub async fn sign_in(
    session: &Session,
    admin: &AdminSession,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(ADMIN_KEY, admin).await?;
    let seconds = admin.remaining_seconds().unwrap_or(DEFAULT_ADMIN_SECONDS);
    session.set_expiry(Some(Expiry::OnInactivity(Duration::seconds(seconds))));
    Ok(())
}

/// Drops the stored admin, returning it when there was one.
pub async fn sign_out(session: &Session) -> Option<AdminSession> {
    let admin = match session.remove::<AdminSession>(ADMIN_KEY).await {
        Ok(admin) => admin,
        Err(e) => {
            warn!(error = %e, "Unreadable admin session, dropping it");
            None
        }
    };

    if let Err(e) = session.cycle_id().await {
        warn!(error = %e, "Could not rotate the session id");
    }
    session.set_expiry(Some(Expiry::OnSessionEnd));
    admin
}
