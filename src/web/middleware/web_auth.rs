//! Session guard for the admin panel.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::{debug, warn};

use crate::application::services::ACCESS_DENIED;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::pages::ErrorTemplate;
use crate::web::layout::Layout;
use crate::web::notice::{GENERIC_ERROR, Notice, redirect_with};
use crate::web::session;

pub const LOGIN_PATH: &str = "/admin/login";

/// Authorizes admin pages from the browser session.
///
/// The stored admin is checked against the backend on every request (user lookup,
/// then the admin role), so a revoked session or a removed grant takes effect at once.
///
/// # Outcomes
///
/// - nobody signed in: redirect to `/admin/login`
/// - expired or revoked session: admin dropped, redirect with an expiry notice
/// - valid session without the admin role: admin dropped, redirect with
///   "Acesso negado"
/// - backend unreachable: `502` error page, session kept
/// - otherwise the re-checked [`crate::domain::entities::AdminSession`] is added to
///   the request extensions
pub async fn layer(
    State(state): State<AppState>,
    browser: Session,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(stored) = session::stored_admin(&browser).await else {
        debug!(path = %req.uri().path(), "No admin signed in");
        return Redirect::to(LOGIN_PATH).into_response();
    };

    match state.auth_service.revalidate(stored).await {
        Ok(admin) => {
            req.extensions_mut().insert(admin);
            next.run(req).await
        }
        Err(e @ AppError::Unauthorized { .. }) => {
            end_session(&browser, Notice::error("Sessão terminada", Some(e.message()))).await
        }
        Err(AppError::Forbidden { .. }) => {
            end_session(
                &browser,
                Notice::error(
                    ACCESS_DENIED,
                    Some("Esta conta não tem permissões de administração."),
                ),
            )
            .await
        }
        Err(e) => {
            warn!(error = %e, "Admin session check failed");
            let page = ErrorTemplate {
                layout: Layout::new(req.uri().path(), None),
                heading: "Erro".to_string(),
                message: GENERIC_ERROR.to_string(),
                back_href: "/",
                back_label: "Voltar ao Início",
            };
            (StatusCode::BAD_GATEWAY, page).into_response()
        }
    }
}

/// Forgets the admin and sends the browser back to the login page.
async fn end_session(browser: &Session, notice: Notice) -> Response {
    session::sign_out(browser).await;
    redirect_with(browser, LOGIN_PATH, notice).await
}
