//! Bearer token authorization middleware for the admin API.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_auth::AuthBearer;
use axum::http::{HeaderValue, header::WWW_AUTHENTICATE};

use crate::{error::AppError, state::AppState};

/// Authorizes admin API requests.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <access token from POST /api/auth/login>
/// ```
///
/// # Flow
///
/// 1. Extract the access token from the `Authorization` header
/// 2. Resolve the session with the auth backend
/// 3. Check the `admin` role grant of its identity
/// 4. Store the [`crate::domain::entities::AdminSession`] in request extensions
///
/// # Errors
///
/// - `401 Unauthorized` if the header is missing or the session is expired
/// - `403 Forbidden` if the identity is not an administrator (its session is
///   revoked as part of the denial)
///
/// Adds `WWW-Authenticate: Bearer` to 401 responses per RFC 6750.
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => token,
        Err(_) => {
            return unauthorized(AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            ));
        }
    };

    match st.auth_service.authorize(&token).await {
        Ok(session) => {
            let mut req = Request::from_parts(parts, body);
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(e @ AppError::Unauthorized { .. }) => unauthorized(e),
        Err(e) => e.into_response(),
    }
}

fn unauthorized(err: AppError) -> Response {
    let mut response = err.into_response();
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}
