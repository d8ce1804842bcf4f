//! Handlers for admin sign-in and sign-out.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::{LoginRequest, LoginResponse};
use crate::domain::entities::AdminSession;
use crate::error::AppError;
use crate::state::AppState;

/// Signs an administrator in.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// - 401 for wrong credentials
/// - 403 when the account is not an administrator; the session the backend
///   issued is revoked before this response is sent
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let payload = payload.normalized();
    payload.validate()?;

    let session = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(session.into()))
}

/// Revokes the caller's session.
///
/// # Endpoint
///
/// `POST /api/auth/logout` with `Authorization: Bearer <token>`, behind
/// [`crate::api::middleware::auth`]
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(session).await?;
    Ok(StatusCode::NO_CONTENT)
}
