//! Handlers for the public form endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use validator::Validate;

use crate::api::dto::{ContactRequest, NewsletterRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Confirmation returned by the form endpoints.
#[derive(Debug, Serialize)]
pub struct Confirmation {
    pub title: &'static str,
    pub message: &'static str,
}

/// Subscribes an email to the newsletter.
///
/// # Endpoint
///
/// `POST /api/newsletter`
///
/// # Request Body
///
/// ```json
/// { "email": "ana@example.com", "name": "Ana" }
/// ```
///
/// # Errors
///
/// - 422 with field messages when validation fails (nothing is sent to the backend)
/// - 409 `Este email já está subscrito.` when the email is already subscribed
pub async fn newsletter_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewsletterRequest>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let payload = payload.normalized();
    payload.validate()?;

    state.newsletter_service.subscribe(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(Confirmation {
            title: "Subscrição realizada!",
            message: "Obrigado por subscrever a nossa newsletter.",
        }),
    ))
}

/// Stores a contact message.
///
/// # Endpoint
///
/// `POST /api/contact`
///
/// # Errors
///
/// Returns 422 with field messages when validation fails.
pub async fn contact_handler(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let payload = payload.normalized();
    payload.validate()?;

    state.contact_service.submit(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(Confirmation {
            title: "Mensagem enviada!",
            message: "Entraremos em contacto em breve.",
        }),
    ))
}
