//! One-shot notices carried across a redirect.
//!
//! A handler that finishes with a redirect leaves a [`Notice`] in the browser
//! session; the next page that renders takes it out through the [`Flash`] extractor,
//! so a notice survives a chain of redirects and is shown once.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::warn;

use crate::error::AppError;
use crate::web::session::NOTICE_KEY;

/// Generic failure text shown when the backend cannot complete a request.
pub const GENERIC_ERROR: &str = "Ocorreu um erro. Por favor, tente novamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: Option<&str>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.map(str::to_string),
        }
    }

    pub fn error(title: impl Into<String>, message: Option<&str>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.map(str::to_string),
        }
    }

    /// Error notice for a failed request.
    ///
    /// Only messages written for visitors are shown as they are; backend and
    /// internal failures collapse to [`GENERIC_ERROR`].
    pub fn from_error(err: &AppError) -> Self {
        match err {
            AppError::Upstream { .. } | AppError::Internal { .. } => {
                Self::error("Erro", Some(GENERIC_ERROR))
            }
            other => Self::error("Erro", Some(other.message())),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    /// Leaves this notice for the next rendered page.
    pub async fn keep(self, session: &Session) {
        if let Err(e) = session.insert(NOTICE_KEY, self).await {
            warn!(error = %e, "Could not store notice");
        }
    }
}

/// Notice left by an earlier request, if any. Extracting it consumes it.
#[derive(Debug, Clone, Default)]
pub struct Flash(pub Option<Notice>);

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Flash(None));
        };

        match session.remove::<Notice>(NOTICE_KEY).await {
            Ok(notice) => Ok(Flash(notice)),
            Err(e) => {
                warn!(error = %e, "Could not read notice");
                Ok(Flash(None))
            }
        }
    }
}

/// `303 See Other` to `location`, leaving `notice` for the next page.
pub async fn redirect_with(session: &Session, location: &str, notice: Notice) -> Response {
    notice.keep(session).await;
    Redirect::to(location).into_response()
}
