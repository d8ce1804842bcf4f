//! Error types for the hosted backend client.

use serde::Deserialize;
use thiserror::Error;

/// SQLSTATE reported by Postgres for unique constraint violations.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },

    /// The request never produced a response (connect, timeout, TLS).
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A success response whose body could not be decoded.
    #[error("unexpected backend response: {0}")]
    Parse(String),

    /// Invalid client configuration.
    #[error("invalid backend configuration: {0}")]
    Config(String),

    #[error("backend client is already initialized")]
    AlreadyInitialized,
}

/// Error body shapes of the REST and auth services.
///
/// The REST service answers `{code, message, details, hint}`; the auth service uses
/// either `{error, error_description}` or `{code: <int>, error_code, msg}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<serde_json::Value>,
    error_code: Option<String>,
    message: Option<String>,
    msg: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl RemoteError {
    /// Builds an [`RemoteError::Api`] from a failed response.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        let code = match parsed.code {
            Some(serde_json::Value::String(code)) => Some(code),
            _ => parsed.error_code.or(parsed.error.clone()),
        };

        let message = parsed
            .message
            .or(parsed.msg)
            .or(parsed.error_description)
            .or(parsed.error)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("backend returned status {status}")
                } else {
                    body.trim().to_string()
                }
            });

        RemoteError::Api {
            status,
            code,
            message,
            details: parsed.details,
            hint: parsed.hint,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, RemoteError::Api { code: Some(code), .. } if code == UNIQUE_VIOLATION)
    }

    /// Name of the violated constraint, taken from the quoted name in the message:
    /// `duplicate key value violates unique constraint "newsletter_subscribers_email_key"`.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            RemoteError::Api { message, .. } if self.is_unique_violation() => {
                let start = message.find('"')? + 1;
                let len = message[start..].find('"')?;
                Some(&message[start..start + len])
            }
            _ => None,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Api { status, .. } => Some(*status),
            RemoteError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_error_body() {
        let body = r#"{
            "code": "23505",
            "details": "Key (email)=(ana@test.com) already exists.",
            "hint": null,
            "message": "duplicate key value violates unique constraint \"newsletter_subscribers_email_key\""
        }"#;

        let err = RemoteError::from_response(409, body);
        assert!(err.is_unique_violation());
        assert_eq!(err.constraint(), Some("newsletter_subscribers_email_key"));
        assert_eq!(err.status(), Some(409));
        match err {
            RemoteError::Api { details, .. } => {
                assert_eq!(
                    details.as_deref(),
                    Some("Key (email)=(ana@test.com) already exists.")
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_auth_error_bodies() {
        let legacy = RemoteError::from_response(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(legacy.to_string(), "Invalid login credentials");
        assert!(!legacy.is_unique_violation());

        let current = RemoteError::from_response(
            400,
            r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        );
        assert_eq!(current.to_string(), "Invalid login credentials");
        match current {
            RemoteError::Api { code, .. } => assert_eq!(code.as_deref(), Some("invalid_credentials")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body() {
        let err = RemoteError::from_response(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Bad Gateway");

        let empty = RemoteError::from_response(503, "");
        assert_eq!(empty.to_string(), "backend returned status 503");
    }

    #[test]
    fn test_constraint_requires_unique_violation() {
        let err = RemoteError::from_response(
            400,
            r#"{"code":"23514","message":"new row violates check constraint \"x\""}"#,
        );
        assert_eq!(err.constraint(), None);
        assert_eq!(RemoteError::AlreadyInitialized.status(), None);
    }
}
