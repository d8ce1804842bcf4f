//! HTTP client for the hosted backend (REST and auth services).

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use super::error::RemoteError;
use super::query::TableQuery;
use crate::domain::entities::{AuthSession, AuthUser};

/// Connection settings for the hosted backend.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: Url,
    /// Key sent as the `apikey` header. The anon key for the site, the service-role
    /// key for the operator CLI.
    pub api_key: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for one backend project.
///
/// Requests made without an access token run as the public (`anon`) role; requests
/// made with [`TableQuery::bearer`] run as the signed-in identity, so the backend's
/// row-level security decides what they may read or write.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: AuthUser,
}

#[derive(Deserialize)]
struct UserList {
    #[serde(default)]
    users: Vec<AuthUser>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

impl SupabaseClient {
    /// Builds a client for the project described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Config`] if the key is not a valid header value and
    /// [`RemoteError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SupabaseConfig) -> Result<Self, RemoteError> {
        let mut base_url = config.url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| RemoteError::Config("API key is not a valid header value".into()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Starts a query against a table of the REST service.
    pub fn table(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|e| RemoteError::Config(format!("invalid endpoint {path}: {e}")))
    }

    /// Bearer token for a request: the caller's session, or the API key itself.
    pub(crate) fn bearer<'a>(&'a self, access_token: Option<&'a str>) -> &'a str {
        access_token.unwrap_or(&self.api_key)
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Wrong credentials come back as [`RemoteError::Api`] with status 400.
    #[instrument(skip_all)]
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, RemoteError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .http
            .post(url)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        let token: TokenResponse = check(response)
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;

        let expires_at = session_expiry(token.expires_at, token.expires_in, Utc::now());

        debug!(user_id = %token.user.id, "Password sign-in succeeded");

        Ok(AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at,
            user: token.user,
        })
    }

    /// Revokes the session behind `access_token`.
    ///
    /// A session the backend no longer knows counts as signed out.
    #[instrument(skip_all)]
    pub async fn sign_out(&self, access_token: &str) -> Result<(), RemoteError> {
        let response = self
            .http
            .post(self.endpoint("auth/v1/logout")?)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                debug!("Session already gone on sign-out");
                Ok(())
            }
            _ => check(response).await.map(|_| ()),
        }
    }

    /// Resolves the user behind `access_token`.
    ///
    /// Returns `Ok(None)` when the token is expired, revoked or unknown.
    #[instrument(skip_all)]
    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, RemoteError> {
        let response = self
            .http
            .get(self.endpoint("auth/v1/user")?)
            .bearer_auth(access_token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        let user = check(response)
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;

        Ok(Some(user))
    }

    /// One page of the project's users, via the auth admin API.
    ///
    /// Only works when the client's key is the service-role key.
    #[instrument(skip(self))]
    pub async fn admin_list_users(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<AuthUser>, RemoteError> {
        let mut url = self.endpoint("auth/v1/admin/users")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let list: UserList = check(response)
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;

        Ok(list.users)
    }

    /// Finds a user by email (case-insensitive), walking the admin user list.
    pub async fn admin_find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AuthUser>, RemoteError> {
        const PER_PAGE: u32 = 200;
        let wanted = email.trim().to_lowercase();

        for page in 1.. {
            let users = self.admin_list_users(page, PER_PAGE).await?;
            let last_page = users.len() < PER_PAGE as usize;

            if let Some(user) = users.into_iter().find(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase() == wanted)
            }) {
                return Ok(Some(user));
            }

            if last_page {
                break;
            }
        }

        Ok(None)
    }

    /// Pings the auth service health endpoint.
    pub async fn health(&self) -> Result<(), RemoteError> {
        let response = self
            .http
            .get(self.endpoint("auth/v1/health")?)
            .send()
            .await?;

        check(response).await.map(|_| ())
    }
}

/// Turns a non-success response into [`RemoteError::Api`].
pub(crate) async fn check(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = RemoteError::from_response(status.as_u16(), &body);

    if status.is_server_error() {
        warn!(status = status.as_u16(), error = %err, "Backend returned an error");
    } else {
        debug!(status = status.as_u16(), error = %err, "Backend rejected request");
    }

    Err(err)
}

/// When a new session expires: the absolute timestamp if the backend sent one,
/// otherwise `now` plus its lifetime. Out-of-range values mean unknown expiry.
fn session_expiry(
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    expires_at
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .or_else(|| {
            expires_in
                .and_then(TimeDelta::try_seconds)
                .and_then(|lifetime| now.checked_add_signed(lifetime))
        })
}
