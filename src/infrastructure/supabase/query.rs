//! Builder for REST table requests.
//!
//! Filters follow the REST service's query syntax:
//!
//! ```text
//! GET /rest/v1/blog_posts?select=*&published=eq.true&order=created_at.desc
//! ```

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::client::{SupabaseClient, check};
use super::error::RemoteError;

const PREFER_MINIMAL: &str = "return=minimal";
const PREFER_REPRESENTATION: &str = "return=representation";

/// A pending request against one table.
///
/// Nothing is sent until one of the terminal methods (`fetch`, `insert`, ...) is
/// awaited; dropping the future before it resolves abandons the request.
#[must_use]
pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table: String,
    params: Vec<(String, String)>,
    access_token: Option<String>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a SupabaseClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            params: Vec::new(),
            access_token: None,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    /// Equality filter: `column=eq.value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.params.push(("order".into(), format!("{column}.desc")));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".into(), n.to_string()));
        self
    }

    /// Runs the request as the identity behind `access_token` instead of the
    /// public role.
    pub fn bearer(mut self, access_token: &str) -> Self {
        self.access_token = Some(access_token.to_string());
        self
    }

    /// Query string as sent, mostly useful for logs and tests.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn request(&self, method: Method) -> Result<RequestBuilder, RemoteError> {
        let url = self.client.endpoint(&format!("rest/v1/{}", self.table))?;

        debug!(
            table = %self.table,
            method = %method,
            query = %self.query_string(),
            authenticated = self.access_token.is_some(),
            "Backend request"
        );

        Ok(self
            .client
            .http()
            .request(method, url)
            .query(&self.params)
            .bearer_auth(self.client.bearer(self.access_token.as_deref())))
    }

    /// Fetches all matching rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, RemoteError> {
        let response = self.request(Method::GET)?.send().await?;

        check(response)
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))
    }

    /// Fetches at most one row.
    pub async fn fetch_optional<T: DeserializeOwned>(self) -> Result<Option<T>, RemoteError> {
        let rows: Vec<T> = self.limit(1).fetch().await?;
        Ok(rows.into_iter().next())
    }

    /// Inserts rows without reading them back.
    ///
    /// This is the only insert the public role can do on tables it may not select.
    pub async fn insert<B: Serialize + ?Sized>(self, body: &B) -> Result<(), RemoteError> {
        let response = self
            .request(Method::POST)?
            .header("Prefer", PREFER_MINIMAL)
            .json(body)
            .send()
            .await?;

        check(response).await.map(|_| ())
    }

    /// Inserts one row and returns it as stored.
    pub async fn insert_returning<T, B>(self, body: &B) -> Result<T, RemoteError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .request(Method::POST)?
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body)
            .send()
            .await?;

        let rows: Vec<T> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| RemoteError::Parse("insert returned no row".into()))
    }

    /// Updates matching rows and returns the first one, or `None` if nothing
    /// matched the filters.
    pub async fn update_returning<T, B>(self, body: &B) -> Result<Option<T>, RemoteError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .request(Method::PATCH)?
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body)
            .send()
            .await?;

        let rows: Vec<T> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;

        Ok(rows.into_iter().next())
    }

    /// Deletes matching rows and returns them.
    pub async fn delete_returning<T: DeserializeOwned>(self) -> Result<Vec<T>, RemoteError> {
        let response = self
            .request(Method::DELETE)?
            .header("Prefer", PREFER_REPRESENTATION)
            .send()
            .await?;

        check(response)
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))
    }
}
