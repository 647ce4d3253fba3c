//! Low-level API transport.
//!
//! Wraps an [`HttpClient`] with the conventions every ministry endpoint
//! shares: a fixed base URL, `Content-Type: application/json` on every
//! non-multipart call, tolerant body parsing, and uniform error mapping.
//!
//! Bodies that are empty or not valid JSON parse to `Value::Null` instead
//! of failing; the server occasionally answers with plain text and the
//! normalizer treats `Null` like any other unusable shape.

use std::sync::Arc;

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, MultipartForm};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::error::ApiError;
use crate::normalize;

/// Parses a response body that may be valid JSON, plain text, or empty.
fn tolerant_json(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// Thin transport shared by every endpoint call.
#[derive(Clone)]
pub struct ApiClient {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`. A trailing slash is trimmed
    /// so endpoint paths can always start with one.
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// GET a resource. The API expects the JSON content type even on GET.
    pub async fn get(&self, path_and_query: &str, token: Option<&str>) -> Result<Value> {
        let mut request = HttpRequest::new(HttpMethod::Get, self.url(path_and_query))
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            request = request.bearer_token(token);
        }
        self.execute(request).await
    }

    /// POST a JSON body.
    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        token: Option<&str>,
    ) -> Result<Value> {
        let mut request = HttpRequest::new(HttpMethod::Post, self.url(path)).json(body)?;
        if let Some(token) = token {
            request = request.bearer_token(token);
        }
        self.execute(request).await
    }

    /// PUT a JSON body. Same conventions as [`ApiClient::post`]; the API
    /// uses it for in-place record updates.
    pub async fn put<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        token: Option<&str>,
    ) -> Result<Value> {
        let mut request = HttpRequest::new(HttpMethod::Put, self.url(path)).json(body)?;
        if let Some(token) = token {
            request = request.bearer_token(token);
        }
        self.execute(request).await
    }

    /// POST a multipart form. The transport leaves `Content-Type` to the
    /// platform encoder so it can attach the boundary.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: MultipartForm,
        token: Option<&str>,
    ) -> Result<Value> {
        let mut request = HttpRequest::new(HttpMethod::Post, self.url(path)).multipart(form);
        if let Some(token) = token {
            request = request.bearer_token(token);
        }
        self.execute(request).await
    }

    async fn execute(&self, request: HttpRequest) -> Result<Value> {
        debug!(method = request.method.as_str(), url = %request.url, "API request");

        let response = self.http_client.execute(request).await?;
        let body = tolerant_json(&response.body);

        debug!(status = response.status, "API response");

        if response.is_success() {
            return Ok(body);
        }

        let message = normalize::error_message(&body)
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        Err(ApiError::Request {
            status: response.status,
            message,
        })
    }
}
