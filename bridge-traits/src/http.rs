//! HTTP Client Abstraction
//!
//! Provides async HTTP operations with bearer-token, JSON, and multipart support.
//!
//! Every request is a single fire-and-forget call: the transport layer carries
//! no retry policy and no per-request timeout knobs. The API this core talks to
//! has no offline mode, so connectivity failures surface immediately as
//! [`BridgeError::Network`] and the caller decides what to tell the user.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

use crate::error::{BridgeError, Result};

/// The method subset the ministry API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

/// One part of a multipart form body.
#[derive(Debug, Clone)]
pub enum MultipartPart {
    /// Plain text field
    Text { name: String, value: String },
    /// File field with raw bytes
    File {
        name: String,
        file_name: String,
        mime_type: String,
        data: Bytes,
    },
}

/// Platform-neutral multipart form description.
///
/// Implementations translate this into their native multipart encoder. The
/// transport sets no `Content-Type` header itself so the encoder can attach
/// the generated boundary.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    pub parts: Vec<MultipartPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        self.parts.push(MultipartPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Owned request description handed across the bridge.
///
/// Built fluently; the adapter translates it into its native client's
/// request type in one pass.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub multipart: Option<MultipartForm>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            multipart: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.into()))
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body).map_err(|e| {
            BridgeError::OperationFailed(format!("JSON serialization failed: {}", e))
        })?;
        self.body = Some(Bytes::from(json));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a multipart form. Replaces any JSON body set earlier.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = None;
        self.headers.remove("Content-Type");
        self.multipart = Some(form);
        self
    }
}

/// Status, headers, and the raw body as received.
///
/// Non-2xx statuses are delivered here like any other response; mapping
/// them to errors is the caller's job.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            BridgeError::OperationFailed(format!("JSON deserialization failed: {}", e))
        })
    }

    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| BridgeError::OperationFailed(format!("Invalid UTF-8: {}", e)))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// The transport capability the host provides.
///
/// Adapters own TLS, connection pooling, and the translation from
/// [`HttpRequest`] to their native client. Connectivity failures come
/// back as [`BridgeError::Network`] so upper layers can pick the offline
/// user message without parsing error strings.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request and waits for the full response body.
    ///
    /// # Errors
    ///
    /// Only transport-level failures error here: unreachable host, TLS
    /// rejection, a request the adapter cannot construct. A non-2xx status
    /// is a successful execution; the caller inspects
    /// `HttpResponse::status`.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_request_builder() {
        let request = HttpRequest::new(HttpMethod::Get, "https://example.com")
            .header("User-Agent", "test")
            .bearer_token("secret");

        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.headers.get("User-Agent"), Some(&"test".to_string()));
        assert!(request.headers.contains_key("Authorization"));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = HttpRequest::new(HttpMethod::Post, "https://example.com")
            .json(&serde_json::json!({"correo": "a@b.c"}))
            .unwrap();

        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert!(request.body.is_some());
    }

    #[test]
    fn test_multipart_clears_json_body() {
        let form = MultipartForm::new()
            .text("titulo", "Derrame")
            .file("foto", "foto.jpg", "image/jpeg", Bytes::from_static(b"img"));

        let request = HttpRequest::new(HttpMethod::Post, "https://example.com")
            .json(&serde_json::json!({"unused": true}))
            .unwrap()
            .multipart(form);

        assert!(request.body.is_none());
        assert!(!request.headers.contains_key("Content-Type"));
        let form = request.multipart.unwrap();
        assert_eq!(form.parts.len(), 2);
    }

    #[test]
    fn test_http_response_status_checks() {
        let response = HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from("test"),
        };

        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
    }
}
