//! Desktop transport adapter on top of reqwest.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, MultipartPart},
};
use reqwest::Client;
use std::collections::HashMap;
use tracing::debug;

/// [`HttpClient`] backed by a pooled reqwest client.
///
/// Requests are single-shot: no retries and no per-request timeout knobs.
/// Connectivity failures (refused connections, DNS, resets) come back as
/// `BridgeError::Network`; everything else that reqwest reports is an
/// `OperationFailed`.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .user_agent("ambiente-mobile-core/0.1.0")
            .build()
            .map_err(|e| {
                BridgeError::NotAvailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Wraps a caller-configured reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        }
    }

    /// Translate the platform-neutral form into reqwest's multipart encoder
    fn convert_form(form: MultipartForm) -> Result<reqwest::multipart::Form> {
        let mut out = reqwest::multipart::Form::new();
        for part in form.parts {
            match part {
                MultipartPart::Text { name, value } => {
                    out = out.text(name, value);
                }
                MultipartPart::File {
                    name,
                    file_name,
                    mime_type,
                    data,
                } => {
                    let file_part = reqwest::multipart::Part::bytes(data.to_vec())
                        .file_name(file_name)
                        .mime_str(&mime_type)
                        .map_err(|e| {
                            BridgeError::OperationFailed(format!(
                                "Invalid MIME type {}: {}",
                                mime_type, e
                            ))
                        })?;
                    out = out.part(name, file_part);
                }
            }
        }
        Ok(out)
    }

    fn build_request(&self, request: HttpRequest) -> Result<reqwest::RequestBuilder> {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        // Multipart wins over a raw body; the encoder sets its own Content-Type
        if let Some(form) = request.multipart {
            req = req.multipart(Self::convert_form(form)?);
        } else if let Some(body) = request.body {
            req = req.body(body);
        }

        Ok(req)
    }

    fn classify_error(e: reqwest::Error) -> BridgeError {
        if e.is_connect() || e.is_timeout() {
            BridgeError::Network(e.to_string())
        } else {
            BridgeError::OperationFailed(e.to_string())
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = request.method.as_str(), url = %request.url, "Executing HTTP request");

        let req_builder = self.build_request(request)?;

        let response = req_builder.send().await.map_err(Self::classify_error)?;

        let status = response.status().as_u16();

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        let body = response.bytes().await.map_err(Self::classify_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_client_constructs_with_defaults() {
        assert!(ReqwestHttpClient::new().is_ok());
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Get),
            reqwest::Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Post),
            reqwest::Method::POST
        );
    }

    #[test]
    fn test_convert_form_carries_all_parts() {
        let form = MultipartForm::new()
            .text("titulo", "Vertido en el río")
            .text("latitud", "18.47")
            .file("foto", "foto.jpg", "image/jpeg", Bytes::from_static(b"img"));

        // reqwest's Form does not expose its parts; conversion succeeding with
        // a boundary assigned is the observable contract here.
        let converted = ReqwestHttpClient::convert_form(form).unwrap();
        assert!(!converted.boundary().is_empty());
    }

    #[test]
    fn test_convert_form_rejects_bad_mime() {
        let form = MultipartForm::new().file(
            "foto",
            "foto.jpg",
            "not a mime type",
            Bytes::from_static(b"img"),
        );

        assert!(ReqwestHttpClient::convert_form(form).is_err());
    }
}
