//! # Ministry API Connector
//!
//! High-level operations against the environmental ministry API. Each
//! method issues one HTTP call through [`ApiClient`] and normalizes the
//! raw body into the canonical models, so callers never see loose JSON.
//!
//! ## Endpoints
//!
//! Catalog resources (`/servicios`, `/noticias`, `/videos`,
//! `/areas_protegidas`, `/medidas`, `/equipo`) are public. Regulations,
//! report listing and report submission require a bearer token, which the
//! caller obtains from the session layer; this crate stores nothing.
//!
//! ## Usage
//!
//! ```ignore
//! use provider_ambiente::AmbienteConnector;
//!
//! let connector = AmbienteConnector::with_default_base_url(http_client);
//! let news = connector.news().await?;
//! let user = connector.login("ana@example.com", "secret").await?;
//! ```

use std::sync::Arc;

use bridge_traits::http::{HttpClient, MultipartForm};
use core_runtime::logging::redact_if_sensitive;
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::{ApiError, Result};
use crate::models::{
    AuthenticatedUser, Measure, NewsItem, ProtectedArea, Registration, Regulation, Report,
    Service, TeamMember, Video, VolunteerSignup,
};
use crate::normalize;

/// Appends a single query parameter when the value is non-empty.
fn filtered_path(base: &str, param: &str, value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => format!("{}?{}={}", base, param, urlencoding::encode(v)),
        None => base.to_string(),
    }
}

/// Connector for the environmental ministry API.
#[derive(Clone)]
pub struct AmbienteConnector {
    client: ApiClient,
}

impl AmbienteConnector {
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client: ApiClient::new(http_client, base_url),
        }
    }

    /// Connector pointed at the production ministry API.
    pub fn with_default_base_url(http_client: Arc<dyn HttpClient>) -> Self {
        Self::new(http_client, endpoints::BASE_URL)
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    // ========================================================================
    // Public catalog
    // ========================================================================

    /// Ministry services directory.
    #[instrument(skip(self))]
    pub async fn services(&self) -> Result<Vec<Service>> {
        let raw = self.client.get(endpoints::SERVICES, None).await?;
        Ok(normalize::collection(&raw, normalize::service))
    }

    /// A single service by id.
    #[instrument(skip(self))]
    pub async fn service(&self, id: &str) -> Result<Service> {
        let raw = self.client.get(&endpoints::service_by_id(id), None).await?;
        Ok(normalize::service(&raw))
    }

    /// News feed, newest first as served.
    #[instrument(skip(self))]
    pub async fn news(&self) -> Result<Vec<NewsItem>> {
        let raw = self.client.get(endpoints::NEWS, None).await?;
        Ok(normalize::collection(&raw, normalize::news_item))
    }

    /// Educational videos, optionally filtered by category.
    #[instrument(skip(self))]
    pub async fn videos(&self, category: Option<&str>) -> Result<Vec<Video>> {
        let path = filtered_path(endpoints::VIDEOS, "categoria", category);
        let raw = self.client.get(&path, None).await?;
        Ok(normalize::collection(&raw, normalize::video))
    }

    /// Protected areas, including records without map coordinates.
    #[instrument(skip(self))]
    pub async fn protected_areas(&self) -> Result<Vec<ProtectedArea>> {
        let raw = self.client.get(endpoints::PROTECTED_AREAS, None).await?;
        Ok(normalize::collection(&raw, normalize::protected_area))
    }

    /// Environmental measures catalog.
    #[instrument(skip(self))]
    pub async fn measures(&self) -> Result<Vec<Measure>> {
        let raw = self.client.get(endpoints::MEASURES, None).await?;
        Ok(normalize::collection(&raw, normalize::measure))
    }

    /// Ministry staff, optionally filtered by department and always sorted
    /// by display order, then name.
    #[instrument(skip(self))]
    pub async fn team(&self, department: Option<&str>) -> Result<Vec<TeamMember>> {
        let path = filtered_path(endpoints::TEAM, "departamento", department);
        let raw = self.client.get(&path, None).await?;
        Ok(normalize::team(&raw))
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Exchanges credentials for an authenticated user.
    ///
    /// The email is sent exactly as typed. A 2xx response that carries no
    /// usable token is treated as rejected credentials; the server answers
    /// that way for some accounts instead of using an error status.
    #[instrument(
        skip(self, email, password),
        fields(email = %redact_if_sensitive("email", email))
    )]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let body = json!({ "correo": email, "password": password });
        let raw = self.client.post(endpoints::LOGIN, &body, None).await?;

        match normalize::login_outcome(&raw, email) {
            Some(user) => {
                info!("Login accepted");
                Ok(user)
            }
            None => {
                let message = normalize::error_message(&raw)
                    .unwrap_or_else(|| "Credenciales incorrectas".to_string());
                Err(ApiError::Request {
                    status: 200,
                    message,
                })
            }
        }
    }

    /// Creates a ministry account.
    #[instrument(skip(self, form))]
    pub async fn register(&self, form: &Registration) -> Result<()> {
        let body = json!({
            "cedula": form.cedula,
            "nombre": form.first_name.trim(),
            "apellido": form.last_name.trim(),
            "correo": form.email.trim().to_lowercase(),
            "password": form.password,
            "telefono": form.phone,
            "matricula": form.matricula,
        });
        self.client.post(endpoints::REGISTER, &body, None).await?;
        info!("Registration submitted");
        Ok(())
    }

    /// Signs up a volunteer. Same shape as registration minus `matricula`.
    #[instrument(skip(self, form))]
    pub async fn register_volunteer(&self, form: &VolunteerSignup) -> Result<()> {
        let body = json!({
            "cedula": form.cedula,
            "nombre": form.first_name.trim(),
            "apellido": form.last_name.trim(),
            "correo": form.email.trim().to_lowercase(),
            "password": form.password,
            "telefono": form.phone,
        });
        self.client.post(endpoints::VOLUNTEERS, &body, None).await?;
        info!("Volunteer signup submitted");
        Ok(())
    }

    /// Starts password recovery. Some server versions return the recovery
    /// code in the response body; when present it is passed through so the
    /// host can prefill the confirmation form.
    #[instrument(
        skip(self, email),
        fields(email = %redact_if_sensitive("email", email))
    )]
    pub async fn recover_password(&self, email: &str) -> Result<Option<String>> {
        let body = json!({ "correo": email });
        let raw = self.client.post(endpoints::RECOVER, &body, None).await?;
        Ok(normalize::recovery_code(&raw))
    }

    /// Completes password recovery with the emailed code.
    #[instrument(
        skip(self, email, code, new_password, token),
        fields(email = %redact_if_sensitive("email", email))
    )]
    pub async fn change_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
        token: &str,
    ) -> Result<()> {
        let body = json!({
            "correo": email,
            "codigo": code,
            "nueva_password": new_password,
        });
        self.client
            .post(endpoints::CHANGE_PASSWORD, &body, Some(token))
            .await?;
        info!("Password changed");
        Ok(())
    }

    // ========================================================================
    // Protected resources
    // ========================================================================

    /// Environmental regulations, filtered server side by kind and free-text
    /// search. Blank filters are dropped from the query string.
    #[instrument(skip(self, token))]
    pub async fn regulations(
        &self,
        token: &str,
        kind: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Regulation>> {
        let mut query = Vec::new();
        if let Some(kind) = kind.map(str::trim).filter(|k| !k.is_empty()) {
            query.push(format!("tipo={}", urlencoding::encode(kind)));
        }
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query.push(format!("busqueda={}", urlencoding::encode(search)));
        }
        let path = if query.is_empty() {
            endpoints::REGULATIONS.to_string()
        } else {
            format!("{}?{}", endpoints::REGULATIONS, query.join("&"))
        };

        let raw = self.client.get(&path, Some(token)).await?;
        Ok(normalize::collection(&raw, normalize::regulation))
    }

    /// The caller's submitted reports, in server order.
    #[instrument(skip(self, token))]
    pub async fn reports(&self, token: &str) -> Result<Vec<Report>> {
        let raw = self.client.get(endpoints::REPORTS, Some(token)).await?;
        Ok(normalize::collection(&raw, normalize::report))
    }

    /// Submits a report as JSON and returns the tracking code when the
    /// server assigns one.
    #[instrument(skip(self, token, payload))]
    pub async fn submit_report(&self, token: &str, payload: &Value) -> Result<Option<String>> {
        let raw = self
            .client
            .post(endpoints::REPORTS, payload, Some(token))
            .await?;
        info!("Report submitted");
        Ok(normalize::submission_code(&raw))
    }

    /// Submits a report as a multipart form, for servers that reject large
    /// base64 photo payloads.
    #[instrument(skip(self, token, form))]
    pub async fn submit_report_multipart(
        &self,
        token: &str,
        form: MultipartForm,
    ) -> Result<Option<String>> {
        let raw = self
            .client
            .post_multipart(endpoints::REPORTS, form, Some(token))
            .await?;
        info!("Report submitted");
        Ok(normalize::submission_code(&raw))
    }
}
