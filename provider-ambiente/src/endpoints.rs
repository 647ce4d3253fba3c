//! Endpoint catalog for the ministry REST API.
//!
//! Paths are relative to [`BASE_URL`]; the connector joins them and appends
//! query parameters where a resource accepts filters.

/// Production API host
pub const BASE_URL: &str = "https://adamix.net/medioambiente";

// Public resources
pub const SERVICES: &str = "/servicios";
pub const NEWS: &str = "/noticias";
pub const VIDEOS: &str = "/videos";
pub const PROTECTED_AREAS: &str = "/areas_protegidas";
pub const MEASURES: &str = "/medidas";
pub const TEAM: &str = "/equipo";
pub const VOLUNTEERS: &str = "/voluntarios";

// Accounts
pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const RECOVER: &str = "/auth/recover";
pub const CHANGE_PASSWORD: &str = "/auth/cambiar-password";

// Bearer-protected resources
pub const REGULATIONS: &str = "/normativas";
pub const REPORTS: &str = "/reportes";

/// Path for a single service record.
pub fn service_by_id(id: &str) -> String {
    format!("{}/{}", SERVICES, urlencoding::encode(id))
}
