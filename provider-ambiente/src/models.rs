//! # Canonical Records
//!
//! Stable internal shapes for everything the ministry API returns. Raw
//! responses arrive with Spanish field names, inconsistent typing (numbers
//! as strings, absent fields) and free-text statuses; the
//! [`normalize`](crate::normalize) module converts them into these types so
//! screens never touch raw JSON.

use bridge_traits::geolocation::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a submitted damage report.
///
/// The server vocabulary is free text; [`normalize::report_status`]
/// maps it into this closed set.
///
/// [`normalize::report_status`]: crate::normalize::report_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Pending,
    UnderReview,
    InProgress,
    Resolved,
    Rejected,
}

impl ReportStatus {
    /// Spanish display label, matching the vocabulary users see.
    pub fn label_es(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pendiente",
            ReportStatus::UnderReview => "En Revisión",
            ReportStatus::InProgress => "En Proceso",
            ReportStatus::Resolved => "Resuelto",
            ReportStatus::Rejected => "Rechazado",
        }
    }
}

/// An environmental damage report filed by the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub id: String,
    /// Ministry-assigned tracking code
    pub code: String,
    pub title: String,
    pub description: String,
    pub status: ReportStatus,
    /// Raw date text as reported by the server
    pub date: String,
    /// Present only when both components parsed to finite numbers
    pub coordinates: Option<Coordinates>,
    pub photo_ref: Option<String>,
    /// Follow-up comment from the ministry, if any
    pub ministry_comment: Option<String>,
}

/// An environmental regulation (law, decree, resolution or norm).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Regulation {
    pub id: String,
    pub title: String,
    pub kind: Option<String>,
    pub number: Option<String>,
    pub description: String,
    pub published_at: Option<String>,
    pub document_url: Option<String>,
    pub created_at: Option<String>,
}

/// A news article from the ministry feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: Option<String>,
    /// Publication date, falling back to the record creation date
    pub date: Option<String>,
}

/// A ministry staff member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: Option<String>,
    pub department: Option<String>,
    pub photo_url: Option<String>,
    pub biography: Option<String>,
    /// Display position; missing values sort first as 0
    pub order: i64,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// An educational video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub published_at: Option<String>,
}

/// A protected natural area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectedArea {
    pub id: String,
    pub name: String,
    pub kind: Option<String>,
    pub description: String,
    pub location: Option<String>,
    pub area_km2: Option<f64>,
    pub image_url: Option<String>,
    /// Present only when both components parsed to finite numbers
    pub coordinates: Option<Coordinates>,
    pub created_at: Option<String>,
}

/// A service the ministry offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
}

/// An environmental protection measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub icon: Option<String>,
}

/// Successful login outcome: the identity the server reported plus the
/// bearer token it issued.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub name: String,
    pub email: String,
    pub token: String,
}

impl fmt::Debug for AuthenticatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Account registration form, pre-formatted by the host UI.
///
/// `cedula` arrives as `000-0000000-0`, `phone` as 10 digits and
/// `matricula` as `0000-0000`; the connector trims names and lowercases
/// the email before sending.
#[derive(Clone)]
pub struct Registration {
    pub cedula: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub matricula: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("cedula", &self.cedula)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone", &self.phone)
            .field("matricula", &self.matricula)
            .finish()
    }
}

/// Volunteer signup form; same shape as [`Registration`] minus the
/// matricula.
#[derive(Clone)]
pub struct VolunteerSignup {
    pub cedula: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl fmt::Debug for VolunteerSignup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolunteerSignup")
            .field("cedula", &self.cedula)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone", &self.phone)
            .finish()
    }
}
