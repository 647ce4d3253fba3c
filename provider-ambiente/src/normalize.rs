//! # Response Normalization
//!
//! Pure functions converting raw API records into the canonical models.
//!
//! ## Overview
//!
//! The ministry API is loosely typed: field names are Spanish, numbers
//! arrive as numbers or strings, optional fields are absent or null, and
//! report statuses are free text. Every screen consumes these functions so
//! the tolerance rules live in exactly one place:
//!
//! - missing required text normalizes to an empty string
//! - missing optional fields normalize to `None`
//! - coordinates survive only when both components parse to finite numbers
//! - a collection body that is not a JSON array yields an empty list
//!
//! Normalization never errors and performs no I/O.
//!
//! ## Status mapping
//!
//! Raw status text is lowercased, has Spanish accents folded to their ASCII
//! base letters, and is then tested against an ordered substring table;
//! the first match wins and anything unrecognized is `Pending`:
//!
//! | substring  | status      |
//! |------------|-------------|
//! | `revision` | UnderReview |
//! | `proceso`  | InProgress  |
//! | `resuelto` | Resolved    |
//! | `rechaz`   | Rejected    |

use crate::models::{
    AuthenticatedUser, Measure, NewsItem, ProtectedArea, Regulation, Report, ReportStatus,
    Service, TeamMember, Video,
};
use bridge_traits::geolocation::Coordinates;
use serde_json::Value;

// ============================================================================
// Value helpers
// ============================================================================

/// Required text field: absent or non-text values become an empty string.
fn text(raw: &Value, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Optional text field: only non-empty strings and numbers survive.
fn opt_text(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerces a numeric value that may arrive as a number or a numeric string.
///
/// Anything that does not parse to a finite `f64` is rejected, including
/// `"inf"`/`"NaN"` strings and the empty string.
pub fn finite_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn number_field(raw: &Value, key: &str) -> Option<f64> {
    raw.get(key).and_then(finite_number)
}

/// Extracts a `latitud`/`longitud` pair; `None` unless both are finite.
fn coordinates(raw: &Value) -> Option<Coordinates> {
    let latitude = number_field(raw, "latitud")?;
    let longitude = number_field(raw, "longitud")?;
    Some(Coordinates {
        latitude,
        longitude,
    })
}

/// Lowercases and folds Spanish accented vowels to their base letters.
///
/// `ñ` is a distinct letter, not an accented `n`, and is preserved.
fn fold_accents(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'ü' => 'u',
            other => other,
        })
        .collect()
}

// ============================================================================
// Status mapping
// ============================================================================

// Evaluated top to bottom; first match wins. The server's vocabulary is not
// controlled by this client, so unknown strings map to Pending rather than
// erroring.
const STATUS_MAP: [(&str, ReportStatus); 4] = [
    ("revision", ReportStatus::UnderReview),
    ("proceso", ReportStatus::InProgress),
    ("resuelto", ReportStatus::Resolved),
    ("rechaz", ReportStatus::Rejected),
];

/// Maps free-text server status into the closed [`ReportStatus`] set.
pub fn report_status(raw: &str) -> ReportStatus {
    let folded = fold_accents(raw);
    for (needle, status) in STATUS_MAP {
        if folded.contains(needle) {
            return status;
        }
    }
    ReportStatus::Pending
}

// ============================================================================
// Per-resource records
// ============================================================================

/// Normalizes one raw report record.
pub fn report(raw: &Value) -> Report {
    Report {
        id: text(raw, "id"),
        code: text(raw, "codigo"),
        title: text(raw, "titulo"),
        description: text(raw, "descripcion"),
        status: report_status(&text(raw, "estado")),
        date: text(raw, "fecha"),
        coordinates: coordinates(raw),
        photo_ref: opt_text(raw, "foto"),
        ministry_comment: opt_text(raw, "comentario_ministerio"),
    }
}

/// Normalizes one raw regulation record.
pub fn regulation(raw: &Value) -> Regulation {
    Regulation {
        id: text(raw, "id"),
        title: text(raw, "titulo"),
        kind: opt_text(raw, "tipo"),
        number: opt_text(raw, "numero"),
        description: text(raw, "descripcion"),
        published_at: opt_text(raw, "fecha_publicacion"),
        document_url: opt_text(raw, "url_documento"),
        created_at: opt_text(raw, "fecha_creacion"),
    }
}

/// Normalizes one raw news record. The date prefers `fecha` and falls back
/// to `fecha_creacion`.
pub fn news_item(raw: &Value) -> NewsItem {
    NewsItem {
        id: text(raw, "id"),
        title: text(raw, "titulo"),
        summary: text(raw, "resumen"),
        content: text(raw, "contenido"),
        image_url: opt_text(raw, "imagen"),
        date: opt_text(raw, "fecha").or_else(|| opt_text(raw, "fecha_creacion")),
    }
}

/// Normalizes one raw team member record.
pub fn team_member(raw: &Value) -> TeamMember {
    TeamMember {
        id: text(raw, "id"),
        name: text(raw, "nombre"),
        role: opt_text(raw, "cargo"),
        department: opt_text(raw, "departamento"),
        photo_url: opt_text(raw, "foto"),
        biography: opt_text(raw, "biografia"),
        order: number_field(raw, "orden").map(|f| f as i64).unwrap_or(0),
        phone: opt_text(raw, "telefono"),
        email: opt_text(raw, "email"),
    }
}

/// Normalizes one raw video record.
pub fn video(raw: &Value) -> Video {
    Video {
        id: text(raw, "id"),
        title: text(raw, "titulo"),
        description: text(raw, "descripcion"),
        url: opt_text(raw, "url"),
        thumbnail_url: opt_text(raw, "thumbnail"),
        category: opt_text(raw, "categoria"),
        duration: opt_text(raw, "duracion"),
        published_at: opt_text(raw, "fecha_creacion"),
    }
}

/// Normalizes one raw protected area record.
pub fn protected_area(raw: &Value) -> ProtectedArea {
    ProtectedArea {
        id: text(raw, "id"),
        name: text(raw, "nombre"),
        kind: opt_text(raw, "tipo"),
        description: text(raw, "descripcion"),
        location: opt_text(raw, "ubicacion"),
        area_km2: number_field(raw, "superficie_km2"),
        image_url: opt_text(raw, "imagen"),
        coordinates: coordinates(raw),
        created_at: opt_text(raw, "fecha_creacion"),
    }
}

/// Normalizes one raw service record.
pub fn service(raw: &Value) -> Service {
    Service {
        id: text(raw, "id"),
        name: text(raw, "nombre"),
        description: text(raw, "descripcion"),
        icon: opt_text(raw, "icono"),
    }
}

/// Normalizes one raw measure record.
pub fn measure(raw: &Value) -> Measure {
    Measure {
        id: text(raw, "id"),
        title: text(raw, "titulo"),
        description: text(raw, "descripcion"),
        category: opt_text(raw, "categoria"),
        icon: opt_text(raw, "icono"),
    }
}

// ============================================================================
// Collections
// ============================================================================

/// Maps a raw body element-wise. Anything that is not a JSON array
/// normalizes to an empty list.
pub fn collection<T, F>(raw: &Value, normalize: F) -> Vec<T>
where
    F: Fn(&Value) -> T,
{
    match raw {
        Value::Array(items) => items.iter().map(normalize).collect(),
        _ => Vec::new(),
    }
}

/// Normalizes a team body and sorts it by display order, then name.
pub fn team(raw: &Value) -> Vec<TeamMember> {
    let mut members = collection(raw, team_member);
    members.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
    members
}

/// Reports that carry plottable coordinates. Records without them stay in
/// list views but never reach a map.
pub fn plottable_reports(reports: &[Report]) -> Vec<Report> {
    reports
        .iter()
        .filter(|r| r.coordinates.is_some())
        .cloned()
        .collect()
}

/// Protected areas that carry plottable coordinates.
pub fn plottable_areas(areas: &[ProtectedArea]) -> Vec<ProtectedArea> {
    areas
        .iter()
        .filter(|a| a.coordinates.is_some())
        .cloned()
        .collect()
}

// ============================================================================
// Auth and submission bodies
// ============================================================================

/// Extracts the login outcome from a 2xx login response.
///
/// The token is taken from `token`, then `accessToken`, then `jwt`; a
/// response carrying none of them (or only empty ones) is not a login.
/// Identity falls back to the requested email and `"Usuario"` when the
/// body has no `user` object.
pub fn login_outcome(raw: &Value, requested_email: &str) -> Option<AuthenticatedUser> {
    let token = opt_text(raw, "token")
        .or_else(|| opt_text(raw, "accessToken"))
        .or_else(|| opt_text(raw, "jwt"))?;

    let user = raw.get("user");
    let name = user
        .and_then(|u| opt_text(u, "name").or_else(|| opt_text(u, "nombre")))
        .unwrap_or_else(|| "Usuario".to_string());
    let email = user
        .and_then(|u| opt_text(u, "email").or_else(|| opt_text(u, "correo")))
        .unwrap_or_else(|| requested_email.to_string());

    Some(AuthenticatedUser { name, email, token })
}

/// Server-provided failure message: `message`, then `error`.
pub fn error_message(raw: &Value) -> Option<String> {
    opt_text(raw, "message").or_else(|| opt_text(raw, "error"))
}

/// Recovery code from a password-recovery response.
pub fn recovery_code(raw: &Value) -> Option<String> {
    opt_text(raw, "codigo")
}

/// Tracking code from a report-submission response, either top level or
/// nested under `reporte`.
pub fn submission_code(raw: &Value) -> Option<String> {
    opt_text(raw, "codigo").or_else(|| raw.get("reporte").and_then(|r| opt_text(r, "codigo")))
}

// ============================================================================
// Tests
// ============================================================================
