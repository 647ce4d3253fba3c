//! # Submission Draft
//!
//! The in-progress damage report a host UI assembles before submitting.
//! A draft accumulates the four required inputs, validates them field by
//! field with the Spanish messages the host renders verbatim, and converts
//! into a wire payload only once every rule passes.
//!
//! ## Usage
//!
//! ```
//! use core_report::draft::SubmissionDraft;
//!
//! let mut draft = SubmissionDraft::new();
//! draft.title = "Vertido de residuos".to_string();
//!
//! let errors = draft.validate();
//! assert!(errors.iter().any(|e| e.message == "La descripción es requerida"));
//! ```

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bridge_traits::geolocation::Coordinates;
use bridge_traits::http::MultipartForm;
use bridge_traits::media::CapturedPhoto;
use bytes::Bytes;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{ReportError, Result};

/// Fields a draft can fail validation on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Title,
    Description,
    Photo,
    Location,
}

impl DraftField {
    /// Stable key the host uses to address form inputs.
    pub fn key(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Photo => "photo",
            DraftField::Location => "location",
        }
    }
}

/// One validation failure: the field to highlight and the message to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: DraftField,
    /// Spanish, rendered by the host as-is
    pub message: &'static str,
}

impl FieldError {
    fn new(field: DraftField, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// An in-progress damage report.
///
/// Text fields are bound directly to form inputs; photo and location are
/// filled through [`crate::capture::CaptureService`].
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    pub title: String,
    pub description: String,
    pub photo: Option<CapturedPhoto>,
    pub location: Option<Coordinates>,
}

impl SubmissionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field-scoped validation. An empty result means the draft is
    /// submittable.
    ///
    /// The description length is counted in characters, not bytes, so
    /// accented text is not penalized.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError::new(DraftField::Title, "El título es requerido"));
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(FieldError::new(
                DraftField::Description,
                "La descripción es requerida",
            ));
        } else if description.chars().count() < 20 {
            errors.push(FieldError::new(
                DraftField::Description,
                "Mínimo 20 caracteres",
            ));
        }

        if self.photo.is_none() {
            errors.push(FieldError::new(DraftField::Photo, "La foto es requerida"));
        }

        match self.location {
            Some(coordinates) if coordinates.is_finite() => {}
            _ => errors.push(FieldError::new(
                DraftField::Location,
                "La ubicación es requerida",
            )),
        }

        errors
    }

    pub fn is_ready(&self) -> bool {
        self.validate().is_empty()
    }

    /// Converts a valid draft into the wire payload, trimming the text
    /// fields. An invalid draft returns its field errors instead.
    pub fn to_payload(&self) -> Result<ReportPayload> {
        let errors = self.validate();
        match (self.photo.as_ref(), self.location) {
            (Some(photo), Some(location)) if errors.is_empty() => Ok(ReportPayload {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                photo_base64: photo.base64_data.clone(),
                latitude: location.latitude,
                longitude: location.longitude,
            }),
            _ => Err(ReportError::Invalid(errors)),
        }
    }
}

/// Wire-ready report body. Field names match the ministry API: `titulo`,
/// `descripcion`, `foto` (base64), `latitud`, `longitud`.
#[derive(Clone)]
pub struct ReportPayload {
    title: String,
    description: String,
    photo_base64: String,
    latitude: f64,
    longitude: f64,
}

impl ReportPayload {
    /// JSON body for the default submission path.
    pub fn to_json(&self) -> Value {
        json!({
            "titulo": self.title,
            "descripcion": self.description,
            "foto": self.photo_base64,
            "latitud": self.latitude,
            "longitud": self.longitude,
        })
    }

    /// Multipart body for servers that reject large base64 payloads: text
    /// parts plus the decoded image bytes as a `foto` file part.
    pub fn to_multipart(&self) -> Result<MultipartForm> {
        let image = STANDARD
            .decode(self.photo_base64.as_bytes())
            .map_err(|_| ReportError::InvalidPhotoData)?;

        Ok(MultipartForm::new()
            .text("titulo", self.title.clone())
            .text("descripcion", self.description.clone())
            .text("latitud", self.latitude.to_string())
            .text("longitud", self.longitude.to_string())
            .file("foto", "foto.jpg", "image/jpeg", Bytes::from(image)))
    }
}

// Encoded image bytes are bulky and useless in logs; show their size only.
impl fmt::Debug for ReportPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportPayload")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("photo_base64", &format!("<{} bytes>", self.photo_base64.len()))
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::http::MultipartPart;

    fn valid_draft() -> SubmissionDraft {
        SubmissionDraft {
            title: "  Vertido de residuos  ".to_string(),
            description: " Residuos industriales en la orilla del río ".to_string(),
            photo: Some(CapturedPhoto::new("file:///tmp/foto.jpg", STANDARD.encode(b"img"))),
            location: Some(Coordinates::new(19.05, -70.51)),
        }
    }

    #[test]
    fn test_empty_draft_fails_every_field() {
        let errors = SubmissionDraft::new().validate();

        let messages: Vec<&str> = errors.iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            [
                "El título es requerido",
                "La descripción es requerida",
                "La foto es requerida",
                "La ubicación es requerida",
            ]
        );
        let fields: Vec<DraftField> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            [
                DraftField::Title,
                DraftField::Description,
                DraftField::Photo,
                DraftField::Location,
            ]
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut draft = valid_draft();
        draft.title = "   ".to_string();
        draft.description = "\n\t ".to_string();

        let errors = draft.validate();
        assert!(errors.iter().any(|e| e.message == "El título es requerido"));
        assert!(errors.iter().any(|e| e.message == "La descripción es requerida"));
    }

    #[test]
    fn test_short_description_gets_length_message() {
        let mut draft = valid_draft();
        draft.description = "Muy corta".to_string();

        let errors = draft.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, DraftField::Description);
        assert_eq!(errors[0].message, "Mínimo 20 caracteres");
    }

    #[test]
    fn test_description_length_counts_characters_not_bytes() {
        let mut draft = valid_draft();

        // 19 two-byte characters: 38 bytes but still under 20 characters.
        draft.description = "á".repeat(19);
        assert_eq!(draft.validate()[0].message, "Mínimo 20 caracteres");

        draft.description = "á".repeat(20);
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_non_finite_location_is_rejected() {
        let mut draft = valid_draft();
        draft.location = Some(Coordinates::new(f64::NAN, -70.51));

        let errors = draft.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "La ubicación es requerida");
    }

    #[test]
    fn test_valid_draft_is_ready() {
        assert!(valid_draft().is_ready());
    }

    #[test]
    fn test_payload_trims_text_and_keeps_wire_names() {
        let payload = valid_draft().to_payload().unwrap();

        assert_eq!(
            payload.to_json(),
            json!({
                "titulo": "Vertido de residuos",
                "descripcion": "Residuos industriales en la orilla del río",
                "foto": STANDARD.encode(b"img"),
                "latitud": 19.05,
                "longitud": -70.51,
            })
        );
    }

    #[test]
    fn test_invalid_draft_refuses_payload() {
        let err = SubmissionDraft::new().to_payload().unwrap_err();
        match err {
            ReportError::Invalid(errors) => assert_eq!(errors.len(), 4),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_multipart_decodes_photo_bytes() {
        let form = valid_draft().to_payload().unwrap().to_multipart().unwrap();
        assert_eq!(form.parts.len(), 5);

        match &form.parts[4] {
            MultipartPart::File {
                name,
                file_name,
                mime_type,
                data,
            } => {
                assert_eq!(name, "foto");
                assert_eq!(file_name, "foto.jpg");
                assert_eq!(mime_type, "image/jpeg");
                assert_eq!(data.as_ref(), b"img");
            }
            other => panic!("expected file part, got {other:?}"),
        }

        match &form.parts[2] {
            MultipartPart::Text { name, value } => {
                assert_eq!(name, "latitud");
                assert_eq!(value, "19.05");
            }
            other => panic!("expected text part, got {other:?}"),
        }
    }

    #[test]
    fn test_multipart_rejects_bad_base64() {
        let mut draft = valid_draft();
        draft.photo = Some(CapturedPhoto::new("file:///tmp/foto.jpg", "¡no base64!"));

        let err = draft.to_payload().unwrap().to_multipart().unwrap_err();
        assert!(matches!(err, ReportError::InvalidPhotoData));
    }

    #[test]
    fn test_payload_debug_hides_photo_bytes() {
        let payload = valid_draft().to_payload().unwrap();
        let debug = format!("{:?}", payload);
        assert!(debug.contains("Vertido de residuos"));
        assert!(!debug.contains(&STANDARD.encode(b"img")));
    }

    #[test]
    fn test_field_keys() {
        assert_eq!(DraftField::Title.key(), "title");
        assert_eq!(DraftField::Description.key(), "description");
        assert_eq!(DraftField::Photo.key(), "photo");
        assert_eq!(DraftField::Location.key(), "location");
    }
}
