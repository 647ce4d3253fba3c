use thiserror::Error;

use crate::draft::FieldError;

/// Errors from draft validation and payload construction.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The draft does not pass field validation. Each entry carries the
    /// field to highlight and the message to render.
    #[error("Draft validation failed on {} field(s)", .0.len())]
    Invalid(Vec<FieldError>),

    /// The attached photo's base64 payload could not be decoded.
    #[error("Attached photo is not valid base64")]
    InvalidPhotoData,
}

pub type Result<T> = std::result::Result<T, ReportError>;
