//! # Report Drafting
//!
//! Assembles environmental damage reports: a draft the host UI fills in,
//! field-scoped validation with the Spanish messages the app shows, capture
//! orchestration for photo and position, and conversion into the wire
//! payload the ministry API accepts.
//!
//! Submission itself happens elsewhere; this crate produces a payload and
//! never talks to the network.

pub mod capture;
pub mod draft;
pub mod error;

pub use capture::CaptureService;
pub use draft::{DraftField, FieldError, ReportPayload, SubmissionDraft};
pub use error::{ReportError, Result};
