//! # Core Runtime
//!
//! Shared infrastructure under the domain crates: the [`config`] layer the
//! facade is built from, the broadcast [`events`] bus UIs subscribe to, the
//! tracing-based [`logging`] stack with PII redaction, and [`sequence`]
//! numbering for discarding stale in-flight responses.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod sequence;

pub use error::{Error, Result};
