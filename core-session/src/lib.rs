//! # Session Module
//!
//! Process-wide authentication state for the ministry client.
//!
//! ## Overview
//!
//! This module owns the user session: the in-memory authentication state,
//! its persistence in the platform secure store, and the access guard that
//! protected operations consult before making network calls. Session
//! transitions are announced on the shared event bus.
//!
//! ## Features
//!
//! - Session restore on process start, never fatal to the caller
//! - Atomic sign-in: persist first, install in memory second
//! - Idempotent sign-out
//! - Forced expiry when the server rejects a token
//! - Pure access-guard evaluation for protected operations

pub mod error;
pub mod guard;
pub mod manager;
pub mod store;
pub mod types;

pub use error::{Result, SessionError};
pub use guard::{Access, DeniedReason};
pub use manager::SessionManager;
pub use store::SessionStore;
pub use types::{Identity, Session};
