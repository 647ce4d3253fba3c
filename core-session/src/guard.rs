//! # Access Guard
//!
//! Gating policy for operations that require an authenticated session.
//!
//! Protected operations evaluate the guard before touching the transport
//! layer; a denied result short-circuits to a sign-in prompt with zero
//! network calls issued. The evaluation is pure so every caller applies
//! the exact same policy.
//!
//! ```
//! use core_session::{Access, DeniedReason, Identity, Session};
//!
//! let anonymous = Session::anonymous();
//! assert_eq!(
//!     Access::evaluate(&anonymous),
//!     Access::Denied(DeniedReason::MissingToken)
//! );
//!
//! let signed_in = Session::authenticated(Identity::new("Ana", "ana@example.com"), "abc");
//! assert_eq!(Access::evaluate(&signed_in), Access::Allowed("abc".to_string()));
//! ```

use crate::types::Session;

/// Why a protected operation was denied before reaching the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeniedReason {
    /// The current session carries no bearer token
    MissingToken,
}

/// Outcome of evaluating whether a protected operation may proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// The session is authenticated; the carried token authorizes the call
    Allowed(String),
    /// The operation must short-circuit to a sign-in prompt
    Denied(DeniedReason),
}

impl Access {
    /// Evaluates the guard against a session snapshot.
    pub fn evaluate(session: &Session) -> Access {
        match session.token() {
            Some(token) => Access::Allowed(token.to_string()),
            None => Access::Denied(DeniedReason::MissingToken),
        }
    }

    /// Whether the operation may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allowed(_))
    }

    /// The authorizing token, if allowed.
    pub fn token(&self) -> Option<&str> {
        match self {
            Access::Allowed(token) => Some(token),
            Access::Denied(_) => None,
        }
    }
}
