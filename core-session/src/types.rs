//! # Session Types
//!
//! Core data structures describing the authenticated user session.
//!
//! ## Overview
//!
//! A [`Session`] is the process-wide record of authentication state: who the
//! user is ([`Identity`]) and the opaque bearer token proving it. A session
//! is authenticated exactly when it carries a non-empty token; there is no
//! separate boolean to drift out of sync.
//!
//! ## Security
//!
//! `Session` deliberately does not implement `Serialize` and its `Debug`
//! output redacts the token. Persistence goes through
//! [`SessionStore`](crate::store::SessionStore), which controls exactly what
//! reaches durable storage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The signed-in user as reported by the ministry API.
///
/// # Examples
///
/// ```
/// use core_session::Identity;
///
/// let identity = Identity::new("Ana Reyes", "ana.reyes@example.com");
/// assert_eq!(identity.name, "Ana Reyes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name of the user
    pub name: String,
    /// Email address the account was registered with
    pub email: String,
}

impl Identity {
    /// Creates a new identity.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Current authentication state of the process.
///
/// A session is either anonymous (no token) or authenticated (non-empty
/// token plus the identity it belongs to). Mutation happens only through
/// [`SessionManager`](crate::manager::SessionManager); readers receive
/// cheap clones.
///
/// # Examples
///
/// ```
/// use core_session::{Identity, Session};
///
/// let session = Session::anonymous();
/// assert!(!session.is_authenticated());
/// assert!(session.token().is_none());
///
/// let session = Session::authenticated(Identity::new("Ana", "ana@example.com"), "abc123");
/// assert!(session.is_authenticated());
/// assert_eq!(session.token(), Some("abc123"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
    token: String,
}

impl Session {
    /// Creates a signed-out session.
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            token: String::new(),
        }
    }

    /// Creates a signed-in session for `identity` holding `token`.
    pub fn authenticated(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            identity: Some(identity),
            token: token.into(),
        }
    }

    /// Whether a non-empty bearer token is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_session::{Identity, Session};
    ///
    /// assert!(!Session::anonymous().is_authenticated());
    /// assert!(Session::authenticated(Identity::new("A", "a@b.c"), "t").is_authenticated());
    /// ```
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// The identity of the signed-in user, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The bearer token, or `None` when the session is anonymous.
    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(&self.token)
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

// Custom Debug to prevent the bearer token from leaking into logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() {
            "<none>"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("token", &token)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_new() {
        let identity = Identity::new("Ana Reyes", "ana.reyes@example.com");
        assert_eq!(identity.name, "Ana Reyes");
        assert_eq!(identity.email, "ana.reyes@example.com");
    }

    #[test]
    fn test_identity_serde_round_trip() {
        let identity = Identity::new("Ana", "ana@example.com");
        let json = serde_json::to_string(&identity).unwrap();
        let parsed: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, identity);
    }

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.identity().is_none());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_default_is_anonymous() {
        assert_eq!(Session::default(), Session::anonymous());
    }

    #[test]
    fn test_authenticated_session() {
        let session = Session::authenticated(Identity::new("Ana", "ana@example.com"), "tok-1");
        assert!(session.is_authenticated());
        assert_eq!(session.identity().map(|i| i.name.as_str()), Some("Ana"));
        assert_eq!(session.token(), Some("tok-1"));
    }

    #[test]
    fn test_authenticated_iff_token_non_empty() {
        // The invariant is computed from the token, never stored separately.
        let session = Session::authenticated(Identity::new("Ana", "ana@example.com"), "");
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::authenticated(Identity::new("Ana", "ana@example.com"), "secret-token");
        let debug = format!("{:?}", session);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_debug_anonymous_shows_none() {
        let debug = format!("{:?}", Session::anonymous());
        assert!(debug.contains("<none>"));
        assert!(!debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_session_clone_preserves_state() {
        let session = Session::authenticated(Identity::new("Ana", "ana@example.com"), "tok");
        let clone = session.clone();
        assert_eq!(clone, session);
        assert_eq!(clone.token(), Some("tok"));
    }
}
