//! # Request Sequencing
//!
//! Provides monotonic generation tickets for discarding stale async responses.
//!
//! ## Overview
//!
//! Screens frequently issue overlapping requests: a search box fires one query
//! per keystroke, or a refresh starts while the previous fetch is still in
//! flight. Responses can arrive out of order, and applying an old response on
//! top of a newer one shows stale data. A [`RequestSequence`] hands out a
//! [`RequestTicket`] per request; when the response lands, the caller checks
//! whether its ticket is still the newest generation and discards the result
//! otherwise.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::sequence::RequestSequence;
//!
//! let sequence = RequestSequence::new();
//!
//! let first = sequence.begin();
//! assert!(sequence.is_current(&first));
//!
//! // A newer request supersedes the outstanding one.
//! let second = sequence.begin();
//! assert!(!sequence.is_current(&first));
//! assert!(sequence.is_current(&second));
//! ```
//!
//! The async helper wraps the begin/check dance:
//!
//! ```rust
//! use core_runtime::sequence::RequestSequence;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let sequence = RequestSequence::new();
//!
//! let result = sequence.run_latest(async { 42 }).await;
//! assert_eq!(result, Some(42));
//! # }
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic generation counter for in-flight requests.
///
/// Each [`begin()`](RequestSequence::begin) advances the generation and makes
/// every outstanding ticket stale. Share across tasks with `Arc`.
#[derive(Debug, Default)]
pub struct RequestSequence {
    generation: AtomicU64,
}

impl RequestSequence {
    /// Creates a new sequence at generation zero.
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
        }
    }

    /// Starts a new request, superseding all outstanding tickets.
    pub fn begin(&self) -> RequestTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { generation }
    }

    /// Returns `true` if no newer request has started since the ticket was issued.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Marks every outstanding ticket stale without starting a new request.
    ///
    /// Use this when leaving a screen or signing out, so late responses from
    /// abandoned requests are dropped.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns the current generation number.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Runs an operation under a fresh ticket and returns its output only if
    /// the ticket is still current when the operation completes.
    ///
    /// Returns `None` when a newer request started (or [`invalidate()`]
    /// was called) while the operation was in flight.
    ///
    /// [`invalidate()`]: RequestSequence::invalidate
    pub async fn run_latest<F, T>(&self, operation: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin();
        let value = operation.await;

        if self.is_current(&ticket) {
            Some(value)
        } else {
            None
        }
    }
}

/// A generation marker for one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    /// Returns the generation this ticket was issued at.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
