//! # Event Bus
//!
//! Push channel from the core to the host UI, built on
//! `tokio::sync::broadcast`. The facade emits a [`CoreEvent`] whenever the
//! session changes state or a report submission settles; screens subscribe
//! and react without polling.
//!
//! Delivery is fan-out: every active subscriber sees every event emitted
//! after it subscribed. Past events are never replayed, and a subscriber
//! that falls more than the buffer size behind receives
//! [`RecvError::Lagged`] instead of the missed events.
//!
//! ```rust
//! use core_runtime::events::{CoreEvent, EventBus, SessionEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::default();
//! let mut updates = bus.subscribe();
//!
//! bus.emit(CoreEvent::Session(SessionEvent::SignedOut)).ok();
//!
//! match updates.recv().await {
//!     Ok(CoreEvent::Session(SessionEvent::SignedOut)) => { /* clear the UI */ }
//!     Ok(other) => println!("{}", other.description()),
//!     Err(_) => { /* lagged or shut down */ }
//! }
//! # }
//! ```
//!
//! Events serialize with a stable tagged layout (`type` + `payload`) so hosts
//! that marshal them across an FFI or IPC boundary can match on plain JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Buffer size used by [`EventBus::default`].
///
/// Big enough to absorb a burst of session and report events; a subscriber
/// that falls further behind than this observes `RecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Event types
// ============================================================================

/// Everything the core can tell the host, in one enum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Session lifecycle events
    Session(SessionEvent),
    /// Report submission events
    Report(ReportEvent),
}

impl CoreEvent {
    /// Short human-readable label, mainly for logs.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Session(e) => e.description(),
            CoreEvent::Report(e) => e.description(),
        }
    }

    /// How urgently the host should surface this event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Report(ReportEvent::SubmitFailed { .. }) => EventSeverity::Error,
            CoreEvent::Session(SessionEvent::Expired) => EventSeverity::Warning,
            CoreEvent::Session(SessionEvent::SignedIn { .. })
            | CoreEvent::Session(SessionEvent::Restored { .. })
            | CoreEvent::Report(ReportEvent::Submitted { .. }) => EventSeverity::Info,
            CoreEvent::Session(SessionEvent::SignedOut) => EventSeverity::Debug,
        }
    }
}

/// Ordered severity, usable as an [`EventStream`] filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Session lifecycle transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum SessionEvent {
    /// Credentials were accepted and the session persisted.
    SignedIn { email: String },
    /// A persisted session was restored from secure storage at startup.
    Restored { email: String },
    /// The user signed out; in-memory state and stored credentials are gone.
    SignedOut,
    /// The server rejected the stored token (HTTP 401). The session was
    /// discarded and the user must authenticate again.
    Expired,
}

impl SessionEvent {
    fn description(&self) -> &str {
        match self {
            SessionEvent::SignedIn { .. } => "User signed in",
            SessionEvent::Restored { .. } => "Persisted session restored",
            SessionEvent::SignedOut => "User signed out",
            SessionEvent::Expired => "Session expired",
        }
    }
}

/// Outcome of a report submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ReportEvent {
    /// The server accepted the report.
    Submitted {
        /// Server-assigned tracking code, when the response carried one.
        code: Option<String>,
    },
    /// The submission was rejected or failed in transit.
    SubmitFailed {
        /// Message suitable for showing to the user.
        message: String,
    },
}

impl ReportEvent {
    fn description(&self) -> &str {
        match self {
            ReportEvent::Submitted { .. } => "Report submitted",
            ReportEvent::SubmitFailed { .. } => "Report submission failed",
        }
    }
}

// ============================================================================
// Event bus
// ============================================================================

/// Broadcast channel shared by the core services.
///
/// Cloning the bus clones the sender side; every clone emits into the same
/// channel. Each [`subscribe`](EventBus::subscribe) call hands out an
/// independent receiver.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a bus whose subscribers may fall at most `capacity` events
    /// behind before they start lagging.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to every active subscriber.
    ///
    /// Returns the number of subscribers reached. Emitting with nobody
    /// listening is an error at the channel level, but callers that treat
    /// events as fire-and-forget can ignore it:
    ///
    /// ```rust
    /// use core_runtime::events::{CoreEvent, EventBus, SessionEvent};
    ///
    /// let bus = EventBus::default();
    /// let _ = bus.emit(CoreEvent::Session(SessionEvent::SignedOut));
    /// ```
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Opens an independent subscription starting at the current point in
    /// the stream. Events emitted before this call are not replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Number of currently active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Filtered stream
// ============================================================================

type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A receiver that skips events its predicate rejects.
///
/// Useful when a screen only cares about one slice of the stream:
///
/// ```rust
/// use core_runtime::events::{CoreEvent, EventBus, EventStream};
///
/// let bus = EventBus::default();
/// let mut reports_only = EventStream::new(bus.subscribe())
///     .filter(|event| matches!(event, CoreEvent::Report(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Restricts the stream to events matching `predicate`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, event: &CoreEvent) -> bool {
        self.filter.as_ref().map_or(true, |keep| keep(event))
    }

    /// Waits for the next event that passes the filter.
    ///
    /// # Errors
    ///
    /// `RecvError::Lagged(n)` when the stream fell `n` events behind, and
    /// `RecvError::Closed` once every sender is gone. Skipped events do not
    /// count against the lag.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Drains buffered events until one passes the filter, without waiting.
    ///
    /// `None` means nothing matching is currently buffered.
    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.accepts(&event) => return Some(Ok(event)),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}
