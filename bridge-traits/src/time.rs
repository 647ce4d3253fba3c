//! Time Source and Host Log Forwarding
//!
//! `Clock` makes timestamps injectable so log forwarding can be tested
//! deterministically. `LoggerSink` carries structured entries from the core
//! into whatever pipeline the host uses: OSLog on iOS, Logcat on Android,
//! console or files on desktop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

/// Injectable UTC time source.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Current Unix timestamp in milliseconds.
    fn timestamp_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// `Clock` backed by the actual system time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Severity of a forwarded log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Uppercase label as written in rendered log lines.
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// One structured log event, ready for a host pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    /// Module path or explicit target of the originating event
    pub target: String,
    pub message: String,
    /// Structured fields recorded on the event
    pub fields: HashMap<String, String>,
    /// Name of the enclosing span, if the event fired inside one
    pub span_id: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            target: target.into(),
            message: message.into(),
            fields: HashMap::new(),
            span_id: None,
        }
    }

    /// Replaces the creation timestamp, normally with one from a [`Clock`].
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_span_id(mut self, span_id: impl Into<String>) -> Self {
        self.span_id = Some(span_id.into());
        self
    }
}

/// Host logging pipeline.
///
/// Entries arrive already filtered and with sensitive fields redacted at the
/// call site; implementations only transport them. Anything below
/// [`min_level`](LoggerSink::min_level) may be dropped before it is built.
#[async_trait::async_trait]
pub trait LoggerSink: Send + Sync {
    /// Forward one entry to the host logging system.
    async fn log(&self, entry: LogEntry) -> Result<()>;

    /// Flush any buffered entries.
    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Minimum level this sink accepts.
    fn min_level(&self) -> LogLevel {
        LogLevel::Info
    }
}

/// Stdout sink for development builds and tests.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    pub min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
        }
    }
}

#[async_trait::async_trait]
impl LoggerSink for ConsoleLogger {
    async fn log(&self, entry: LogEntry) -> Result<()> {
        if entry.level < self.min_level {
            return Ok(());
        }

        let mut line = format!(
            "{} {:<5} {} {}",
            entry.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            entry.level.label(),
            entry.target,
            entry.message
        );
        if !entry.fields.is_empty() {
            line.push_str(&format!(" {:?}", entry.fields));
        }
        if let Some(span_id) = &entry.span_id {
            line.push_str(&format!(" span={}", span_id));
        }
        println!("{line}");
        Ok(())
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FrozenClock(DateTime<Utc>);

    impl Clock for FrozenClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        assert!(clock.timestamp_millis() > 0);
    }

    #[test]
    fn test_frozen_clock_reports_fixed_instant() {
        let instant = DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let clock = FrozenClock(instant);

        assert_eq!(clock.now(), instant);
        assert_eq!(clock.timestamp_millis(), instant.timestamp_millis());
    }

    #[test]
    fn test_log_entry_builder() {
        let stamped = DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let entry = LogEntry::new(LogLevel::Info, "core_session", "Session restored")
            .with_timestamp(stamped)
            .with_field("email", "a***@[REDACTED]")
            .with_span_id("restore");

        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.timestamp, stamped);
        assert_eq!(entry.target, "core_session");
        assert_eq!(entry.message, "Session restored");
        assert_eq!(entry.fields.get("email"), Some(&"a***@[REDACTED]".to_string()));
        assert_eq!(entry.span_id, Some("restore".to_string()));
    }

    #[tokio::test]
    async fn test_console_logger_accepts_entry() {
        let logger = ConsoleLogger::default();
        let entry = LogEntry::new(LogLevel::Info, "core_runtime", "Core initialized");

        logger.log(entry).await.unwrap();
    }

    #[test]
    fn test_levels_order_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Warn.label(), "WARN");
    }
}
