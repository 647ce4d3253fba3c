//! # Logging Setup
//!
//! One `tracing`/`tracing-subscriber` stack for the whole core: a format
//! layer (pretty, JSON, or compact), an `EnvFilter` that keeps our crates at
//! the configured level and HTTP internals at `warn`, and an optional
//! [`LoggerSink`] layer that mirrors every surviving event into the host's
//! own pipeline.
//!
//! Secrets never reach the subscriber. Call sites pass tokens, passwords,
//! and emails through [`redact_if_sensitive`] and file URIs through
//! [`strip_path`] before attaching them as fields.
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//! use bridge_traits::time::LogLevel;
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_level(LogLevel::Debug);
//! init_logging(config)?;
//!
//! tracing::info!(base_url = "https://adamix.net/medioambiente", "Core initialized");
//! ```

use crate::error::{Error, Result};
use bridge_traits::time::{Clock, LogEntry, LogLevel, LoggerSink, SystemClock};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    filter::EnvFilter,
    fmt::format::FmtSpan,
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
    Layer,
};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable output for development
    Pretty,
    /// One JSON object per event, fields flattened
    Json,
    /// Single-line human-readable output
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration, applied once at startup through [`init_logging`].
#[derive(Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Level applied to our own crates; dependencies stay at `warn`
    pub level: LogLevel,
    /// Attach the redaction layer
    pub redact_pii: bool,
    /// Full `EnvFilter` directive string, overriding the derived one
    /// (e.g. `"core_session=debug,provider_ambiente=trace"`)
    pub filter: Option<String>,
    /// Mirror surviving events into a host pipeline
    pub logger_sink: Option<Arc<dyn LoggerSink>>,
    /// Time source used to stamp forwarded entries
    pub clock: Arc<dyn Clock>,
    /// Record span enter/exit events
    pub enable_spans: bool,
    pub display_target: bool,
    pub display_thread_info: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::Info,
            redact_pii: true,
            filter: None,
            logger_sink: None,
            clock: Arc::new(SystemClock),
            enable_spans: true,
            display_target: true,
            display_thread_info: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_pii_redaction(mut self, redact: bool) -> Self {
        self.redact_pii = redact;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_logger_sink(mut self, sink: Arc<dyn LoggerSink>) -> Self {
        self.logger_sink = Some(sink);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_spans(mut self, enable: bool) -> Self {
        self.enable_spans = enable;
        self
    }

    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }

    pub fn with_thread_info(mut self, display: bool) -> Self {
        self.display_thread_info = display;
        self
    }
}

/// Installs the global tracing subscriber.
///
/// Call once during application startup. A second call fails because the
/// global subscriber is already set.
///
/// # Errors
///
/// `Error::Config` when the filter string does not parse or a subscriber is
/// already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;

    let fmt_layer = match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(config.display_target)
            .with_thread_ids(config.display_thread_info)
            .with_thread_names(config.display_thread_info)
            .with_span_events(if config.enable_spans {
                FmtSpan::ACTIVE
            } else {
                FmtSpan::NONE
            })
            .with_writer(io::stdout)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(config.enable_spans)
            .with_span_list(config.enable_spans)
            .with_target(config.display_target)
            .with_thread_ids(config.display_thread_info)
            .with_thread_names(config.display_thread_info)
            .with_writer(io::stdout)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(config.display_target)
            .with_thread_ids(config.display_thread_info)
            .with_thread_names(config.display_thread_info)
            .with_writer(io::stdout)
            .boxed(),
    };

    let sink_layer = LoggerSinkLayer::new(config.logger_sink.clone(), Arc::clone(&config.clock));
    let redaction_layer = config.redact_pii.then_some(PiiRedactionLayer);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(sink_layer)
        .with(redaction_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let base_level = match config.level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    };

    // Own crates follow the configured level; HTTP internals stay quiet.
    let filter_string = match &config.filter {
        Some(custom) => custom.clone(),
        None => format!(
            "{}={},core_runtime={},core_session={},core_report={},core_service={},\
             provider_ambiente={},bridge_desktop={},h2=warn,hyper=warn,reqwest=warn",
            env!("CARGO_PKG_NAME"),
            base_level,
            base_level,
            base_level,
            base_level,
            base_level,
            base_level,
            base_level
        ),
    };

    EnvFilter::try_new(filter_string)
        .map_err(|e| Error::Config(format!("Invalid log filter: {}", e)))
}

/// Marker layer attached when `redact_pii` is on.
///
/// Redaction itself happens at call sites through [`redact_if_sensitive`]
/// and [`strip_path`]; events arrive here with sensitive fields already
/// scrubbed. The layer is the attachment point for enforcing that centrally.
struct PiiRedactionLayer;

impl<S> Layer<S> for PiiRedactionLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {}
}

/// Mirrors filtered events into the configured [`LoggerSink`].
struct LoggerSinkLayer {
    sink: Option<Arc<dyn LoggerSink>>,
    clock: Arc<dyn Clock>,
}

impl LoggerSinkLayer {
    fn new(sink: Option<Arc<dyn LoggerSink>>, clock: Arc<dyn Clock>) -> Self {
        Self { sink, clock }
    }
}

impl<S> Layer<S> for LoggerSinkLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        let metadata = event.metadata();
        let level = tracing_level_to_log_level(*metadata.level());

        if level < sink.min_level() {
            return;
        }

        let mut visitor = SinkVisitor::default();
        event.record(&mut visitor);

        let message = visitor
            .message
            .unwrap_or_else(|| metadata.name().to_string());

        let mut entry = LogEntry::new(level, metadata.target(), message)
            .with_timestamp(self.clock.now());

        for (key, value) in visitor.fields {
            entry = entry.with_field(key, value);
        }

        if let Some(span) = ctx.lookup_current() {
            entry.span_id = Some(span.name().to_string());
        }

        let sink = Arc::clone(sink);

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = sink.log(entry).await {
                        eprintln!("LoggerSink error: {}", err);
                    }
                });
            }
            Err(_) => {
                // No ambient runtime; deliver on a throwaway current-thread one.
                match tokio::runtime::Builder::new_current_thread().build() {
                    Ok(runtime) => {
                        if let Err(err) = runtime.block_on(sink.log(entry)) {
                            eprintln!("LoggerSink error: {}", err);
                        }
                    }
                    Err(err) => eprintln!("LoggerSink runtime error: {}", err),
                }
            }
        }
    }
}

/// Collects the event message and every recorded field as strings.
#[derive(Default)]
struct SinkVisitor {
    message: Option<String>,
    fields: HashMap<String, String>,
}

impl SinkVisitor {
    fn record_value(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for SinkVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.record_value(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, format!("{:?}", value));
    }
}

fn tracing_level_to_log_level(level: tracing::Level) -> LogLevel {
    match level {
        tracing::Level::TRACE => LogLevel::Trace,
        tracing::Level::DEBUG => LogLevel::Debug,
        tracing::Level::INFO => LogLevel::Info,
        tracing::Level::WARN => LogLevel::Warn,
        tracing::Level::ERROR => LogLevel::Error,
    }
}

/// Redacts a field value before it is attached to a log event.
///
/// Field names containing a credential-ish word redact fully; email-shaped
/// values keep their first character. Everything else passes through.
///
/// ```ignore
/// use tracing::info;
/// use core_runtime::logging::redact_if_sensitive;
///
/// info!(email = %redact_if_sensitive("email", "ana@example.com"), "Signing in");
/// // Logs: email="a***@[REDACTED]"
/// ```
pub fn redact_if_sensitive(field_name: &str, value: &str) -> String {
    const SENSITIVE_FIELDS: &[&str] = &[
        "token",
        "auth_token",
        "password",
        "secret",
        "api_key",
        "authorization",
        "bearer",
    ];

    let name = field_name.to_lowercase();
    if SENSITIVE_FIELDS.iter().any(|field| name.contains(field)) {
        return "[REDACTED]".to_string();
    }

    if value.contains('@') && value.contains('.') {
        let first = match value.chars().next() {
            Some(c) if c != '@' => c.to_string(),
            _ => String::new(),
        };
        return format!("{}***@[REDACTED]", first);
    }

    value.to_string()
}

/// Reduces a file path or URI to its final segment.
///
/// Photo URIs reveal device storage layout; logs only need the file name.
///
/// ```ignore
/// use core_runtime::logging::strip_path;
///
/// assert_eq!(strip_path("/storage/emulated/0/DCIM/report.jpg"), "report.jpg");
/// ```
pub fn strip_path(path: &str) -> &str {
    path.rsplit('/')
        .next()
        .unwrap_or(path)
        .rsplit('\\')
        .next()
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as SinkResult;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_config_builder_covers_every_knob() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Json)
            .with_level(LogLevel::Debug)
            .with_pii_redaction(false)
            .with_filter("core_session=trace")
            .with_clock(Arc::new(SystemClock))
            .with_spans(false)
            .with_target(false)
            .with_thread_info(true);

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, LogLevel::Debug);
        assert!(!config.redact_pii);
        assert_eq!(config.filter, Some("core_session=trace".to_string()));
        assert!(!config.enable_spans);
        assert!(!config.display_target);
        assert!(config.display_thread_info);
    }

    #[test]
    fn test_redaction_by_field_name() {
        assert_eq!(redact_if_sensitive("auth_token", "secret123"), "[REDACTED]");
        assert_eq!(redact_if_sensitive("token", "abc"), "[REDACTED]");
        assert_eq!(redact_if_sensitive("password", "pass"), "[REDACTED]");
        assert_eq!(redact_if_sensitive("Authorization", "Bearer x"), "[REDACTED]");
    }

    #[test]
    fn test_redaction_of_email_shaped_values() {
        assert_eq!(
            redact_if_sensitive("email", "user@example.com"),
            "u***@[REDACTED]"
        );
        // Multibyte first characters survive intact.
        assert_eq!(
            redact_if_sensitive("email", "ñandu@example.do"),
            "ñ***@[REDACTED]"
        );
        assert_eq!(redact_if_sensitive("email", "@example.com"), "***@[REDACTED]");
    }

    #[test]
    fn test_plain_values_pass_through() {
        assert_eq!(redact_if_sensitive("report_id", "12345"), "12345");
        assert_eq!(
            redact_if_sensitive("name", "Parque Nacional"),
            "Parque Nacional"
        );
    }

    #[test]
    fn test_strip_path_keeps_final_segment() {
        assert_eq!(
            strip_path("/storage/emulated/0/DCIM/report.jpg"),
            "report.jpg"
        );
        assert_eq!(strip_path("C:\\Users\\Ana\\Pictures\\report.jpg"), "report.jpg");
        assert_eq!(strip_path("report.jpg"), "report.jpg");
        assert_eq!(strip_path("/var/log/"), "");
    }

    #[test]
    fn test_default_format_follows_build_profile() {
        #[cfg(debug_assertions)]
        assert_eq!(LogFormat::default(), LogFormat::Pretty);

        #[cfg(not(debug_assertions))]
        assert_eq!(LogFormat::default(), LogFormat::Json);
    }

    #[test]
    fn test_derived_filter_carries_configured_level() {
        let config = LoggingConfig::default().with_level(LogLevel::Debug);
        let filter = build_filter(&config).unwrap();
        assert!(filter.to_string().contains("debug"));
        assert!(filter.to_string().contains("hyper=warn"));
    }

    #[test]
    fn test_custom_filter_wins_over_derived_one() {
        let config = LoggingConfig::default().with_filter("core_session=trace,core_report=debug");
        let filter = build_filter(&config).unwrap();
        assert!(filter.to_string().contains("core_session=trace"));
    }

    #[test]
    fn test_logger_sink_layer_forwards_event() {
        let sink = Arc::new(TestLoggerSink::default());
        let trait_sink: Arc<dyn LoggerSink> = sink.clone();
        let layer = LoggerSinkLayer::new(Some(trait_sink), Arc::new(SystemClock));
        let subscriber = tracing_subscriber::registry().with(layer);
        let _guard = tracing::subscriber::set_default(subscriber);

        tracing::info!(target: "test.target", user = "alice", "hello world");

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.target, "test.target");
        assert_eq!(entry.message, "hello world");
        assert_eq!(entry.fields.get("user"), Some(&"alice".to_string()));
    }

    #[test]
    fn test_logger_sink_layer_stamps_entries_with_clock() {
        let instant = chrono::DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);

        struct FrozenClock(chrono::DateTime<chrono::Utc>);
        impl Clock for FrozenClock {
            fn now(&self) -> chrono::DateTime<chrono::Utc> {
                self.0
            }
        }

        let sink = Arc::new(TestLoggerSink::default());
        let trait_sink: Arc<dyn LoggerSink> = sink.clone();
        let layer = LoggerSinkLayer::new(Some(trait_sink), Arc::new(FrozenClock(instant)));
        let subscriber = tracing_subscriber::registry().with(layer);
        let _guard = tracing::subscriber::set_default(subscriber);

        tracing::info!(target: "test.clock", "stamped");

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries[0].timestamp, instant);
    }

    #[test]
    fn test_sink_respects_min_level() {
        let sink = Arc::new(TestLoggerSink {
            entries: Mutex::new(Vec::new()),
            min_level: LogLevel::Warn,
        });
        let trait_sink: Arc<dyn LoggerSink> = sink.clone();
        let layer = LoggerSinkLayer::new(Some(trait_sink), Arc::new(SystemClock));
        let subscriber = tracing_subscriber::registry().with(layer);
        let _guard = tracing::subscriber::set_default(subscriber);

        tracing::info!(target: "test.level", "dropped");
        tracing::warn!(target: "test.level", "kept");

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "kept");
    }

    struct TestLoggerSink {
        entries: Mutex<Vec<LogEntry>>,
        min_level: LogLevel,
    }

    impl Default for TestLoggerSink {
        fn default() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                min_level: LogLevel::Trace,
            }
        }
    }

    #[async_trait]
    impl LoggerSink for TestLoggerSink {
        async fn log(&self, entry: LogEntry) -> SinkResult<()> {
            let mut entries = self.entries.lock().unwrap();
            entries.push(entry);
            Ok(())
        }

        fn min_level(&self) -> LogLevel {
            self.min_level
        }
    }
}
