//! Walks a simulated app session through the logging stack.
//!
//! ```bash
//! cargo run --example logging_demo                  # pretty (debug default)
//! cargo run --example logging_demo -- json
//! cargo run --example logging_demo -- compact
//! cargo run --example logging_demo -- pretty "core_runtime=trace"
//! ```

use bridge_traits::time::LogLevel;
use core_runtime::logging::{
    init_logging, redact_if_sensitive, strip_path, LogFormat, LoggingConfig,
};
use std::env;
use tracing::{debug, info, instrument, span, trace, warn, Level};

fn config_from_args() -> LoggingConfig {
    let format = match env::args().nth(1).as_deref() {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        Some(_) => LogFormat::Pretty,
        None => LogFormat::default(),
    };

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace)
        .with_pii_redaction(true)
        .with_spans(true)
        .with_target(true);

    if let Some(filter) = env::args().nth(2) {
        config = config.with_filter(filter);
    }

    config
}

#[tokio::main]
async fn main() {
    let config = config_from_args();
    init_logging(config).expect("Failed to initialize logging");

    info!("Simulating one app session against the ministry API");

    sign_in("ana@example.com").await;
    refresh_catalog().await;
    submit_report().await;

    info!("Session simulation complete");
}

/// Login flow. Credentials and tokens never reach the log stream in the
/// clear; the redaction helpers run at the call site.
async fn sign_in(email: &str) {
    let span = span!(Level::INFO, "sign_in");
    let _enter = span.enter();

    info!(
        email = %redact_if_sensitive("email", email),
        "Submitting credentials"
    );

    let issued_token = "tok-9f8e7d6c";
    debug!(
        token = %redact_if_sensitive("auth_token", issued_token),
        "Session established"
    );

    info!("Signed in");
}

/// Catalog refresh across two endpoints, with the per-request span nesting
/// the service layer produces.
async fn refresh_catalog() {
    let span = span!(Level::INFO, "refresh_catalog");
    let _enter = span.enter();

    for endpoint in ["/reportes", "/normativas"] {
        let request_span = span!(Level::DEBUG, "api_request", endpoint);
        let _request = request_span.enter();

        debug!(status = 200, "Response received");

        let (accepted, skipped) = (48, 2);
        if skipped > 0 {
            warn!(accepted, skipped, "Some records were dropped during normalization");
        } else {
            debug!(accepted, "All records normalized");
        }
    }

    info!(reports = 48, regulations = 12, "Catalog refreshed");
}

#[instrument]
async fn submit_report() {
    info!(title = "Vertedero improvisado", "Validating draft");

    let photo = "/storage/emulated/0/DCIM/denuncia-2024.jpg";
    attach_photo(photo).await;

    info!(tracking_code = "RPT-1083", "Report accepted by the ministry");
}

#[instrument(skip(path), fields(file = %strip_path(path)))]
async fn attach_photo(path: &str) {
    trace!("Encoding photo for submission");
    tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
    debug!(encoded_bytes = 183_204, "Photo attached");
}
