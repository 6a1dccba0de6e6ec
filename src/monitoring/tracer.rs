/*!
 * Structured Tracing
 * Subscriber setup and scan spans using the tracing crate
 *
 * Output goes to stderr so listings on stdout stay machine-readable.
 */

use tracing::{span, Level, Span};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Initialize structured tracing
///
/// `RUST_LOG` overrides `default_filter`. With `json` set, events are emitted as
/// JSON lines with span context. Calling this twice is harmless: the second
/// subscriber is rejected and the first stays installed.
pub fn init_tracing(default_filter: &str, json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(json, "Structured tracing initialized");
    }
}

/// Generate a unique ID for correlating the events of one scan
pub fn generate_scan_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one snapshot collection
pub fn scan_span(capacity: usize) -> Span {
    span!(
        Level::DEBUG,
        "scan",
        scan_id = %generate_scan_id(),
        capacity = capacity,
    )
}
