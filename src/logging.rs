//! Process-wide logging setup.
//!
//! Mirrors log records to the console (verbosity from `LOG_LEVEL` or
//! `RUST_LOG`) and to one dated, append-only file per day under the
//! configured log directory. Call/timing tracing on the agent entry
//! points is done with `#[tracing::instrument]` at the call sites.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Returns a guard that must be held for the lifetime of the process;
/// dropping it stops the background file writer and loses buffered lines.
pub fn init(log_level: &str, log_dir: &Path) -> WorkerGuard {
    // RUST_LOG takes precedence over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gemini_agent={},tower_http=info", log_level)));

    let file_appender = tracing_appender::rolling::daily(log_dir, "gemini_agent.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    guard
}
