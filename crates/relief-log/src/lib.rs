//! Process-wide logging for the terrain tools.
//!
//! Console output goes through the `tracing` ecosystem with timestamps,
//! module targets and severity levels; an optional plain-text log file
//! mirrors the run for later inspection. Verbosity is driven by the
//! caller's full-report flag and can always be overridden with RUST_LOG.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for a generator run.
///
/// Console logging is always on; `log_file` adds a plain-text copy of
/// the run at the given path. `full_report` lowers the default filter
/// to `debug` so parameter banners and per-stage output are included.
/// The RUST_LOG environment variable overrides either default.
pub fn init_logging(log_file: Option<&Path>, full_report: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_env_filter(full_report));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(path) = log_file
        && let Ok(file) = std::fs::File::create(path)
    {
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime());
        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The default filter for a run: `info` normally, `debug` when a full
/// report was requested.
pub fn default_env_filter(full_report: bool) -> EnvFilter {
    if full_report {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}
