//! Logging configuration for the sandbox.
//!
//! Logs go to stdout. Set `DEBUG_LOGGING=1` to enable debug output for the
//! spotwatch crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEBUG_DIRECTIVE: &str = "info,spotwatch=debug,spotwatch_core=debug,spotwatch_overlay=debug";

/// Initialize stdout logging.
///
/// `RUST_LOG` takes precedence over the built-in directives when set.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(debug_logging)));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(filter)
        .init();

    tracing::info!(debug_logging, "spotwatch logging initialized");
}

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging { DEBUG_DIRECTIVE } else { "info" }
}
