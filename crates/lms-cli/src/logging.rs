//! Tracing subscriber setup

use lms_core::LogLevel;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Install the global subscriber.
///
/// `--verbose` forces debug output. Otherwise `RUST_LOG` wins when set,
/// falling back to the configured `log_level`. Logs go to stderr so that
/// command output on stdout stays clean.
pub fn init(level: LogLevel, verbose: bool) -> Result<()> {
    let filter_layer = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.as_filter()))
            .map_err(|e| CliError::user(format!("invalid log filter: {e}")))?
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::user(format!("failed to initialize logging: {e}")))
}
