// src/logging.rs

//! Logging setup for `gauge-exec` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` CLI flag (a plain level for everything)
//! 2. `GAUGE_EXEC_LOG`, in `EnvFilter` syntax, e.g.
//!    `debug,gauge_exec::exec::relay=warn` to quiet the relays
//! 3. `info`
//!
//! Logs go to STDERR; stdout carries only gauge's own output.

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "GAUGE_EXEC_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let (filter, rejected) = build_filter(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("initialising logging: {e}"))?;

    if let Some(err) = rejected {
        warn!(value = ?env_value, error = %err, "ignoring invalid {LOG_ENV}; using `{DEFAULT_DIRECTIVE}`");
    }

    Ok(())
}

/// Pick the filter for the given CLI level and `GAUGE_EXEC_LOG` value.
///
/// An unparsable environment value falls back to `info`; the parse error is
/// returned so it can be reported once logging is up.
pub fn build_filter(
    cli_level: Option<LogLevel>,
    env_value: Option<&str>,
) -> (EnvFilter, Option<String>) {
    if let Some(lvl) = cli_level {
        return (EnvFilter::new(directive_for(lvl)), None);
    }

    match env_value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(e) => (EnvFilter::new(DEFAULT_DIRECTIVE), Some(e.to_string())),
        },
        None => (EnvFilter::new(DEFAULT_DIRECTIVE), None),
    }
}

fn directive_for(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
