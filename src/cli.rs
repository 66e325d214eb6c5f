// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every execution option can also come from the environment, mirroring the
//! property-based defaults build tools usually offer.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ExecutionOverrides;

/// Comma-separated extra flags, used when no `--flag` is given.
pub const FLAGS_ENV: &str = "GAUGE_EXEC_ADDITIONAL_FLAGS";

/// Command-line arguments for `gauge-exec`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gauge-exec",
    version,
    about = "Run gauge specs as a build step.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `GaugeExec.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Gauge specs directory.
    #[arg(long, value_name = "PATH", env = "GAUGE_SPECS_DIRECTORY")]
    pub specs_dir: Option<PathBuf>,

    /// Tags to execute, e.g. "tag1 & tag2 & !tag3".
    #[arg(long, value_name = "EXPR", env = "GAUGE_EXEC_TAGS")]
    pub tags: Option<String>,

    /// Execute specs in parallel.
    #[arg(
        long,
        value_name = "BOOL",
        env = "GAUGE_EXEC_IN_PARALLEL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub in_parallel: Option<bool>,

    /// Number of parallel execution nodes. Only used with --in-parallel;
    /// 0 lets gauge decide. Must not be negative.
    #[arg(long, value_name = "N", env = "GAUGE_EXEC_NODES")]
    pub nodes: Option<u32>,

    /// Additional flag for gauge (repeatable, or comma-separated).
    #[arg(
        long = "flag",
        value_name = "FLAG",
        allow_hyphen_values = true,
        env = FLAGS_ENV,
        value_delimiter = ','
    )]
    pub flags: Vec<String>,

    /// Skip gauge execution entirely.
    #[arg(
        long,
        value_name = "BOOL",
        env = "GAUGE_EXEC_SKIP",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub skip: Option<bool>,

    /// Print the gauge command, but don't execute it.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GAUGE_EXEC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Extra flags after `--`, appended after any --flag values.
    #[arg(last = true, value_name = "FLAGS")]
    pub passthrough: Vec<String>,
}

impl CliArgs {
    /// Execution overrides taken from the command line and the environment.
    pub fn overrides(&self) -> ExecutionOverrides {
        let flags = self
            .flags
            .iter()
            // Empty entries only come from stray commas in a delimited list.
            .filter(|f| !f.is_empty())
            .chain(self.passthrough.iter())
            .cloned()
            .collect();

        ExecutionOverrides {
            specs_dir: self.specs_dir.clone(),
            tags: self.tags.clone(),
            in_parallel: self.in_parallel,
            nodes: self.nodes,
            flags,
            skip: self.skip,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
