// src/errors.rs

//! Crate-wide error types.
//!
//! - [`ExecutionFailure`] is what the process executor reports.
//! - [`BuildStepFailure`] is the single wrapper the goal raises to its host.
//! - [`GaugeExecError`] covers config loading and orchestration.

use thiserror::Error;

/// Prefix of every build-step failure message.
pub const FAILURE_PREFIX: &str = "Failed to execute gauge specs. ";

/// Why waiting for the child was cut short.
#[derive(Error, Debug)]
pub enum Interruption {
    /// The host asked us to stop (e.g. Ctrl-C).
    #[error("cancellation requested by the host")]
    Cancelled,

    /// The OS-level wait itself failed.
    #[error("waiting for the process failed")]
    Wait(#[from] std::io::Error),
}

/// Failure of a single gauge invocation.
#[derive(Error, Debug)]
pub enum ExecutionFailure {
    /// The child could not be started (missing binary, permissions, ...).
    #[error("could not start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The child ran and reported failure. `code` is `None` when it was
    /// terminated by a signal.
    #[error("`{program}` exited with {}", describe_exit(.code))]
    NonZeroExit { program: String, code: Option<i32> },

    /// Waiting for the child was interrupted; the child has been killed.
    #[error("interrupted while waiting for `{program}`")]
    Interrupted {
        program: String,
        #[source]
        source: Interruption,
    },
}

impl ExecutionFailure {
    /// Exit code reported by the child, if it got that far.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecutionFailure::NonZeroExit { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Failure surfaced to the host build tool.
///
/// The message is [`FAILURE_PREFIX`] followed by the underlying failure, and
/// `source()` returns that failure so the whole cause chain is preserved.
#[derive(Error, Debug)]
#[error("{FAILURE_PREFIX}{source}")]
pub struct BuildStepFailure {
    #[from]
    source: ExecutionFailure,
}

impl BuildStepFailure {
    pub fn failure(&self) -> &ExecutionFailure {
        &self.source
    }
}

#[derive(Error, Debug)]
pub enum GaugeExecError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    BuildStep(#[from] BuildStepFailure),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, GaugeExecError>;
