// src/exec/backend.rs

//! Pluggable process executor.
//!
//! The goal talks to a `ProcessExecutor` instead of spawning processes
//! itself, so tests can swap in a fake that records commands and returns a
//! scripted outcome.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::watch;

use crate::command::GaugeCommand;
use crate::errors::ExecutionFailure;

use super::process::{OutputSinks, run_process};

/// Trait abstracting how a gauge command is executed.
pub trait ProcessExecutor: Send + Sync {
    /// Run `command` to completion.
    fn run<'a>(
        &'a self,
        command: &'a GaugeCommand,
    ) -> Pin<Box<dyn Future<Output = Result<(), ExecutionFailure>> + Send + 'a>>;
}

/// Where `RealProcessExecutor` sends the child's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Relay to our own stdout/stderr (default).
    #[default]
    Inherit,
    /// Drain and drop.
    Discard,
}

/// Production executor backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct RealProcessExecutor {
    interrupt: Option<watch::Receiver<bool>>,
    output: OutputMode,
}

impl RealProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the child and fail with `Interrupted` when `rx` turns `true`.
    pub fn with_interrupt(mut self, rx: watch::Receiver<bool>) -> Self {
        self.interrupt = Some(rx);
        self
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    fn sinks(&self) -> OutputSinks {
        match self.output {
            OutputMode::Inherit => OutputSinks::inherit(),
            OutputMode::Discard => OutputSinks::discard(),
        }
    }
}

impl ProcessExecutor for RealProcessExecutor {
    fn run<'a>(
        &'a self,
        command: &'a GaugeCommand,
    ) -> Pin<Box<dyn Future<Output = Result<(), ExecutionFailure>> + Send + 'a>> {
        let sinks = self.sinks();
        // Each run gets its own receiver so concurrent runs don't share state.
        let interrupt = self.interrupt.clone();

        Box::pin(async move { run_process(command, sinks, interrupt).await })
    }
}
