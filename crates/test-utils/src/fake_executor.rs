use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use gauge_exec::command::GaugeCommand;
use gauge_exec::errors::{ExecutionFailure, Interruption};
use gauge_exec::exec::ProcessExecutor;

/// Outcome the fake reports for every run.
#[derive(Debug, Clone, Copy)]
pub enum FakeOutcome {
    Success,
    ExitCode(i32),
    SpawnNotFound,
    Interrupted,
}

/// A fake executor that:
/// - records every command it was asked to run
/// - returns the configured outcome without spawning anything.
#[derive(Clone)]
pub struct FakeExecutor {
    outcome: FakeOutcome,
    executed: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeExecutor {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            executed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(FakeOutcome::Success)
    }

    /// Commands run so far, as token lists.
    pub fn executed(&self) -> Vec<Vec<String>> {
        self.executed.lock().unwrap().clone()
    }
}

impl ProcessExecutor for FakeExecutor {
    fn run<'a>(
        &'a self,
        command: &'a GaugeCommand,
    ) -> Pin<Box<dyn Future<Output = Result<(), ExecutionFailure>> + Send + 'a>> {
        let executed = Arc::clone(&self.executed);
        let outcome = self.outcome;

        Box::pin(async move {
            {
                let mut guard = executed.lock().unwrap();
                guard.push(command.tokens().to_vec());
            }

            let program = command.program().to_string();
            match outcome {
                FakeOutcome::Success => Ok(()),
                FakeOutcome::ExitCode(code) => Err(ExecutionFailure::NonZeroExit {
                    program,
                    code: Some(code),
                }),
                FakeOutcome::SpawnNotFound => Err(ExecutionFailure::Spawn {
                    program,
                    source: io::Error::new(io::ErrorKind::NotFound, "program not found"),
                }),
                FakeOutcome::Interrupted => Err(ExecutionFailure::Interrupted {
                    program,
                    source: Interruption::Cancelled,
                }),
            }
        })
    }
}
