// src/goal.rs

//! The build-step entry point: build the gauge command, run it, and report
//! failure in the form the host build tool expects.

use tracing::{debug, info};

use crate::command::{GaugeCommand, build_command};
use crate::config::ExecutionConfig;
use crate::errors::BuildStepFailure;
use crate::exec::ProcessExecutor;

/// Goal which executes the gauge specs of a project.
pub struct ExecuteGoal<E> {
    config: ExecutionConfig,
    executor: E,
}

impl<E: ProcessExecutor> ExecuteGoal<E> {
    pub fn new(config: ExecutionConfig, executor: E) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The command `execute` would run, without running it.
    pub fn dry_run(&self) -> GaugeCommand {
        build_command(&self.config)
    }

    /// Run gauge once.
    ///
    /// Any execution failure is re-raised as a [`BuildStepFailure`] whose
    /// message starts with `"Failed to execute gauge specs. "` and whose
    /// source is the original failure.
    pub async fn execute(&self) -> Result<(), BuildStepFailure> {
        if self.config.skip {
            info!("gauge execution skipped");
            return Ok(());
        }

        let command = build_command(&self.config);
        debug!(command = %command, "built gauge command");

        self.executor.run(&command).await?;

        info!("gauge specs passed");
        Ok(())
    }
}
