// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exec;
pub mod goal;
pub mod logging;

use anyhow::Result;
use tracing::{debug, warn};

use crate::cli::CliArgs;
use crate::exec::{InterruptHandle, RealProcessExecutor, interrupt_channel};
use crate::goal::ExecuteGoal;

pub use crate::command::{GaugeCommand, build_command};
pub use crate::config::ExecutionConfig;
pub use crate::errors::{BuildStepFailure, ExecutionFailure};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + environment + command line)
/// - the execute goal and its process executor
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config = config::resolve(args.config.as_deref(), args.overrides())?;

    let (interrupt, interrupt_rx) = interrupt_channel();
    let executor = RealProcessExecutor::new().with_interrupt(interrupt_rx);
    let goal = ExecuteGoal::new(config, executor);

    if args.dry_run {
        print_dry_run(&goal);
        return Ok(());
    }

    listen_for_ctrl_c(interrupt);

    goal.execute().await?;
    Ok(())
}

/// Ctrl-C → interrupt the running gauge process.
fn listen_for_ctrl_c(interrupt: InterruptHandle) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            return;
        }
        interrupt.interrupt();
    });
}

fn print_dry_run(goal: &ExecuteGoal<RealProcessExecutor>) {
    let cfg = goal.config();

    println!("gauge-exec dry-run");
    if cfg.skip {
        println!("  skip = true (gauge would not be run)");
    }
    println!("  command: {}", goal.dry_run());

    debug!(?cfg, "dry-run complete (no execution)");
}
