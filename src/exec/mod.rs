// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs a [`GaugeCommand`](crate::command::GaugeCommand) with
//! `tokio::process::Command` and turns the outcome into an
//! [`ExecutionFailure`](crate::errors::ExecutionFailure) when it goes wrong.
//!
//! - [`process`] spawns the child, races its exit against interruption and
//!   cleans up afterwards.
//! - `relay` copies the child's stdout/stderr to ours while it runs.
//! - [`interrupt`] is the cancellation signal the host can fire (Ctrl-C).
//! - [`backend`] provides the `ProcessExecutor` trait and the production
//!   `RealProcessExecutor`; tests swap in a fake.

pub mod backend;
pub mod interrupt;
pub mod process;
pub(crate) mod relay;

pub use backend::{OutputMode, ProcessExecutor, RealProcessExecutor};
pub use interrupt::{InterruptHandle, interrupt_channel};
pub use process::{OutputSinks, RELAY_DRAIN_TIMEOUT, run_process};
