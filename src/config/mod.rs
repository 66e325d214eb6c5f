// src/config/mod.rs

//! Configuration for a gauge invocation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the resolved `ExecutionConfig` (`model.rs`).
//! - Load an optional `GaugeExec.toml` from disk and merge overrides (`loader.rs`).
//! - Validate basic invariants such as usable argv tokens (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, resolve};
pub use model::{ConfigFile, ExecutionConfig, ExecutionOverrides, RawConfigFile, RawExecutionSection};
pub use validate::validate_execution;
