// src/config/validate.rs

use tracing::warn;

use crate::config::model::{ConfigFile, ExecutionConfig, RawConfigFile};
use crate::errors::{GaugeExecError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::GaugeExecError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let execution = ExecutionConfig::from(raw.execution);
        validate_execution(&execution)?;
        Ok(ConfigFile::new_unchecked(execution))
    }
}

/// Check that a (possibly merged) config can be turned into a usable argv.
///
/// Nothing here rewrites values: the command builder stays a pure function
/// of whatever passes validation.
pub fn validate_execution(cfg: &ExecutionConfig) -> Result<()> {
    validate_specs_dir(cfg)?;
    validate_tokens(cfg)?;
    warn_on_ignored_nodes(cfg);
    Ok(())
}

fn validate_specs_dir(cfg: &ExecutionConfig) -> Result<()> {
    if let Some(dir) = &cfg.specs_dir {
        if dir.as_os_str().is_empty() {
            return Err(GaugeExecError::ConfigError(
                "specs_dir must not be empty (omit it to let gauge pick its default)".to_string(),
            ));
        }
    }
    Ok(())
}

// Interior NUL bytes cannot be passed to exec(2).
fn validate_tokens(cfg: &ExecutionConfig) -> Result<()> {
    if let Some(tags) = &cfg.tags {
        if tags.contains('\0') {
            return Err(GaugeExecError::ConfigError(
                "tags must not contain NUL bytes".to_string(),
            ));
        }
    }

    for (idx, flag) in cfg.flags.iter().enumerate() {
        if flag.contains('\0') {
            return Err(GaugeExecError::ConfigError(format!(
                "flags[{idx}] ({flag:?}) must not contain NUL bytes"
            )));
        }
    }
    Ok(())
}

fn warn_on_ignored_nodes(cfg: &ExecutionConfig) {
    if cfg.nodes != 0 && !cfg.parallel_enabled() {
        warn!(
            nodes = cfg.nodes,
            "nodes is ignored unless in_parallel is enabled"
        );
    }
}
