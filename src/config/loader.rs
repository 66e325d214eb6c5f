// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, ExecutionConfig, ExecutionOverrides, RawConfigFile};
use crate::config::validate::validate_execution;
use crate::errors::{GaugeExecError, Result};

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// validation and path resolution.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// A relative `specs_dir` is rebased onto the directory containing the file,
/// so the config means the same thing regardless of the caller's cwd.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let mut raw_config = load_from_path(path)?;

    if let Some(dir) = raw_config.execution.specs_dir.take() {
        raw_config.execution.specs_dir = Some(rebase(dir, path));
    }

    ConfigFile::try_from(raw_config)
}

/// Default config location: `GaugeExec.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("GaugeExec.toml")
}

/// Produce the final `ExecutionConfig` for one invocation.
///
/// - An explicit `config_path` must exist.
/// - Without one, [`default_config_path`] is used only if it exists.
/// - `overrides` (command line / environment) win over the file.
pub fn resolve(config_path: Option<&Path>, overrides: ExecutionOverrides) -> Result<ExecutionConfig> {
    let base = match config_path {
        Some(path) => {
            if !path.is_file() {
                return Err(GaugeExecError::ConfigError(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "loading config file");
            load_and_validate(path)?.into_execution()
        }
        None => {
            let default_path = default_config_path();
            if default_path.is_file() {
                debug!(path = %default_path.display(), "loading default config file");
                load_and_validate(&default_path)?.into_execution()
            } else {
                debug!("no config file; using defaults");
                ExecutionConfig::default()
            }
        }
    };

    let merged = base.with_overrides(overrides);
    validate_execution(&merged)?;
    Ok(merged)
}

fn rebase(dir: PathBuf, config_path: &Path) -> PathBuf {
    if dir.is_absolute() || dir.as_os_str().is_empty() {
        return dir;
    }
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(dir),
        _ => dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebase_keeps_absolute_paths() {
        let dir = PathBuf::from("/abs/specs");
        assert_eq!(rebase(dir.clone(), Path::new("conf/GaugeExec.toml")), dir);
    }

    #[test]
    fn rebase_joins_relative_paths_onto_config_dir() {
        assert_eq!(
            rebase(PathBuf::from("specs"), Path::new("conf/GaugeExec.toml")),
            PathBuf::from("conf/specs")
        );
    }

    #[test]
    fn rebase_bare_file_name_leaves_path_alone() {
        assert_eq!(
            rebase(PathBuf::from("specs"), Path::new("GaugeExec.toml")),
            PathBuf::from("specs")
        );
    }
}
