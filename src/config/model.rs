// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Configuration file as read from TOML, before validation.
///
/// ```toml
/// [execution]
/// specs_dir = "specs"
/// tags = "smoke & !wip"
/// in_parallel = true
/// nodes = 4
/// flags = ["--verbose"]
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub execution: RawExecutionSection,
}

/// `[execution]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawExecutionSection {
    /// Directory holding the specs. Relative paths are resolved against the
    /// directory containing the config file.
    #[serde(default)]
    pub specs_dir: Option<PathBuf>,

    /// Tag expression, e.g. `tag1 & tag2 & !tag3`.
    #[serde(default)]
    pub tags: Option<String>,

    #[serde(default)]
    pub in_parallel: Option<bool>,

    /// Number of parallel nodes; only used with `in_parallel = true`.
    #[serde(default)]
    pub nodes: Option<u32>,

    /// Extra flags passed to gauge verbatim.
    #[serde(default)]
    pub flags: Vec<String>,

    #[serde(default)]
    pub skip: Option<bool>,
}

/// Validated configuration file.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    execution: ExecutionConfig,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(execution: ExecutionConfig) -> Self {
        Self { execution }
    }

    pub fn into_execution(self) -> ExecutionConfig {
        self.execution
    }
}

/// Everything needed to build one gauge command line.
///
/// Read once per invocation and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionConfig {
    pub specs_dir: Option<PathBuf>,
    pub tags: Option<String>,
    pub in_parallel: Option<bool>,
    /// Parallel node count. Unsigned: a negative count is rejected when the
    /// config is read instead of being forwarded to gauge.
    pub nodes: u32,
    pub flags: Vec<String>,
    /// Skip the goal entirely.
    pub skip: bool,
}

impl ExecutionConfig {
    /// True only when parallel execution was explicitly enabled.
    pub fn parallel_enabled(&self) -> bool {
        self.in_parallel.unwrap_or(false)
    }

    /// The tag expression, if it is non-blank.
    pub fn effective_tags(&self) -> Option<&str> {
        self.tags.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Apply command-line / environment overrides on top of this config.
    ///
    /// Scalars are replaced when set; extra flags are appended after the
    /// ones already configured.
    pub fn with_overrides(mut self, overrides: ExecutionOverrides) -> Self {
        if let Some(dir) = overrides.specs_dir {
            self.specs_dir = Some(dir);
        }
        if let Some(tags) = overrides.tags {
            self.tags = Some(tags);
        }
        if let Some(in_parallel) = overrides.in_parallel {
            self.in_parallel = Some(in_parallel);
        }
        if let Some(nodes) = overrides.nodes {
            self.nodes = nodes;
        }
        if let Some(skip) = overrides.skip {
            self.skip = skip;
        }
        self.flags.extend(overrides.flags);
        self
    }
}

impl From<RawExecutionSection> for ExecutionConfig {
    fn from(raw: RawExecutionSection) -> Self {
        Self {
            specs_dir: raw.specs_dir,
            tags: raw.tags,
            in_parallel: raw.in_parallel,
            nodes: raw.nodes.unwrap_or(0),
            flags: raw.flags,
            skip: raw.skip.unwrap_or(false),
        }
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ExecutionOverrides {
    pub specs_dir: Option<PathBuf>,
    pub tags: Option<String>,
    pub in_parallel: Option<bool>,
    pub nodes: Option<u32>,
    pub flags: Vec<String>,
    pub skip: Option<bool>,
}
