#![allow(dead_code)]

use std::path::PathBuf;

use gauge_exec::config::ExecutionConfig;

/// Builder for `ExecutionConfig` to simplify test setup.
#[derive(Default)]
pub struct ExecutionConfigBuilder {
    config: ExecutionConfig,
}

impl ExecutionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn specs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.specs_dir = Some(dir.into());
        self
    }

    pub fn tags(mut self, tags: &str) -> Self {
        self.config.tags = Some(tags.to_string());
        self
    }

    pub fn in_parallel(mut self, val: bool) -> Self {
        self.config.in_parallel = Some(val);
        self
    }

    pub fn nodes(mut self, nodes: u32) -> Self {
        self.config.nodes = nodes;
        self
    }

    pub fn flag(mut self, flag: &str) -> Self {
        self.config.flags.push(flag.to_string());
        self
    }

    pub fn skip(mut self, val: bool) -> Self {
        self.config.skip = val;
        self
    }

    pub fn build(self) -> ExecutionConfig {
        self.config
    }
}
