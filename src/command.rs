// src/command.rs

//! Translate an [`ExecutionConfig`] into the gauge command line.
//!
//! Token order is fixed:
//!
//! ```text
//! gauge [--tags <expr>] [--parallel [-n <count>]] [<flag> ...] [<specs dir>]
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ExecutionConfig;

pub const GAUGE: &str = "gauge";
pub const TAGS_FLAG: &str = "--tags";
pub const PARALLEL_FLAG: &str = "--parallel";
pub const NODES_FLAG: &str = "-n";

/// An ordered argv: the first token is the program, the rest are arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaugeCommand {
    tokens: Vec<String>,
}

impl GaugeCommand {
    /// Build a command from raw tokens.
    ///
    /// Returns `None` for an empty token list since there would be no program
    /// to run.
    pub fn from_tokens<I, S>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

/// Shell-like rendering for logs and `--dry-run`. The process itself always
/// receives the raw tokens.
impl fmt::Display for GaugeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if needs_quoting(token) {
                write!(f, "'{}'", token.replace('\'', r"'\''"))?;
            } else {
                f.write_str(token)?;
            }
        }
        Ok(())
    }
}

fn needs_quoting(token: &str) -> bool {
    token.is_empty()
        || token.chars().any(|c| {
            c.is_whitespace()
                || matches!(
                    c,
                    '\'' | '"' | '&' | '|' | '!' | '$' | ';' | '(' | ')' | '<' | '>' | '*' | '?' | '`'
                        | '\\'
                )
        })
}

/// Build the gauge command for `config`.
///
/// Pure and infallible: absent options are simply left out.
pub fn build_command(config: &ExecutionConfig) -> GaugeCommand {
    let mut tokens = vec![GAUGE.to_string()];
    add_tags(&mut tokens, config);
    add_parallel_flags(&mut tokens, config);
    add_additional_flags(&mut tokens, config);
    add_specs_dir(&mut tokens, config);
    GaugeCommand { tokens }
}

fn add_tags(tokens: &mut Vec<String>, config: &ExecutionConfig) {
    if let Some(tags) = config.effective_tags() {
        tokens.push(TAGS_FLAG.to_string());
        tokens.push(tags.to_string());
    }
}

fn add_parallel_flags(tokens: &mut Vec<String>, config: &ExecutionConfig) {
    if !config.parallel_enabled() {
        return;
    }
    tokens.push(PARALLEL_FLAG.to_string());
    if config.nodes != 0 {
        tokens.push(NODES_FLAG.to_string());
        tokens.push(config.nodes.to_string());
    }
}

fn add_additional_flags(tokens: &mut Vec<String>, config: &ExecutionConfig) {
    tokens.extend(config.flags.iter().cloned());
}

fn add_specs_dir(tokens: &mut Vec<String>, config: &ExecutionConfig) {
    if let Some(dir) = &config.specs_dir {
        tokens.push(absolute_path(dir).to_string_lossy().into_owned());
    }
}

/// Join a relative path onto the current directory without touching the
/// filesystem (no symlink resolution, no `..` folding).
fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
