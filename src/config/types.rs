//! Configuration types and defaults for agentmd.
//!
//! This module defines enums, constants, and default value functions
//! used by the Config struct.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File name of the optional tool configuration, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "agentmd.yaml";

/// Level names accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Output format names accepted by `default_format`.
pub const OUTPUT_FORMATS: &[&str] = &["human", "json", "github"];

/// Encoding of log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable single-line events (default).
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse a log format from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// The `logging:` block of `agentmd.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for log lines.
    #[serde(default)]
    pub format: LogFormat,

    /// Per-module level overrides (`agentmd::validate: debug`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            modules: BTreeMap::new(),
        }
    }
}

// Default value functions for serde
pub(crate) fn default_agents_dir() -> String {
    "ai/agents".to_string()
}
pub(crate) fn default_include_globs() -> Vec<String> {
    vec!["**/*.agent.md".to_string()]
}
pub(crate) fn default_template_dirs() -> Vec<String> {
    vec!["ai/agents".to_string(), "ai/agents/shared".to_string()]
}
pub(crate) fn default_cache_capacity() -> usize {
    crate::agent::DEFAULT_CACHE_CAPACITY
}
pub(crate) fn default_output_format() -> String {
    "human".to_string()
}
pub(crate) fn default_log_level() -> String {
    "warn".to_string()
}
