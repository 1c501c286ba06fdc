//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the agentmd tool.
///
/// This struct represents the contents of `agentmd.yaml`. Every key is
/// optional. Unknown keys are kept in `extra` so a newer file still loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Discovery
    // =========================================================================
    /// Directory holding agent files, relative to the working directory.
    #[serde(default = "default_agents_dir")]
    pub agents_dir: String,

    /// Globs selecting agent files during directory validation.
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,

    // =========================================================================
    // Loading and rendering
    // =========================================================================
    /// Directories searched by `{% include %}`, in order.
    #[serde(default = "default_template_dirs")]
    pub template_dirs: Vec<String>,

    /// Maximum number of parsed agent configs kept in memory.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    // =========================================================================
    // Output
    // =========================================================================
    /// Report format used by `validate` when `--format` is not given.
    #[serde(default = "default_output_format")]
    pub default_format: String,

    /// Diagnostic logging to stderr.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agents_dir: default_agents_dir(),
            include_globs: default_include_globs(),
            template_dirs: default_template_dirs(),
            cache_capacity: default_cache_capacity(),
            default_format: default_output_format(),
            logging: LoggingConfig::default(),
            extra: BTreeMap::new(),
        }
    }
}
