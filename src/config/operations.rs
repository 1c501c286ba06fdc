//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::{CONFIG_FILE_NAME, LOG_LEVELS, OUTPUT_FORMATS};
use crate::agent::ConfigCache;
use crate::error::{AgentError, Result};
use crate::report::OutputFormat;
use crate::template::TemplateLoader;
use globset::Glob;
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are kept in `extra`.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(AgentError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            AgentError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "loaded tool config");
        Ok(config)
    }

    /// Load `agentmd.yaml` from `dir`, falling back to defaults when the file
    /// does not exist.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| AgentError::ConfigError(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            AgentError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `agents_dir` must be non-empty
    /// - `include_globs` must be non-empty and every entry a valid glob
    /// - `cache_capacity` must be positive
    /// - `default_format` must be one of human, json, github
    /// - `logging.level` and every `logging.modules` level must be a known level
    pub fn validate(&self) -> Result<()> {
        if self.agents_dir.trim().is_empty() {
            return Err(AgentError::ConfigError(
                "config validation failed: agents_dir must not be empty".to_string(),
            ));
        }

        if self.include_globs.is_empty() {
            return Err(AgentError::ConfigError(
                "config validation failed: include_globs must list at least one pattern"
                    .to_string(),
            ));
        }
        for pattern in &self.include_globs {
            Glob::new(pattern).map_err(|e| {
                AgentError::ConfigError(format!(
                    "config validation failed: invalid include_globs entry '{}': {}",
                    pattern, e
                ))
            })?;
        }

        if self.cache_capacity == 0 {
            return Err(AgentError::ConfigError(
                "config validation failed: cache_capacity must be greater than 0".to_string(),
            ));
        }

        if !OUTPUT_FORMATS.contains(&self.default_format.as_str()) {
            return Err(AgentError::ConfigError(format!(
                "config validation failed: default_format must be one of {} (found '{}')",
                OUTPUT_FORMATS.join(", "),
                self.default_format
            )));
        }

        check_level("logging.level", &self.logging.level)?;
        for (module, level) in &self.logging.modules {
            check_level(&format!("logging.modules.{}", module), level)?;
        }

        Ok(())
    }

    /// Agents directory resolved against `base`.
    pub fn agents_path(&self, base: &Path) -> PathBuf {
        base.join(&self.agents_dir)
    }

    /// Report format used when the command line does not choose one.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::parse(&self.default_format)
    }

    /// A config cache sized by `cache_capacity`.
    pub fn config_cache(&self) -> ConfigCache {
        ConfigCache::with_capacity(self.cache_capacity)
    }

    /// Include loader over `template_dirs`, resolved against `base`.
    pub fn template_loader(&self, base: &Path) -> TemplateLoader {
        TemplateLoader::new(self.template_dirs.iter().map(|dir| base.join(dir)))
    }
}

fn check_level(key: &str, level: &str) -> Result<()> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(AgentError::ConfigError(format!(
            "config validation failed: {} must be one of {} (found '{}')",
            key,
            LOG_LEVELS.join(", "),
            level
        )))
    }
}
