//! Validation pipeline for agent files.
//!
//! Each file goes through an existence check and a parse, either of which
//! stops validation with a single structural diagnostic. A parsed file then
//! runs four independent passes whose diagnostics are concatenated:
//!
//! 1. Structural: front matter fences and duplicate sections (raw text)
//! 2. Schema: `AgentConfig::validate()`
//! 3. Template syntax: prompt templates, with section-relative lines
//! 4. Output schema: only when the agent declares one

use super::discovery::{DEFAULT_AGENT_GLOB, discover_agent_files, relative_path};
use super::structure::check_structure;
use super::types::{ErrorType, ValidationError};
use crate::agent::{AgentConfig, ConfigCache};
use crate::error::{AgentError, Result};
use crate::template::check_syntax;
use std::collections::BTreeMap;
use std::path::Path;

/// Diagnostics per file, keyed by root-relative path.
pub type ValidationResults = BTreeMap<String, Vec<ValidationError>>;

/// Runs the validation passes over agent files.
pub struct AgentValidator<'a> {
    cache: &'a ConfigCache,
    patterns: Vec<String>,
}

impl<'a> AgentValidator<'a> {
    pub fn new(cache: &'a ConfigCache) -> Self {
        Self {
            cache,
            patterns: vec![DEFAULT_AGENT_GLOB.to_string()],
        }
    }

    /// Use different include globs for [`validate_directory`](Self::validate_directory).
    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Validate one file. Document problems are returned as diagnostics,
    /// never as errors.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Vec<ValidationError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "validating agent file");

        if !path.exists() {
            return vec![ValidationError::structural(
                None,
                format!("File not found: {}", path.display()),
            )];
        }

        let config = match self.cache.get_or_load(path) {
            Ok(config) => config,
            Err(e) => {
                let cause = match e {
                    AgentError::Parse { message, .. } => message,
                    other => other.to_string(),
                };
                return vec![ValidationError::structural(
                    None,
                    format!("Failed to parse agent file: {}", cause),
                )];
            }
        };

        let mut errors = match std::fs::read_to_string(path) {
            Ok(raw) => check_structure(&raw),
            Err(e) => vec![ValidationError::structural(
                None,
                format!("Error validating YAML structure: {}", e),
            )],
        };
        errors.extend(check_schema(&config));
        errors.extend(check_templates(&config));
        errors.extend(check_output_schema(&config));

        let error_count = errors.iter().filter(|e| e.is_error()).count();
        if error_count > 0 {
            tracing::warn!(
                path = %path.display(),
                errors = error_count,
                "agent file failed validation"
            );
        } else {
            tracing::debug!(path = %path.display(), "agent file passed validation");
        }

        errors
    }

    /// Validate every matching file under `root`.
    ///
    /// Files with no diagnostics are included with an empty list. Failing to
    /// walk the directory is an error.
    pub fn validate_directory(&self, root: impl AsRef<Path>) -> Result<ValidationResults> {
        let root = root.as_ref();
        let files = discover_agent_files(root, &self.patterns)?;

        if files.is_empty() {
            tracing::warn!(root = %root.display(), "no agent files found");
        }

        let results: ValidationResults = files
            .iter()
            .map(|file| (relative_path(root, file), self.validate_file(file)))
            .collect();

        let valid = results.values().filter(|errors| errors.is_empty()).count();
        let total_errors: usize = results.values().map(Vec::len).sum();
        tracing::info!(
            root = %root.display(),
            valid,
            files = results.len(),
            diagnostics = total_errors,
            "validation complete"
        );

        Ok(results)
    }
}

fn check_schema(config: &AgentConfig) -> Vec<ValidationError> {
    config
        .validate()
        .into_iter()
        .map(ValidationError::schema)
        .collect()
}

fn check_templates(config: &AgentConfig) -> Vec<ValidationError> {
    [
        ("System Prompt", &config.system_prompt),
        ("User Prompt", &config.user_prompt),
    ]
    .into_iter()
    .filter(|(_, source)| !source.is_empty())
    .filter_map(|(section, source)| {
        check_syntax(source).err().map(|e| {
            ValidationError::error(
                ErrorType::TemplateSyntax,
                e.line,
                format!("Template syntax error in {}: {}", section, e),
            )
        })
    })
    .collect()
}

fn check_output_schema(config: &AgentConfig) -> Vec<ValidationError> {
    if config.output_schema_source.trim().is_empty() {
        return Vec::new();
    }
    match config.output_type() {
        Ok(_) => Vec::new(),
        Err(e) => vec![ValidationError::schema(format!("Invalid output schema: {}", e))],
    }
}
