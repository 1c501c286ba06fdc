//! Implementation of the `agentmd validate` command.
//!
//! Validates a single agent or every agent under the agents directory and
//! prints the report in the requested format.

use super::{agents_dir, require_dir, resolve_agent};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{AgentError, Result};
use crate::report::{OutputFormat, error_count, format_validation_results};
use crate::validate::{AgentValidator, ValidationResults};
use std::path::Path;

/// Execute the `agentmd validate` command.
pub fn cmd_validate(args: ValidateArgs, config: &Config) -> Result<()> {
    let format = args
        .format
        .as_deref()
        .map(OutputFormat::parse)
        .unwrap_or_else(|| config.output_format());
    let dir = agents_dir(args.dir, config);

    let results = collect_results(args.agent.as_deref(), &dir, config)?;
    println!("{}", format_validation_results(&results, format));

    fail_on_errors(&results)
}

/// Run validation for one agent (when given) or the whole directory.
pub(crate) fn collect_results(
    agent: Option<&str>,
    dir: &Path,
    config: &Config,
) -> Result<ValidationResults> {
    let cache = config.config_cache();
    let validator = AgentValidator::new(&cache).with_patterns(config.include_globs.clone());

    match agent {
        Some(agent) => {
            let path = resolve_agent(dir, agent)?;
            let mut results = ValidationResults::new();
            results.insert(path.display().to_string(), validator.validate_file(&path));
            Ok(results)
        }
        None => {
            require_dir(dir)?;
            validator.validate_directory(dir)
        }
    }
}

/// `ValidationFailed` when any error-severity diagnostic was reported.
/// Warnings alone pass.
pub(crate) fn fail_on_errors(results: &ValidationResults) -> Result<()> {
    let errors = error_count(results);
    if errors == 0 {
        return Ok(());
    }

    let files = results
        .values()
        .filter(|diagnostics| diagnostics.iter().any(|d| d.is_error()))
        .count();
    Err(AgentError::ValidationFailed(format!(
        "{} error(s) in {} file(s)",
        errors, files
    )))
}
