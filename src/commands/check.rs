//! Implementation of the `agentmd check` command.
//!
//! Pre-commit hook mode: validates the files passed on the command line and
//! reports the ones with diagnostics on stderr. Only error-severity
//! diagnostics fail the hook.

use crate::agent::AGENT_FILE_SUFFIX;
use crate::cli::CheckArgs;
use crate::config::Config;
use super::validate::fail_on_errors;
use crate::error::Result;
use crate::report::{OutputFormat, format_validation_results};
use crate::validate::{AgentValidator, ValidationResults};
use std::path::PathBuf;

/// Execute the `agentmd check` command.
pub fn cmd_check(args: CheckArgs, config: &Config) -> Result<()> {
    let results = check_files(&args.files, config);
    if results.is_empty() {
        return Ok(());
    }

    eprintln!("{}", format_validation_results(&results, OutputFormat::Human));
    fail_on_errors(&results)
}

/// Validate the `*.agent.md` entries of `files`.
///
/// Only files with at least one diagnostic (warnings included) appear in
/// the result.
pub(crate) fn check_files(files: &[PathBuf], config: &Config) -> ValidationResults {
    let cache = config.config_cache();
    let validator = AgentValidator::new(&cache);

    let agent_files: Vec<&PathBuf> = files
        .iter()
        .filter(|file| file.to_string_lossy().ends_with(AGENT_FILE_SUFFIX))
        .collect();
    tracing::debug!(
        given = files.len(),
        checked = agent_files.len(),
        "pre-commit check"
    );

    agent_files
        .into_iter()
        .filter_map(|file| {
            let errors = validator.validate_file(file);
            (!errors.is_empty()).then(|| (file.display().to_string(), errors))
        })
        .collect()
}
