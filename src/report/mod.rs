//! Rendering of validation results.
//!
//! Three formats are supported:
//!
//! - `human`: per-file blocks with icons and a summary
//! - `json`: `{ path: [{line_number, message, error_type, severity}] }`
//! - `github`: workflow commands (`::error file=...,line=...::message`)


use crate::validate::{Severity, ValidationResults};
use std::fmt;

/// Output format for validation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Github,
}

impl OutputFormat {
    /// Parse a format name. Unknown names fall back to [`OutputFormat::Human`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "github" => OutputFormat::Github,
            "human" => OutputFormat::Human,
            other => {
                tracing::debug!(format = other, "unknown output format, using human");
                OutputFormat::Human
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
            OutputFormat::Github => "github",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render `results` in the requested format.
pub fn format_validation_results(
    results: &ValidationResults,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Json => format_json(results),
        OutputFormat::Github => format_github(results),
        OutputFormat::Human => format_human(results),
    }
}

/// Number of error-severity diagnostics across all files.
pub fn error_count(results: &ValidationResults) -> usize {
    results
        .values()
        .flatten()
        .filter(|error| error.is_error())
        .count()
}

/// Number of warning-severity diagnostics across all files.
pub fn warning_count(results: &ValidationResults) -> usize {
    results
        .values()
        .flatten()
        .filter(|error| !error.is_error())
        .count()
}

fn format_json(results: &ValidationResults) -> String {
    // Plain data with string keys; serialization cannot fail.
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "{}".to_string())
}

fn format_github(results: &ValidationResults) -> String {
    let mut lines = Vec::new();
    for (path, errors) in results {
        for error in errors {
            let line = error
                .line_number
                .map(|n| format!(",line={}", n))
                .unwrap_or_default();
            lines.push(format!(
                "::{} file={}{}::{}",
                error.severity, path, line, error.message
            ));
        }
    }
    lines.join("\n")
}

fn format_human(results: &ValidationResults) -> String {
    let mut lines = Vec::new();

    for (path, errors) in results {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        if errors.is_empty() {
            lines.push(format!("✅ {}: Valid", path));
            continue;
        }
        lines.push(format!("📄 {}:", path));
        for error in errors {
            let icon = match error.severity {
                Severity::Error => "❌",
                Severity::Warning => "⚠️",
            };
            lines.push(format!("  {} {}", icon, error));
        }
    }

    let total = results.len();
    let valid = results.values().filter(|errors| errors.is_empty()).count();
    let errors = error_count(results);
    let warnings = warning_count(results);

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push("📊 Summary:".to_string());
    lines.push(format!("  Files: {}/{} valid", valid, total));
    if errors > 0 {
        lines.push(format!("  Errors: {}", errors));
    }
    if warnings > 0 {
        lines.push(format!("  Warnings: {}", warnings));
    }

    lines.join("\n")
}
