//! Diagnostic records produced by validation.

use serde::Serialize;
use std::fmt;

/// Which validation layer produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Front matter delimiters, duplicate sections, unreadable files.
    Structural,
    /// Required fields, temperature, prompt sections, output schema.
    Schema,
    /// Prompt template parse failures.
    TemplateSyntax,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Structural => "structural",
            ErrorType::Schema => "schema",
            ErrorType::TemplateSyntax => "template_syntax",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One diagnostic for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// 1-based line, when the problem can be pinned to one.
    pub line_number: Option<usize>,
    pub message: String,
    pub error_type: ErrorType,
    pub severity: Severity,
}

impl ValidationError {
    pub fn error(error_type: ErrorType, line_number: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            line_number,
            message: message.into(),
            error_type,
            severity: Severity::Error,
        }
    }

    pub fn warning(
        error_type: ErrorType,
        line_number: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            message: message.into(),
            error_type,
            severity: Severity::Warning,
        }
    }

    pub fn structural(line_number: Option<usize>, message: impl Into<String>) -> Self {
        Self::error(ErrorType::Structural, line_number, message)
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::error(ErrorType::Schema, None, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// `[SCHEMA] Line 3: message`, with the line part omitted when unknown.
impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.error_type.as_str().to_uppercase())?;
        if let Some(line) = self.line_number {
            write!(f, "Line {}: ", line)?;
        }
        write!(f, "{}", self.message)
    }
}
