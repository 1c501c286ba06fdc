//! Error types for agentmd.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Document-level problems found during validation are never raised through
//! this type; the validator turns them into diagnostics instead.

use crate::exit_codes;
use crate::schema::OutputSchemaError;
use crate::template::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for agentmd operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The referenced agent configuration file does not exist.
    #[error("agent config not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The front matter could not be decoded.
    #[error("failed to parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// `model` was accessed on an agent that does not configure one.
    #[error("agent '{agent}' missing required 'model' field")]
    MissingModel { agent: String },

    /// The embedded output schema could not be turned into an output type.
    #[error(transparent)]
    OutputSchema(#[from] OutputSchemaError),

    /// A prompt template failed to parse or render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Filesystem failure outside of a single document (e.g. directory discovery).
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// User provided invalid arguments or referenced something that does not exist.
    #[error("{0}")]
    UserError(String),

    /// The tool configuration (`agentmd.yaml`) is invalid.
    #[error("config error: {0}")]
    ConfigError(String),

    /// Validation reported error-severity diagnostics.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl AgentError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AgentError::ValidationFailed(_) => exit_codes::VALIDATION_FAILURE,
            AgentError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            AgentError::NotFound(_)
            | AgentError::Parse { .. }
            | AgentError::MissingModel { .. }
            | AgentError::OutputSchema(_)
            | AgentError::Template(_)
            | AgentError::Io { .. }
            | AgentError::UserError(_) => exit_codes::USER_ERROR,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AgentError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for agentmd operations.
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failed_has_correct_exit_code() {
        let err = AgentError::ValidationFailed("2 error(s)".to_string());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn not_found_is_user_error() {
        let err = AgentError::NotFound(PathBuf::from("ai/agents/missing.agent.md"));
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(
            err.to_string(),
            "agent config not found: ai/agents/missing.agent.md"
        );
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = AgentError::ConfigError("cache_capacity must be greater than 0".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = AgentError::MissingModel {
            agent: "Patrick".to_string(),
        };
        assert_eq!(err.to_string(), "agent 'Patrick' missing required 'model' field");

        let err = AgentError::Parse {
            path: PathBuf::from("x.agent.md"),
            message: "missing closing '---' front matter delimiter".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse 'x.agent.md': missing closing '---' front matter delimiter"
        );
    }

    #[test]
    fn output_schema_error_is_transparent() {
        let err: AgentError = OutputSchemaError::NoSchema {
            agent: "Patrick".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "No output schema defined for Patrick");
    }
}
