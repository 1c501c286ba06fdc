//! agentmd: parser and validator for markdown-defined LLM agents.
//!
//! An agent lives in a single `*.agent.md` file: YAML front matter for
//! metadata, Jinja-style prompt templates, and a declarative output schema.
//! This crate loads those files ([`agent`]), renders their prompts
//! ([`template`]), compiles their output schemas ([`schema`]), and reports
//! line-addressable problems ([`validate`], [`report`]).

pub mod agent;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod report;
pub mod schema;
pub mod template;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use agent::{AgentConfig, ConfigCache};
pub use error::{AgentError, Result};
pub use report::{OutputFormat, format_validation_results};
pub use validate::{AgentValidator, ValidationError, ValidationResults};
