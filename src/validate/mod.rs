//! Validation module for agentmd.
//!
//! This module turns agent files into line-addressable diagnostics:
//! - Structural checks on the raw text (front matter fences, duplicate sections)
//! - Schema checks on the parsed config (required fields, temperature, sections)
//! - Template syntax checks on the prompts
//! - Output schema compilation

pub mod discovery;
pub mod pipeline;
pub mod structure;
pub mod types;


pub use discovery::{DEFAULT_AGENT_GLOB, discover_agent_files};
pub use pipeline::{AgentValidator, ValidationResults};
pub use structure::check_structure;
pub use types::{ErrorType, Severity, ValidationError};
