//! Agent documents (`*.agent.md`).
//!
//! An agent is a markdown file with YAML front matter and labelled fenced
//! sections:
//!
//! ````markdown
//! ---
//! name: Patrick
//! description: Summarizes pull requests
//! model: anthropic/claude-sonnet
//! temperature: 0.3
//! ---
//!
//! <!-- System Prompt -->
//! ```jinja2
//! You are {{ agent_name }}.
//! ```
//!
//! <!-- User Prompt -->
//! ```jinja2
//! {{ query }}
//! ```
//!
//! <!-- Output Schema -->
//! ```yaml
//! Output:
//!   summary: string
//! ```
//! ````
//!
//! - **Front matter**: typed into [`AgentMetadata`]; unknown keys are kept
//! - **Sections**: extracted by label; later duplicates overwrite earlier ones
//! - **Config**: [`AgentConfig`] with defaulting accessors and `validate()`
//! - **Cache**: [`ConfigCache`], an explicit bounded cache keyed by canonical path

mod cache;
mod config;
pub mod frontmatter;
mod metadata;
pub mod sections;

#[cfg(test)]
mod tests;

pub use cache::{ConfigCache, DEFAULT_CACHE_CAPACITY};
pub use config::AgentConfig;
pub use metadata::{
    AgentMetadata, DEFAULT_DESCRIPTION, DEFAULT_NAME, DEFAULT_TEMPERATURE, MetaText, Temperature,
};
pub use sections::Section;

/// File suffix that marks an agent document.
pub const AGENT_FILE_SUFFIX: &str = ".agent.md";
