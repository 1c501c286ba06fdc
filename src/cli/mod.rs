//! CLI argument parsing for agentmd.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// agentmd: parse, validate and inspect markdown-defined LLM agents.
///
/// An agent is a `*.agent.md` file with YAML front matter and labelled
/// sections:
/// - `<!-- System Prompt -->` and `<!-- User Prompt -->` templates
/// - an optional `<!-- Output Schema -->` describing structured output
#[derive(Parser, Debug)]
#[command(name = "agentmd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log level for diagnostics on stderr (trace, debug, info, warn, error, off).
    ///
    /// Overrides `logging.level` from agentmd.yaml. `AGENTMD_LOG` overrides both.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for agentmd.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one agent or every agent in the agents directory.
    ///
    /// Exits with status 1 when any error-severity diagnostic is reported.
    Validate(ValidateArgs),

    /// Validate the given files (pre-commit hook mode).
    ///
    /// Only `*.agent.md` arguments are checked. Failing files are reported
    /// on stderr.
    Check(CheckArgs),

    /// List the agents in the agents directory.
    List(ListArgs),

    /// Show detailed information about an agent.
    Explain(ExplainArgs),

    /// Render an agent's system and user prompts.
    Render(RenderArgs),
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Agent name (`DIR/<AGENT>.agent.md`) or a path to an agent file.
    /// If omitted, validates every agent under the agents directory.
    pub agent: Option<String>,

    /// Report format: human, json, or github.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Agents directory (defaults to `agents_dir` from agentmd.yaml).
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Files to check; anything not ending in `.agent.md` is ignored.
    pub files: Vec<PathBuf>,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Agents directory (defaults to `agents_dir` from agentmd.yaml).
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for the `explain` command.
#[derive(Parser, Debug)]
pub struct ExplainArgs {
    /// Agent name or path to an agent file.
    pub agent: String,

    /// Agents directory (defaults to `agents_dir` from agentmd.yaml).
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Agent name or path to an agent file.
    pub agent: String,

    /// Value bound to `query` in the prompt context.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Additional context as a JSON object.
    #[arg(short, long)]
    pub context: Option<String>,

    /// Agents directory (defaults to `agents_dir` from agentmd.yaml).
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
