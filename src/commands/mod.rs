//! Command implementations for agentmd.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the agent lookup shared by several commands.
//! Each command builds its output as a string and prints it, so the
//! builders can be tested without capturing stdout.

pub mod check;
pub mod explain;
pub mod list;
pub mod render;
pub mod validate;


use crate::agent::AGENT_FILE_SUFFIX;
use crate::cli::Command;
use crate::config::Config;
use crate::error::{AgentError, Result};
use std::path::{Path, PathBuf};

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Validate(args) => validate::cmd_validate(args, config),
        Command::Check(args) => check::cmd_check(args, config),
        Command::List(args) => list::cmd_list(args, config),
        Command::Explain(args) => explain::cmd_explain(args, config),
        Command::Render(args) => render::cmd_render(args, config),
    }
}

/// The agents directory: `--dir` when given, else `agents_dir` from config.
pub(crate) fn agents_dir(dir: Option<PathBuf>, config: &Config) -> PathBuf {
    dir.unwrap_or_else(|| PathBuf::from(&config.agents_dir))
}

/// Resolve an agent argument to a file.
///
/// An existing path ending in `.agent.md` is used as is; anything else is
/// treated as a name and looked up as `<dir>/<name>.agent.md`.
pub(crate) fn resolve_agent(dir: &Path, agent: &str) -> Result<PathBuf> {
    let direct = PathBuf::from(agent);
    if agent.ends_with(AGENT_FILE_SUFFIX) && direct.is_file() {
        return Ok(direct);
    }

    let path = dir.join(format!("{}{}", agent, AGENT_FILE_SUFFIX));
    if path.is_file() {
        return Ok(path);
    }

    Err(AgentError::UserError(format!(
        "agent '{}' not found.\n\n\
         Looked for: {}\n\n\
         Use `agentmd list` to see available agents.",
        agent,
        path.display()
    )))
}

/// Fail with a user error when the agents directory is missing.
pub(crate) fn require_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(AgentError::UserError(format!(
            "agents directory '{}' not found.\n\n\
             Pass --dir or set agents_dir in agentmd.yaml.",
            dir.display()
        )))
    }
}

/// Keep at most `max` characters, appending "..." when something was cut.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
