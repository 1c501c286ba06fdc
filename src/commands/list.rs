//! Implementation of the `agentmd list` command.
//!
//! Lists the agents directly inside the agents directory (not recursive).

use super::{agents_dir, require_dir, truncate};
use crate::agent::{AGENT_FILE_SUFFIX, AgentConfig, ConfigCache};
use crate::cli::ListArgs;
use crate::config::Config;
use crate::error::{AgentError, Result};
use std::path::{Path, PathBuf};

const DESCRIPTION_WIDTH: usize = 60;
const ERROR_WIDTH: usize = 40;

/// Execute the `agentmd list` command.
pub fn cmd_list(args: ListArgs, config: &Config) -> Result<()> {
    let dir = agents_dir(args.dir, config);
    let cache = config.config_cache();
    println!("{}", list_agents(&dir, &cache)?);
    Ok(())
}

/// One row per agent file. Files that fail to load are listed with the
/// error in place of the description.
pub(crate) fn list_agents(dir: &Path, cache: &ConfigCache) -> Result<String> {
    require_dir(dir)?;
    let files = agent_files(dir)?;
    if files.is_empty() {
        return Ok(format!("No agents found in {}", dir.display()));
    }

    let mut lines = vec![format!(
        "{:<20} {:<25} {:<8} {}",
        "NAME", "MODEL", "VERSION", "DESCRIPTION"
    )];

    for file in &files {
        let row = cache
            .get_or_load(file)
            .and_then(|agent| agent_row(&agent));
        match row {
            Ok(row) => lines.push(row),
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "failed to load agent");
                lines.push(format!(
                    "{:<20} {:<25} {:<8} Error: {}",
                    agent_stem(file),
                    "N/A",
                    "N/A",
                    truncate(&e.to_string(), ERROR_WIDTH)
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!("{} agent(s)", files.len()));
    Ok(lines.join("\n"))
}

fn agent_row(agent: &AgentConfig) -> Result<String> {
    Ok(format!(
        "{:<20} {:<25} {:<8} {}",
        agent.name(),
        agent.model()?,
        format!("v{}", agent.latest_version()),
        truncate(agent.description(), DESCRIPTION_WIDTH)
    ))
}

fn agent_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| AgentError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| AgentError::io(dir, e))?.path();
        let is_agent = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(AGENT_FILE_SUFFIX));
        if is_agent && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// `patrick` for `ai/agents/patrick.agent.md`.
fn agent_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_suffix(AGENT_FILE_SUFFIX)
        .map(str::to_string)
        .unwrap_or(name)
}
