//! Implementation of the `agentmd render` command.
//!
//! Renders an agent's system and user prompts with a context built from
//! `--query` and `--context`.

use super::{agents_dir, resolve_agent};
use crate::agent::AgentConfig;
use crate::cli::RenderArgs;
use crate::config::Config;
use crate::error::{AgentError, Result};
use crate::template::TemplateLoader;
use serde_json::{Map, Value};
use std::path::Path;

/// Execute the `agentmd render` command.
pub fn cmd_render(args: RenderArgs, config: &Config) -> Result<()> {
    let dir = agents_dir(args.dir, config);
    let path = resolve_agent(&dir, &args.agent)?;
    let cache = config.config_cache();
    let agent = cache.get_or_load(&path)?;

    let context = build_context(args.query.as_deref(), args.context.as_deref())?;
    let loader = loader_for(&agent, config);
    println!("{}", render_prompts(&agent, &context, &loader)?);
    Ok(())
}

/// Parse `--context` (a JSON object) and bind `query` on top of it.
pub(crate) fn build_context(query: Option<&str>, context: Option<&str>) -> Result<Map<String, Value>> {
    let mut map = match context {
        None => Map::new(),
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(AgentError::UserError(format!(
                    "invalid JSON context: expected an object, got {}",
                    json_kind(&other)
                )));
            }
            Err(e) => {
                return Err(AgentError::UserError(format!("invalid JSON context: {}", e)));
            }
        },
    };

    if let Some(query) = query {
        map.insert("query".to_string(), Value::String(query.to_string()));
    }
    Ok(map)
}

/// Includes resolve next to the agent file first, then in `template_dirs`.
fn loader_for(agent: &AgentConfig, config: &Config) -> TemplateLoader {
    let configured = config.template_loader(Path::new("."));
    let parent = agent.path.parent().map(Path::to_path_buf);
    TemplateLoader::new(
        parent
            .into_iter()
            .chain(configured.search_dirs().iter().cloned()),
    )
}

/// Both prompts under headings.
pub(crate) fn render_prompts(
    agent: &AgentConfig,
    context: &Map<String, Value>,
    loader: &TemplateLoader,
) -> Result<String> {
    let system = agent.render_system_prompt(context, loader)?;
    let user = agent.render_user_prompt(context, loader)?;
    Ok(format!(
        "=== System Prompt ===\n{}\n\n=== User Prompt ===\n{}",
        system, user
    ))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
