//! Implementation of the `agentmd explain` command.
//!
//! Prints the configuration of one agent: metadata, a system prompt preview
//! and the fields of its output schema.

use super::{agents_dir, resolve_agent, truncate};
use crate::agent::AgentConfig;
use crate::cli::ExplainArgs;
use crate::config::Config;
use crate::error::Result;
use crate::schema::FieldSpec;
use serde_yaml::Value as YamlValue;

const PURPOSE_WIDTH: usize = 60;
const PROMPT_PREVIEW_WIDTH: usize = 200;

/// Execute the `agentmd explain` command.
pub fn cmd_explain(args: ExplainArgs, config: &Config) -> Result<()> {
    let dir = agents_dir(args.dir, config);
    let path = resolve_agent(&dir, &args.agent)?;
    let cache = config.config_cache();
    let agent = cache.get_or_load(&path)?;
    println!("{}", explain_agent(&agent));
    Ok(())
}

/// Multi-line description of `agent`.
pub(crate) fn explain_agent(agent: &AgentConfig) -> String {
    let mut lines = vec![
        format!("Agent: {}", agent.name()),
        String::new(),
        agent.description().to_string(),
        String::new(),
        "Configuration:".to_string(),
    ];

    let model = agent.model().unwrap_or("(not set)");
    lines.push(format!("  Model:        {}", model));
    lines.push(format!("  Temperature:  {}", agent.temperature()));
    lines.push(format!("  Version:      v{}", agent.latest_version()));

    if let Some(purpose) = agent.metadata.get("purpose").map(yaml_display)
        && !purpose.is_empty()
    {
        lines.push(format!("  Purpose:      {}", truncate(&purpose, PURPOSE_WIDTH)));
    }
    if let Some(capabilities) = agent.metadata.get("capabilities").map(yaml_display)
        && !capabilities.is_empty()
    {
        lines.push(format!("  Capabilities: {}", capabilities));
    }

    if !agent.system_prompt.is_empty() {
        lines.push(String::new());
        lines.push("System Prompt (preview):".to_string());
        let preview = truncate(&agent.system_prompt, PROMPT_PREVIEW_WIDTH);
        lines.extend(preview.lines().map(|line| format!("  {}", line)));
    }

    if !agent.output_schema_source.trim().is_empty() {
        lines.push(String::new());
        lines.push("Output Schema:".to_string());
        match agent.output_type() {
            Ok(output) => {
                for construct in output.constructs() {
                    lines.push(format!("  {}", construct.name));
                    lines.extend(construct.fields.iter().map(field_line));
                }
            }
            Err(e) => lines.push(format!("  invalid: {}", e)),
        }
    }

    lines.join("\n")
}

/// `    confidence: number? = 0.5  # how sure`
fn field_line(field: &FieldSpec) -> String {
    let mut line = format!("    {}: {}", field.name, field.kind);
    if !field.required {
        line.push('?');
    }
    if let Some(default) = &field.default {
        line.push_str(&format!(" = {}", default));
    }
    if let Some(description) = &field.description {
        line.push_str(&format!("  # {}", description));
    }
    line
}

/// Plain rendering of a front matter value; sequences are comma-joined.
fn yaml_display(value: &YamlValue) -> String {
    match value {
        YamlValue::Null => String::new(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::String(s) => s.clone(),
        YamlValue::Sequence(items) => items
            .iter()
            .map(yaml_display)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
