//! The parsed form of an `.agent.md` document.

use super::frontmatter;
use super::metadata::{
    AgentMetadata, DEFAULT_DESCRIPTION, DEFAULT_NAME, DEFAULT_TEMPERATURE, MetaText, yaml_kind,
};
use super::sections::{self, Section};
use crate::error::{AgentError, Result};
use crate::schema::{OutputSchemaError, OutputType};
use crate::template::{self, Template, TemplateLoader};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A loaded agent document.
///
/// Loading only requires readable front matter; use [`AgentConfig::validate`]
/// to find out whether the agent is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// File the document was read from.
    pub path: PathBuf,
    pub metadata: AgentMetadata,
    pub system_prompt: String,
    pub user_prompt: String,
    pub output_schema_source: String,
    /// Extracted but not interpreted.
    pub context_builder_source: String,
    /// All extracted sections, including unknown ones.
    pub sections: BTreeMap<String, Section>,
    /// Markdown body after the front matter.
    pub raw_content: String,
}

impl AgentConfig {
    /// Read and parse an agent file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AgentError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| AgentError::io(path, e))?;
        Self::parse(path, &content)
    }

    /// Parse document text as if it had been read from `path`.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let parse_error = |e: frontmatter::FrontMatterError| AgentError::Parse {
            path: path.clone(),
            message: e.to_string(),
        };

        let split = frontmatter::split(content).map_err(parse_error)?;
        let metadata = match &split.yaml {
            Some(yaml) => frontmatter::parse_metadata(yaml).map_err(parse_error)?,
            None => AgentMetadata::default(),
        };

        let sections = sections::extract_sections(&split.body);
        let section_text = |key: &str| {
            sections
                .get(key)
                .map(|s| s.content.clone())
                .unwrap_or_default()
        };

        let config = Self {
            system_prompt: section_text(sections::SYSTEM_PROMPT),
            user_prompt: section_text(sections::USER_PROMPT),
            output_schema_source: section_text(sections::OUTPUT_SCHEMA),
            context_builder_source: section_text(sections::CONTEXT_BUILDER),
            sections,
            metadata,
            raw_content: split.body,
            path,
        };

        tracing::debug!(
            path = %config.path.display(),
            agent = %config.name(),
            sections = ?config.sections.keys().collect::<Vec<_>>(),
            "loaded agent config"
        );

        Ok(config)
    }

    /// Configured name, or [`DEFAULT_NAME`] when absent or not text.
    ///
    /// An empty `name: ''` is returned as configured; [`validate`](Self::validate)
    /// reports it.
    pub fn name(&self) -> &str {
        text(&self.metadata.name).unwrap_or(DEFAULT_NAME)
    }

    /// Configured description, or [`DEFAULT_DESCRIPTION`] when absent or not
    /// text. Empty is returned as configured, like `name`.
    pub fn description(&self) -> &str {
        text(&self.metadata.description).unwrap_or(DEFAULT_DESCRIPTION)
    }

    /// Configured model. There is no default, and an empty model is missing.
    pub fn model(&self) -> Result<&str> {
        non_empty(&self.metadata.model).ok_or_else(|| AgentError::MissingModel {
            agent: self.name().to_string(),
        })
    }

    /// Configured numeric temperature or [`DEFAULT_TEMPERATURE`].
    pub fn temperature(&self) -> f64 {
        self.metadata
            .temperature
            .as_ref()
            .and_then(|t| t.as_f64())
            .unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn latest_version(&self) -> u32 {
        self.metadata.latest_version()
    }

    /// One-line summary: `Name (v3): description`.
    pub fn explain(&self) -> String {
        let version = self.latest_version();
        let history = if version > 1 {
            format!(" (v{})", version)
        } else {
            String::new()
        };
        format!("{}{}: {}", self.name(), history, self.description())
    }

    /// Problems that make this agent unusable, as plain messages.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("name", &self.metadata.name),
            ("description", &self.metadata.description),
            ("model", &self.metadata.model),
        ] {
            match value {
                Some(MetaText::Other(raw)) => errors.push(format!(
                    "Field '{}' must be a string, found {}",
                    field,
                    yaml_kind(raw)
                )),
                _ if non_empty(value).is_none() => {
                    errors.push(format!("Missing required field: {}", field));
                }
                _ => {}
            }
        }

        if self.system_prompt.is_empty() {
            errors.push("Missing system prompt section".to_string());
        }
        if self.user_prompt.is_empty() {
            errors.push("Missing user prompt section".to_string());
        }

        for (label, source) in [
            ("system prompt", &self.system_prompt),
            ("user prompt", &self.user_prompt),
        ] {
            if !source.is_empty()
                && let Err(e) = template::check_syntax(source)
            {
                errors.push(format!("Invalid template syntax in {}: {}", label, e));
            }
        }

        if let Some(temperature) = &self.metadata.temperature
            && !temperature.is_valid()
        {
            errors.push("Temperature must be a number between 0 and 2".to_string());
        }

        errors
    }

    /// Compile the embedded output schema.
    pub fn output_type(&self) -> std::result::Result<OutputType, OutputSchemaError> {
        if self.output_schema_source.trim().is_empty() {
            return Err(OutputSchemaError::NoSchema {
                agent: self.name().to_string(),
            });
        }
        crate::schema::compile(&self.output_schema_source)
    }

    /// Render the system prompt. `agent_name` and `agent_description` are
    /// added to the context.
    pub fn render_system_prompt(
        &self,
        context: &Map<String, Value>,
        loader: &TemplateLoader,
    ) -> Result<String> {
        if self.system_prompt.is_empty() {
            return Ok(String::new());
        }
        let mut context = context.clone();
        context.insert("agent_name".into(), self.name().into());
        context.insert("agent_description".into(), self.description().into());
        Ok(Template::parse(&self.system_prompt)
            .map_err(crate::template::TemplateError::from)?
            .render_with_loader(&context, loader)?)
    }

    pub fn render_user_prompt(
        &self,
        context: &Map<String, Value>,
        loader: &TemplateLoader,
    ) -> Result<String> {
        if self.user_prompt.is_empty() {
            return Ok(String::new());
        }
        Ok(Template::parse(&self.user_prompt)
            .map_err(crate::template::TemplateError::from)?
            .render_with_loader(context, loader)?)
    }
}

fn text(value: &Option<MetaText>) -> Option<&str> {
    value.as_ref().and_then(MetaText::as_str)
}

fn non_empty(value: &Option<MetaText>) -> Option<&str> {
    text(value).filter(|s| !s.is_empty())
}
