//! Typed YAML front matter of an agent document.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Display name used when `name` is not configured.
pub const DEFAULT_NAME: &str = "Unknown Agent";

/// Description used when `description` is not configured.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Sampling temperature used when `temperature` is not configured.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Accepted temperature range (inclusive).
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

/// Front matter of an `.agent.md` file.
///
/// Every field is optional so that a parseable but incomplete document can
/// still be loaded and reported on. Any YAML mapping deserializes: fields of
/// the wrong shape are kept as raw values for validation to report. Defaults
/// are applied by the accessors on [`AgentConfig`](super::AgentConfig),
/// never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentMetadata {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<MetaText>,

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<MetaText>,

    /// Model identifier handed to the execution layer. No default.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub model: Option<MetaText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,

    /// Version records, usually mappings with an integer `version`. Entries
    /// of any shape are kept.
    #[serde(
        default,
        deserialize_with = "lenient_history",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub evolution_history: Vec<serde_yaml::Value>,

    /// Every other key (`purpose`, `capabilities`, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A text field. Scalars read as text (`name: 42` is `"42"`); sequences and
/// mappings are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaText {
    Text(String),
    Other(serde_yaml::Value),
}

impl MetaText {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaText::Text(s) => Some(s),
            MetaText::Other(_) => None,
        }
    }
}

/// A configured temperature. Non-numeric values are kept so validation can
/// report them instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    Number(f64),
    Other(serde_yaml::Value),
}

impl Temperature {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Temperature::Number(t) => Some(*t),
            Temperature::Other(_) => None,
        }
    }

    /// Numeric and within [`TEMPERATURE_RANGE`].
    pub fn is_valid(&self) -> bool {
        self.as_f64().is_some_and(|t| TEMPERATURE_RANGE.contains(&t))
    }
}

impl AgentMetadata {
    /// Look up an untyped front matter key such as `purpose`.
    pub fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.extra.get(key)
    }

    /// Highest `version` in the evolution history, or 1 without history.
    ///
    /// Entries without a non-negative integer `version` count as version 1.
    pub fn latest_version(&self) -> u32 {
        self.evolution_history
            .iter()
            .map(record_version)
            .max()
            .unwrap_or(1)
    }
}

fn record_version(record: &serde_yaml::Value) -> u32 {
    record
        .get("version")
        .and_then(serde_yaml::Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(1)
}

/// Article-prefixed YAML type name for messages: `a sequence`.
pub(crate) fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<MetaText>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::String(s) => Some(MetaText::Text(s)),
        serde_yaml::Value::Bool(b) => Some(MetaText::Text(b.to_string())),
        serde_yaml::Value::Number(n) => Some(MetaText::Text(n.to_string())),
        other => Some(MetaText::Other(other)),
    })
}

/// A sequence is taken as-is, null is no history, anything else is a single
/// record.
fn lenient_history<'de, D>(deserializer: D) -> Result<Vec<serde_yaml::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Vec::new(),
        serde_yaml::Value::Sequence(records) => records,
        other => vec![other],
    })
}
