//! Splits an agent document into its YAML front matter and markdown body.

use super::metadata::{AgentMetadata, yaml_kind};
use thiserror::Error;

/// The front matter fence.
pub const DELIMITER: &str = "---";

/// Whether `line` is a front matter fence (surrounding whitespace ignored).
pub fn is_delimiter(line: &str) -> bool {
    line.trim() == DELIMITER
}

/// Why the front matter of a document could not be read.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("missing closing '---' front matter delimiter")]
    Unterminated,

    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter must be a YAML mapping, found {0}")]
    NotMapping(&'static str),
}

/// A document split at its front matter fences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    /// Text between the fences, `None` when the document has no front matter.
    pub yaml: Option<String>,
    /// Everything after the closing fence (or the whole document).
    pub body: String,
}

/// Split `content` into front matter and body.
///
/// Line endings are normalized to `\n`. A document whose first line is not
/// `---` has no front matter; one that opens a fence without closing it is
/// an error.
pub fn split(content: &str) -> Result<FrontMatter, FrontMatterError> {
    let normalized = content.replace("\r\n", "\n");
    let mut lines = normalized.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(FrontMatter {
            yaml: None,
            body: String::new(),
        });
    };
    if !is_delimiter(first) {
        return Ok(FrontMatter {
            yaml: None,
            body: normalized.clone(),
        });
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    let mut closing = None;
    for line in lines {
        if is_delimiter(line) {
            closing = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }

    let (yaml_end, body_start) = closing.ok_or(FrontMatterError::Unterminated)?;
    Ok(FrontMatter {
        yaml: Some(normalized[yaml_start..yaml_end].to_string()),
        body: normalized[body_start..].to_string(),
    })
}

/// Decode front matter YAML into typed metadata.
///
/// Blank front matter yields default metadata; anything other than a mapping
/// (or null) is rejected.
pub fn parse_metadata(yaml: &str) -> Result<AgentMetadata, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(AgentMetadata::default());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    match &value {
        serde_yaml::Value::Null => return Ok(AgentMetadata::default()),
        serde_yaml::Value::Mapping(_) => {}
        other => return Err(FrontMatterError::NotMapping(yaml_kind(other))),
    }

    Ok(serde_yaml::from_value(value)?)
}
