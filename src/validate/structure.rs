//! Structural checks over the raw document text.

use super::types::{ErrorType, ValidationError};
use crate::agent::frontmatter::is_delimiter;
use crate::agent::sections::duplicate_sections;

/// Check front matter fences and repeated section labels.
///
/// The fence checks are independent of each other: a document that does not
/// start with `---` is still checked for a closing fence and an empty block.
pub fn check_structure(raw: &str) -> Vec<ValidationError> {
    let text = raw.replace("\r\n", "\n");
    let mut errors = Vec::new();

    let starts_with_fence = text.lines().next().is_some_and(is_delimiter);
    if !starts_with_fence {
        errors.push(ValidationError::structural(
            Some(1),
            "File must start with YAML frontmatter delimiter '---'",
        ));
    }

    let fences: Vec<usize> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| is_delimiter(line))
        .map(|(i, _)| i + 1)
        .collect();

    match fences.as_slice() {
        [] | [_] => errors.push(ValidationError::structural(
            None,
            "Missing closing YAML frontmatter delimiter '---'",
        )),
        [open, close, ..] => {
            let blank = text
                .lines()
                .skip(*open)
                .take(close - open - 1)
                .all(|line| line.trim().is_empty());
            if blank {
                errors.push(ValidationError::structural(
                    Some(*close),
                    "Empty YAML frontmatter section",
                ));
            }
        }
    }

    for (key, first_line, repeated) in duplicate_sections(&text) {
        errors.push(ValidationError::warning(
            ErrorType::Structural,
            Some(repeated.line),
            format!(
                "Duplicate section '{}' (first defined on line {}); the later block overrides it",
                repeated.label, first_line
            ),
        ));
        tracing::debug!(section = %key, line = repeated.line, "duplicate section");
    }

    errors
}
