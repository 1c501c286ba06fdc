//! Extraction of labelled fenced blocks from the markdown body.
//!
//! A section is an HTML comment label followed by a fenced code block:
//!
//! ````markdown
//! <!-- System Prompt -->
//! ```jinja2
//! You are {{ agent_name }}.
//! ```
//! ````
//!
//! The label becomes the section key in snake case (`system_prompt`).

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static SECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!-- ([\w\s]+) -->\s*```(\w+)?\n(.*?)```").expect("Invalid section regex")
});

pub const SYSTEM_PROMPT: &str = "system_prompt";
pub const USER_PROMPT: &str = "user_prompt";
pub const OUTPUT_SCHEMA: &str = "output_schema";
pub const CONTEXT_BUILDER: &str = "context_builder";

/// One labelled block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Label as written in the comment, e.g. `System Prompt`.
    pub label: String,
    /// Block contents with surrounding whitespace trimmed.
    pub content: String,
    /// Fence language tag, if any.
    pub language: Option<String>,
    /// 1-based line of the `<!--` marker within the scanned text.
    pub line: usize,
}

/// Normalize a label to its section key.
pub fn section_key(label: &str) -> String {
    label.to_lowercase().replace(' ', "_")
}

/// Every section in `text`, in document order, duplicates included.
pub fn scan_sections(text: &str) -> Vec<Section> {
    let mut line = 1;
    let mut counted_to = 0;

    SECTION_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            line += text[counted_to..whole.start()].matches('\n').count();
            counted_to = whole.start();

            let label = caps.get(1)?.as_str().to_string();
            let language = caps.get(2).map(|m| m.as_str().to_string());
            let content = caps.get(3)?.as_str().trim().to_string();

            tracing::trace!(
                section = %label,
                language = language.as_deref().unwrap_or("none"),
                "found section"
            );

            Some(Section {
                label,
                content,
                language,
                line,
            })
        })
        .collect()
}

/// Sections keyed by [`section_key`]. A repeated label overwrites the
/// earlier block.
pub fn extract_sections(text: &str) -> BTreeMap<String, Section> {
    scan_sections(text)
        .into_iter()
        .map(|section| (section_key(&section.label), section))
        .collect()
}

/// Labels that occur more than once: `(key, first_line, repeated_section)`
/// for every repeat after the first.
pub fn duplicate_sections(text: &str) -> Vec<(String, usize, Section)> {
    let mut first_seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut duplicates = Vec::new();

    for section in scan_sections(text) {
        let key = section_key(&section.label);
        match first_seen.get(&key) {
            Some(&first_line) => duplicates.push((key, first_line, section)),
            None => {
                first_seen.insert(key, section.line);
            }
        }
    }
    duplicates
}
