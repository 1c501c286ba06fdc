//! Tests for agent document parsing, config accessors and the config cache.

use super::*;
use crate::error::AgentError;
use crate::schema::OutputSchemaError;
use crate::template::TemplateLoader;
use crate::test_support::{VALID_AGENT, agent_doc, prompt_sections, write_agent};
use proptest::prelude::*;
use serde_json::{Map, json};
use std::sync::Arc;
use tempfile::TempDir;

fn parse(content: &str) -> AgentConfig {
    AgentConfig::parse("test.agent.md", content).unwrap()
}

// =========================================================================
// Front matter
// =========================================================================

#[test]
fn test_parse_valid_agent() {
    let config = parse(VALID_AGENT);

    assert_eq!(config.name(), "Patrick");
    assert_eq!(config.description(), "Summarizes pull requests");
    assert_eq!(config.model().unwrap(), "anthropic/claude-sonnet");
    assert_eq!(config.temperature(), 0.3);
    assert_eq!(config.latest_version(), 2);
    assert_eq!(
        config.system_prompt,
        "You are {{ agent_name }}. {{ agent_description }}."
    );
    assert_eq!(config.user_prompt, "Summarize: {{ query }}");
    assert!(config.output_schema_source.starts_with("Output:"));
    assert!(config.context_builder_source.is_empty());
    assert!(config.raw_content.starts_with("\n# Patrick"));
    assert!(config.validate().is_empty());
}

#[test]
fn test_unknown_keys_are_preserved() {
    let config = parse(VALID_AGENT);
    assert_eq!(
        config.metadata.get("purpose").and_then(|v| v.as_str()),
        Some("Keep reviewers informed")
    );
    assert!(config.metadata.get("capabilities").is_some());
}

#[test]
fn test_crlf_line_endings() {
    let config = parse(&VALID_AGENT.replace('\n', "\r\n"));
    assert_eq!(config.name(), "Patrick");
    assert_eq!(config.user_prompt, "Summarize: {{ query }}");
}

#[test]
fn test_document_without_front_matter_parses() {
    let config = parse("# Just markdown\n");
    assert_eq!(config.metadata, AgentMetadata::default());
    assert_eq!(config.name(), DEFAULT_NAME);
    assert_eq!(config.raw_content, "# Just markdown\n");
}

#[test]
fn test_missing_closing_delimiter_is_parse_error() {
    let err = AgentConfig::parse("x.agent.md", "---\nname: x\n").unwrap_err();
    match err {
        AgentError::Parse { message, .. } => {
            assert_eq!(message, "missing closing '---' front matter delimiter")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let err = AgentConfig::parse("x.agent.md", "---\nname: [unclosed\n---\n").unwrap_err();
    assert!(matches!(err, AgentError::Parse { .. }));
}

#[test]
fn test_non_mapping_front_matter_is_parse_error() {
    let err = AgentConfig::parse("x.agent.md", "---\n- a\n- b\n---\n").unwrap_err();
    match err {
        AgentError::Parse { message, .. } => assert!(message.contains("a sequence")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_front_matter_gives_defaults() {
    let config = parse("---\n---\nbody\n");
    assert_eq!(config.metadata, AgentMetadata::default());
    assert_eq!(config.raw_content, "body\n");
}

#[test]
fn test_scalar_fields_are_stringified() {
    let config = parse("---\nname: 42\ndescription: true\nmodel: gpt\n---\n");
    assert_eq!(config.name(), "42");
    assert_eq!(config.description(), "true");
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = AgentConfig::load(temp.path().join("nope.agent.md")).unwrap_err();
    assert!(matches!(err, AgentError::NotFound(_)));
}

// =========================================================================
// Sections
// =========================================================================

#[test]
fn test_section_keys_and_languages() {
    let body = "<!-- Context Builder -->\n```python\nbuild()\n```\n\n<!-- Notes -->\n```\nplain\n```\n";
    let found = sections::extract_sections(body);

    let builder = &found["context_builder"];
    assert_eq!(builder.label, "Context Builder");
    assert_eq!(builder.language.as_deref(), Some("python"));
    assert_eq!(builder.content, "build()");
    assert_eq!(builder.line, 1);

    let notes = &found["notes"];
    assert_eq!(notes.language, None);
    assert_eq!(notes.line, 6);
}

#[test]
fn test_no_sections_is_empty() {
    assert!(sections::extract_sections("no markers here").is_empty());
}

#[test]
fn test_unlabelled_fence_is_ignored() {
    assert!(sections::extract_sections("```jinja2\n{{ x }}\n```\n").is_empty());
}

#[test]
fn test_duplicate_section_last_wins() {
    let doc = agent_doc(
        "name: a",
        &[
            ("System Prompt", "jinja2", "first"),
            ("System Prompt", "jinja2", "second"),
        ],
    );
    let config = parse(&doc);
    assert_eq!(config.system_prompt, "second");

    let duplicates = sections::duplicate_sections(&doc);
    assert_eq!(duplicates.len(), 1);
    let (key, first_line, repeated) = &duplicates[0];
    assert_eq!(key, "system_prompt");
    assert_eq!(*first_line, 5);
    assert_eq!(repeated.line, 10);
}

#[test]
fn test_unknown_sections_are_retained() {
    let doc = agent_doc("name: a", &[("Examples", "markdown", "- one")]);
    let config = parse(&doc);
    assert_eq!(config.sections["examples"].content, "- one");
}

// =========================================================================
// Accessors and validate()
// =========================================================================

#[test]
fn test_defaults_when_fields_missing() {
    let config = parse("---\nmodel: m\n---\n");
    assert_eq!(config.name(), "Unknown Agent");
    assert_eq!(config.description(), "No description provided");
    assert_eq!(config.temperature(), 0.7);
    assert_eq!(config.latest_version(), 1);
    assert_eq!(config.explain(), "Unknown Agent: No description provided");
}

#[test]
fn test_model_has_no_default() {
    let config = parse("---\nname: Patrick\n---\n");
    match config.model().unwrap_err() {
        AgentError::MissingModel { agent } => assert_eq!(agent, "Patrick"),
        other => panic!("unexpected error: {other:?}"),
    }

    let config = parse("---\nname: Patrick\nmodel: ''\n---\n");
    assert!(config.model().is_err());
}

#[test]
fn test_latest_version_is_order_independent() {
    let config = parse(
        "---\nevolution_history:\n  - version: 3\n  - version: 1\n  - changes: no version\n---\n",
    );
    assert_eq!(config.latest_version(), 3);
}

#[test]
fn test_malformed_history_versions_count_as_one() {
    let config = parse("---\nevolution_history:\n  - version: \"2\"\n  - version: -1\n  - v3\n---\n");
    assert_eq!(config.metadata.evolution_history.len(), 3);
    assert_eq!(config.latest_version(), 1);

    let config = parse("---\nevolution_history:\n  - version: 4\n  - version: \"9\"\n---\n");
    assert_eq!(config.latest_version(), 4);
}

#[test]
fn test_non_sequence_history_is_tolerated() {
    let config = parse("---\nname: a\nevolution_history: none yet\n---\n");
    assert_eq!(config.latest_version(), 1);

    let config = parse("---\nevolution_history:\n  version: 5\n---\n");
    assert_eq!(config.latest_version(), 5);

    let config = parse("---\nevolution_history:\n---\n");
    assert!(config.metadata.evolution_history.is_empty());
}

#[test]
fn test_non_text_fields_parse_and_fail_validation() {
    let doc = agent_doc(
        "name: [a, b]\ndescription: {short: x}\nmodel: 42",
        &prompt_sections(),
    );
    let config = parse(&doc);

    assert_eq!(config.name(), DEFAULT_NAME);
    assert_eq!(config.description(), DEFAULT_DESCRIPTION);
    assert_eq!(config.model().unwrap(), "42");
    assert_eq!(
        config.validate(),
        vec![
            "Field 'name' must be a string, found a sequence",
            "Field 'description' must be a string, found a mapping",
        ]
    );
}

#[test]
fn test_empty_name_is_returned_as_configured() {
    let doc = agent_doc("name: ''\ndescription: ''\nmodel: m", &prompt_sections());
    let config = parse(&doc);

    assert_eq!(config.name(), "");
    assert_eq!(config.description(), "");
    assert_eq!(
        config.validate(),
        vec![
            "Missing required field: name",
            "Missing required field: description",
        ]
    );
}

#[test]
fn test_explain_includes_version_when_evolved() {
    assert_eq!(
        parse(VALID_AGENT).explain(),
        "Patrick (v2): Summarizes pull requests"
    );
}

#[test]
fn test_validate_reports_missing_pieces() {
    let doc = agent_doc(
        "name: Patrick",
        &[("System Prompt", "jinja2", "You are {{ agent_name }}.")],
    );
    let errors = parse(&doc).validate();
    assert_eq!(
        errors,
        vec![
            "Missing required field: description",
            "Missing required field: model",
            "Missing user prompt section",
        ]
    );
}

#[test]
fn test_validate_reports_template_syntax() {
    let doc = agent_doc(
        "name: a\ndescription: b\nmodel: c",
        &[
            ("System Prompt", "jinja2", "{% if x %}never closed"),
            ("User Prompt", "jinja2", "{{ query }}"),
        ],
    );
    let errors = parse(&doc).validate();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Invalid template syntax in system prompt: "));
}

#[test]
fn test_non_numeric_temperature() {
    let doc = agent_doc("name: a\ndescription: b\nmodel: c\ntemperature: hot", &prompt_sections());
    let config = parse(&doc);
    assert_eq!(config.temperature(), 0.7);
    assert_eq!(
        config.validate(),
        vec!["Temperature must be a number between 0 and 2"]
    );
}

#[test]
fn test_temperature_bounds_inclusive() {
    for t in ["0", "2", "2.0", "0.0"] {
        let doc = agent_doc(
            &format!("name: a\ndescription: b\nmodel: c\ntemperature: {t}"),
            &prompt_sections(),
        );
        assert!(parse(&doc).validate().is_empty(), "temperature {t}");
    }
}

proptest! {
    #[test]
    fn prop_temperature_rule_matches_range(t in -10.0f64..10.0) {
        let doc = agent_doc(
            &format!("name: a\ndescription: b\nmodel: c\ntemperature: {t:?}"),
            &prompt_sections(),
        );
        let errors = parse(&doc).validate();
        let in_range = (0.0..=2.0).contains(&t);
        prop_assert_eq!(errors.is_empty(), in_range);
    }

    #[test]
    fn prop_last_duplicate_section_wins(contents in prop::collection::vec("[a-z]{1,12}", 1..5)) {
        let sections: Vec<(&str, &str, &str)> = contents
            .iter()
            .map(|c| ("Notes", "text", c.as_str()))
            .collect();
        let doc = agent_doc("name: a", &sections);
        let config = parse(&doc);
        prop_assert_eq!(&config.sections["notes"].content, contents.last().unwrap());
    }
}

// =========================================================================
// Output type and rendering
// =========================================================================

#[test]
fn test_output_type_requires_schema() {
    let doc = agent_doc("name: Patrick", &prompt_sections());
    let err = parse(&doc).output_type().unwrap_err();
    assert_eq!(
        err,
        OutputSchemaError::NoSchema {
            agent: "Patrick".to_string()
        }
    );
}

#[test]
fn test_output_type_from_valid_agent() {
    let output = parse(VALID_AGENT).output_type().unwrap();
    assert_eq!(output.name(), "Output");
    let value = output.construct(&json!({"summary": "ok"})).unwrap();
    assert_eq!(value, json!({"summary": "ok", "confidence": 0.5}));
}

#[test]
fn test_render_system_prompt_injects_agent_fields() {
    let config = parse(VALID_AGENT);
    let rendered = config
        .render_system_prompt(&Map::new(), &TemplateLoader::default())
        .unwrap();
    assert_eq!(rendered, "You are Patrick. Summarizes pull requests.");
}

#[test]
fn test_render_user_prompt() {
    let config = parse(VALID_AGENT);
    let context = crate::template::context([("query", "PR #12")]);
    let rendered = config
        .render_user_prompt(&context, &TemplateLoader::default())
        .unwrap();
    assert_eq!(rendered, "Summarize: PR #12");
}

#[test]
fn test_render_empty_prompt_is_empty() {
    let config = parse("---\nname: a\n---\n");
    let loader = TemplateLoader::default();
    assert_eq!(config.render_system_prompt(&Map::new(), &loader).unwrap(), "");
    assert_eq!(config.render_user_prompt(&Map::new(), &loader).unwrap(), "");
}

// =========================================================================
// Cache
// =========================================================================

#[test]
fn test_cache_shares_equivalent_paths() {
    let temp = TempDir::new().unwrap();
    let path = write_agent(temp.path(), "agents/patrick.agent.md", VALID_AGENT);
    let dotted = temp.path().join("agents/./patrick.agent.md");

    let cache = ConfigCache::new();
    let first = cache.get_or_load(&path).unwrap();
    let second = cache.get_or_load(&dotted).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(&dotted));
}

#[test]
fn test_cache_does_not_see_edits_until_cleared() {
    let temp = TempDir::new().unwrap();
    let path = write_agent(temp.path(), "patrick.agent.md", VALID_AGENT);

    let cache = ConfigCache::new();
    let before = cache.get_or_load(&path).unwrap();

    std::fs::write(&path, VALID_AGENT.replace("Patrick", "Renamed")).unwrap();
    assert_eq!(cache.get_or_load(&path).unwrap().name(), "Patrick");

    cache.clear();
    assert!(cache.is_empty());
    let after = cache.get_or_load(&path).unwrap();
    assert_eq!(after.name(), "Renamed");
    assert_ne!(*before, *after);
}

#[test]
fn test_round_trip_after_clear() {
    let temp = TempDir::new().unwrap();
    let path = write_agent(temp.path(), "patrick.agent.md", VALID_AGENT);

    let cache = ConfigCache::new();
    let first = cache.get_or_load(&path).unwrap();
    cache.clear();
    let second = cache.get_or_load(&path).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}

#[test]
fn test_cache_evicts_least_recently_used() {
    let temp = TempDir::new().unwrap();
    let a = write_agent(temp.path(), "a.agent.md", VALID_AGENT);
    let b = write_agent(temp.path(), "b.agent.md", VALID_AGENT);
    let c = write_agent(temp.path(), "c.agent.md", VALID_AGENT);

    let cache = ConfigCache::with_capacity(2);
    cache.get_or_load(&a).unwrap();
    cache.get_or_load(&b).unwrap();
    cache.get_or_load(&a).unwrap();
    cache.get_or_load(&c).unwrap();

    assert_eq!(cache.len(), 2);
    assert!(cache.contains(&a));
    assert!(!cache.contains(&b));
    assert!(cache.contains(&c));
}

#[test]
fn test_cache_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let cache = ConfigCache::new();
    let err = cache
        .get_or_load(temp.path().join("missing.agent.md"))
        .unwrap_err();
    assert!(matches!(err, AgentError::NotFound(_)));
    assert!(cache.is_empty());
}

#[test]
fn test_default_capacity() {
    assert_eq!(ConfigCache::new().capacity(), DEFAULT_CACHE_CAPACITY);
    assert_eq!(ConfigCache::with_capacity(0).capacity(), 1);
}
