//! Tests for config functionality.

use crate::config::{CONFIG_FILE_NAME, Config, LogFormat};
use crate::error::AgentError;
use crate::exit_codes;
use crate::report::OutputFormat;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.agents_dir, "ai/agents");
    assert_eq!(config.include_globs, vec!["**/*.agent.md"]);
    assert_eq!(config.template_dirs, vec!["ai/agents", "ai/agents/shared"]);
    assert_eq!(config.cache_capacity, 32);
    assert_eq!(config.default_format, "human");
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert!(config.logging.modules.is_empty());
    assert!(config.extra.is_empty());
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();

    // Should use all defaults
    assert_eq!(config.agents_dir, "ai/agents");
    assert_eq!(config.cache_capacity, 32);
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
agents_dir: agents
logging:
  level: debug
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.agents_dir, "agents");
    assert_eq!(config.logging.level, "debug");

    // Unspecified values should use defaults
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(config.include_globs, vec!["**/*.agent.md"]);
    assert_eq!(config.default_format, "human");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
agents_dir: prompts
include_globs:
  - "team/*.agent.md"
  - "shared/**/*.agent.md"
template_dirs:
  - prompts/partials
cache_capacity: 8
default_format: github
logging:
  level: info
  format: json
  modules:
    agentmd::validate: trace
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.agents_dir, "prompts");
    assert_eq!(config.include_globs.len(), 2);
    assert_eq!(config.template_dirs, vec!["prompts/partials"]);
    assert_eq!(config.cache_capacity, 8);
    assert_eq!(config.output_format(), OutputFormat::Github);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(
        config.logging.modules.get("agentmd::validate").map(String::as_str),
        Some("trace")
    );
}

#[test]
fn test_unknown_fields_are_preserved() {
    let yaml = r#"
agents_dir: agents
future_option: true
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.agents_dir, "agents");
    assert_eq!(
        config.extra.get("future_option"),
        Some(&serde_yaml::Value::Bool(true))
    );
}

#[test]
fn test_malformed_yaml_is_config_error() {
    let err = Config::from_yaml("agents_dir: [unclosed").unwrap_err();
    assert!(matches!(err, AgentError::ConfigError(_)));
    assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
}

#[test]
fn test_validate_zero_cache_capacity() {
    let err = Config::from_yaml("cache_capacity: 0").unwrap_err();
    assert!(err.to_string().contains("cache_capacity must be greater than 0"));
}

#[test]
fn test_validate_empty_agents_dir() {
    let err = Config::from_yaml("agents_dir: ''").unwrap_err();
    assert!(err.to_string().contains("agents_dir must not be empty"));
}

#[test]
fn test_validate_include_globs() {
    let err = Config::from_yaml("include_globs: []").unwrap_err();
    assert!(err.to_string().contains("include_globs must list at least one pattern"));

    let err = Config::from_yaml("include_globs: ['[']").unwrap_err();
    assert!(err.to_string().contains("invalid include_globs entry '['"));
}

#[test]
fn test_validate_default_format() {
    let err = Config::from_yaml("default_format: xml").unwrap_err();
    assert!(
        err.to_string()
            .contains("default_format must be one of human, json, github (found 'xml')")
    );
}

#[test]
fn test_validate_log_levels() {
    let err = Config::from_yaml("logging:\n  level: loud").unwrap_err();
    assert!(err.to_string().contains("logging.level must be one of"));

    let err = Config::from_yaml("logging:\n  modules:\n    agentmd: chatty").unwrap_err();
    assert!(err.to_string().contains("logging.modules.agentmd"));

    assert!(Config::from_yaml("logging:\n  level: OFF").is_ok());
}

#[test]
fn test_unknown_log_format_fails_to_parse() {
    let err = Config::from_yaml("logging:\n  format: xml").unwrap_err();
    assert!(matches!(err, AgentError::ConfigError(_)));
    assert_eq!(LogFormat::from_str("json"), Some(LogFormat::Json));
    assert_eq!(LogFormat::from_str("xml"), None);
}

#[test]
fn test_to_yaml_reloads() {
    let mut config = Config::default();
    config.cache_capacity = 4;
    config.default_format = "json".to_string();

    let yaml = config.to_yaml().unwrap();
    let reloaded = Config::from_yaml(&yaml).unwrap();
    assert_eq!(reloaded.cache_capacity, 4);
    assert_eq!(reloaded.default_format, "json");
}

#[test]
fn test_load_from_dir_without_file_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from_dir(temp.path()).unwrap();
    assert_eq!(config.agents_dir, "ai/agents");
}

#[test]
fn test_load_from_dir_reads_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(CONFIG_FILE_NAME), "cache_capacity: 3\n").unwrap();

    let config = Config::load_from_dir(temp.path()).unwrap();
    assert_eq!(config.cache_capacity, 3);
    assert_eq!(config.config_cache().capacity(), 3);
}

#[test]
fn test_load_missing_file_is_config_error() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(temp.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, AgentError::ConfigError(_)));
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_paths_resolve_against_base() {
    let config = Config::default();
    let base = Path::new("/work");

    assert_eq!(config.agents_path(base), Path::new("/work/ai/agents"));
    let loader = config.template_loader(base);
    assert_eq!(
        loader.search_dirs(),
        &[
            Path::new("/work/ai/agents").to_path_buf(),
            Path::new("/work/ai/agents/shared").to_path_buf(),
        ]
    );
}
