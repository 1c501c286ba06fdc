//! Diagnostic logging for agentmd.
//!
//! Events are emitted with `tracing` throughout the crate. The binary installs
//! a `tracing-subscriber` fmt layer that writes to stderr, so reports printed
//! on stdout (notably `--format json`) stay machine-readable.
//!
//! Filter priority, highest first:
//! 1. `AGENTMD_LOG` environment variable (full `EnvFilter` syntax)
//! 2. `--log-level` on the command line
//! 3. `logging` block of `agentmd.yaml`

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{AgentError, Result};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable overriding every configured filter.
pub const LOG_ENV_VAR: &str = "AGENTMD_LOG";

/// Install the global subscriber.
///
/// Calling this twice is an error from `tracing-subscriber`; it is reported as
/// a config error rather than a panic.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(config)?;
    let base_subscriber = Registry::default().with(filter);

    let result = match config.format {
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| AgentError::ConfigError(format!("failed to initialize logging: {}", e)))
}

/// Build the event filter from `AGENTMD_LOG` or the logging config.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
        return Ok(filter);
    }
    filter_from_config(config)
}

fn filter_from_config(config: &LoggingConfig) -> Result<EnvFilter> {
    let level = config.level.to_ascii_lowercase();
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&level);
    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level.to_ascii_lowercase());
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| AgentError::ConfigError(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_filter_from_level() {
        let config = LoggingConfig {
            level: "DEBUG".to_string(),
            ..LoggingConfig::default()
        };
        let filter = filter_from_config(&config).unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_filter_off() {
        let config = LoggingConfig {
            level: "off".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(filter_from_config(&config).unwrap().to_string(), "off");
    }

    #[test]
    fn test_filter_with_module_directive() {
        let mut modules = BTreeMap::new();
        modules.insert("agentmd::validate".to_string(), "trace".to_string());
        let config = LoggingConfig {
            modules,
            ..LoggingConfig::default()
        };
        let rendered = filter_from_config(&config).unwrap().to_string();
        assert!(rendered.contains("agentmd::validate=trace"));
        assert!(rendered.contains("warn"));
    }

    #[test]
    fn test_invalid_module_directive() {
        let mut modules = BTreeMap::new();
        modules.insert("agentmd".to_string(), "loud".to_string());
        let config = LoggingConfig {
            modules,
            ..LoggingConfig::default()
        };
        let err = filter_from_config(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid log directive"));
    }
}
