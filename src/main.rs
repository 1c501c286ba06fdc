//! agentmd: parse, validate and inspect markdown-defined LLM agents.
//!
//! This is the main entry point for the `agentmd` CLI. It parses arguments,
//! loads `agentmd.yaml`, installs logging, dispatches to the appropriate
//! command handler, and handles errors with proper exit codes.

use agentmd::cli::Cli;
use agentmd::config::Config;
use agentmd::error::Result;
use agentmd::{commands, exit_codes, logging};
use std::process::ExitCode;

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_from_dir(".")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
        config.validate()?;
    }
    logging::init_logging(&config.logging)?;

    commands::dispatch(cli.command, &config)
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
