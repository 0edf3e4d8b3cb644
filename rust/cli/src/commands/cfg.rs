//! Configuration command handler.
//!
//! Displays the resolved cardlang configuration as JSON, each value paired
//! with its source (default, config file or environment).

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "iterations": {
            "value": config.iterations,
            "source": sources.iterations,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "format": {
            "value": config.format,
            "source": sources.format,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
