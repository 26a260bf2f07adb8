//! `gridgen config`: inspect configuration values.

use serde_json::Value;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.format() == OutputFormat::Json {
                output.json(&value)?;
            } else {
                output.print(&display_value(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key such as `library.module_symbol`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let tree = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let pointer = format!("/{}", key.replace('.', "/"));
    tree.pointer(&pointer)
        .cloned()
        .ok_or_else(|| CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        })
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
