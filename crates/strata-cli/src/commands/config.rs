//! `strata config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output
                .document(&value)
                .with_cli_context(|| format!("writing '{key}'"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.document(&serialised)?;
        }

        ConfigCommands::Path => {
            output.document(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let value = match key {
        "base_path" => config.base_path.display().to_string(),
        "components.terraform.base_path" => {
            config.components.terraform.base_path.display().to_string()
        }
        "components.helmfile.base_path" => {
            config.components.helmfile.base_path.display().to_string()
        }
        "stacks.base_path" => config.stacks.base_path.display().to_string(),
        "stacks.name_pattern" => config.stacks.name_pattern.clone(),
        "output.no_color" => config.output.no_color.to_string(),
        _ => {
            return Err(CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            });
        }
    };
    Ok(value)
}

// ── tests ─────────────────────────────────────────────────────────────────────
