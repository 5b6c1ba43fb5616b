//! Configuration view and validation commands - `lineups config`.

use anyhow::Result;

use lineups::config::{ENV_API_URL, ENV_TIMEOUT_SECS, LineupsToml, Settings};

use crate::ConfigCommands;

pub fn cmd_config(settings: &Settings, command: Option<ConfigCommands>) -> Result<()> {
    let Some(config_path) = settings.config_path.as_deref() else {
        anyhow::bail!("Could not determine a config directory; pass --config <path>");
    };

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Lineups Configuration");
            println!("=====================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No lineups.toml found at {}", config_path.display());
                println!("Using default configuration.");
            }
            println!();

            println!("[api]");
            println!("  base_url = \"{}\"", settings.toml.api.base_url);
            println!("  timeout_secs = {}", settings.toml.api.timeout_secs);
            println!();

            println!("Effective values (with env/CLI overrides):");
            println!("  base_url = \"{}\"", settings.api_url());
            println!("  timeout_secs = {}", settings.timeout().as_secs());
            println!();
            println!("Environment: {}, {}", ENV_API_URL, ENV_TIMEOUT_SECS);
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            let warnings = settings.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("lineups.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            LineupsToml::default().save(config_path)?;

            println!("Created lineups.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [api] base_url, timeout_secs");
            println!();
        }
    }

    Ok(())
}
