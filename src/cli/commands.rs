//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::{CONFIG_KEYS, ConfigLoader, paths};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "workers", "logger.level")
        key: Option<String>,
        /// Include the context-specific layer
        #[arg(long)]
        context: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "workers", "logger.level")
        key: String,
        /// Configuration value
        value: String,
        /// Context name for context-specific config
        #[arg(long)]
        context: Option<String>,
    },
    /// List all configuration
    List {
        /// Include the context-specific layer
        #[arg(long)]
        context: Option<String>,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate {
        /// Also validate the context-specific layer
        #[arg(long)]
        context: Option<String>,
    },
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key, context } => {
            let config =
                ConfigLoader::load(context.as_deref()).context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = crate::config::get_config_value(&config, &key)?;
                println!("{}", value);
            } else {
                for key in CONFIG_KEYS {
                    println!("{}: {}", key, crate::config::get_config_value(&config, key)?);
                }
            }
        }
        ConfigSubcommand::Set {
            key,
            value,
            context,
        } => {
            // Edit the layer being saved, not the merged view
            let path = match context.as_deref() {
                Some(name) => paths::context_config_path(name),
                None => paths::root_config_path(),
            };
            let mut config = if path.exists() {
                ConfigLoader::load_file(&path)?
            } else {
                crate::config::Config::default()
            };

            crate::config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            if let Some(context_name) = context {
                ConfigLoader::save_context(&config, &context_name)
                    .context("Failed to save context configuration")?;
                println!("Configuration saved for context: {}", context_name);
            } else {
                ConfigLoader::save_root(&config).context("Failed to save configuration")?;
                println!("Configuration saved");
            }
        }
        ConfigSubcommand::List { context } => {
            let config =
                ConfigLoader::load(context.as_deref()).context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Validate { context } => {
            ConfigLoader::validate(context.as_deref())
                .context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}
