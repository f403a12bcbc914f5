//! Configuration system for kgrouper
//!
//! Layered YAML configuration: built-in defaults, the root config file, an
//! optional per-context file, then environment overrides. Command-line flags
//! are applied on top by the binary.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, LoggerConfig};

use anyhow::Context;

/// Keys accepted by `config get` and `config set`
pub const CONFIG_KEYS: &[&str] = &["workers", "outputDir", "dryRun", "logger.level", "logger.ansi"];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "workers" => Ok(config.workers.to_string()),
        "outputDir" => Ok(config.output_dir.display().to_string()),
        "dryRun" => Ok(config.dry_run.to_string()),
        "logger.level" => Ok(config.logger.level.clone()),
        "logger.ansi" => Ok(config.logger.ansi.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "workers" => {
            let workers: usize = value.parse().context("workers must be a number")?;
            if workers == 0 {
                return Err(anyhow::anyhow!("workers must be at least 1"));
            }
            config.workers = workers;
        }
        "outputDir" => {
            config.output_dir = value.into();
        }
        "dryRun" => {
            config.dry_run = value
                .parse()
                .context("dryRun must be 'true' or 'false'")?;
        }
        "logger.level" => {
            tracing_subscriber::EnvFilter::try_new(value)
                .with_context(|| format!("Invalid log filter: {}", value))?;
            config.logger.level = value.to_string();
        }
        "logger.ansi" => {
            config.logger.ansi = value
                .parse()
                .context("logger.ansi must be 'true' or 'false'")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
