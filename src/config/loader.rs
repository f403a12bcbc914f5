//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Context-specific config
    /// 3. Root config
    /// 4. Built-in defaults
    ///
    /// Files are merged key by key, so a context file only needs the keys it
    /// changes. Missing files are skipped; unreadable ones are errors.
    pub fn load(context: Option<&str>) -> Result<Config> {
        let mut merged = Value::Mapping(Default::default());

        if let Some(root) = Self::load_layer(&paths::root_config_path())? {
            merge_values(&mut merged, root);
        }

        if let Some(context_name) = context {
            if let Some(layer) = Self::load_layer(&paths::context_config_path(context_name))? {
                merge_values(&mut merged, layer);
            }
        }

        let config: Config =
            serde_yaml::from_value(merged).context("Failed to merge configuration layers")?;

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a single file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn load_layer(path: &Path) -> Result<Option<Value>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let value: Value = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        // An empty file parses to null
        Ok(match value {
            Value::Null => None,
            other => Some(other),
        })
    }

    /// Validate configuration by loading and checking for errors
    ///
    /// Fails on invalid YAML, wrong value types, or a worker count of zero.
    pub fn validate(context: Option<&str>) -> Result<()> {
        let root_path = paths::root_config_path();
        if root_path.exists() {
            Self::load_file(&root_path)?;
        }

        if let Some(context_name) = context {
            let context_path = paths::context_config_path(context_name);
            if context_path.exists() {
                Self::load_file(&context_path)?;
            }
        }

        let config = Self::load(context).context("Failed to load merged configuration")?;
        if config.workers == 0 {
            return Err(anyhow::anyhow!("workers must be at least 1"));
        }

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        if let Ok(workers) = std::env::var("KGROUPER_WORKERS") {
            match workers.parse::<usize>() {
                Ok(val) => config.workers = val,
                Err(_) => tracing::warn!("Ignoring invalid KGROUPER_WORKERS: {}", workers),
            }
        }

        if let Ok(output_dir) = std::env::var("KGROUPER_OUTPUT_DIR") {
            config.output_dir = output_dir.into();
        }

        if let Ok(level) = std::env::var("KGROUPER_LOG_LEVEL") {
            config.logger.level = level;
        }

        if let Ok(dry_run) = std::env::var("KGROUPER_DRY_RUN") {
            if let Ok(val) = dry_run.parse::<bool>() {
                config.dry_run = val;
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }

    /// Save context-specific configuration
    pub fn save_context(config: &Config, context: &str) -> Result<()> {
        Self::save(config, &paths::context_config_path(context))
    }
}

/// Overlay `overlay` onto `base`, recursing into mappings
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
