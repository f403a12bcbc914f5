//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Concurrent probe/fetch requests while building the snapshot
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Directory the grouped export directory is created in
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Resolve closures without writing files
    #[serde(default)]
    pub dry_run: bool,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Colour log output
    #[serde(default = "default_true")]
    pub ansi: bool,
}

fn default_workers() -> usize {
    crate::snapshot::DEFAULT_WORKERS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            output_dir: default_output_dir(),
            dry_run: false,
            logger: LoggerConfig::default(),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: default_true(),
        }
    }
}
