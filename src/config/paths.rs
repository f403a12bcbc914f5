//! Cross-platform directory path resolution
//!
//! - Linux/macOS: XDG Base Directory specification (~/.config, ~/.local/share)
//! - Windows: Known Folder API (AppData\Roaming, AppData\Local)

use std::path::{Path, PathBuf};

const APP_NAME: &str = "kgrouper";

/// Get the configuration directory path
///
/// Checks KGROUPER_CONFIG_DIR first, then falls back to:
/// - Unix (Linux/macOS): XDG_CONFIG_HOME/kgrouper or ~/.config/kgrouper
/// - Windows: %APPDATA%\kgrouper\config
pub fn config_dir() -> PathBuf {
    std::env::var("KGROUPER_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            #[cfg(windows)]
            {
                use directories::ProjectDirs;
                ProjectDirs::from("", "", APP_NAME)
                    .map(|dirs| dirs.config_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            }
            #[cfg(not(windows))]
            {
                use directories::BaseDirs;
                std::env::var("XDG_CONFIG_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        BaseDirs::new()
                            .map(|dirs| dirs.home_dir().join(".config"))
                            .unwrap_or_else(|| PathBuf::from(".").join(".config"))
                    })
                    .join(APP_NAME)
            }
        })
}

/// Get the data directory path
///
/// Checks KGROUPER_DATA_DIR first, then falls back to:
/// - Unix (Linux/macOS): XDG_DATA_HOME/kgrouper or ~/.local/share/kgrouper
/// - Windows: %LOCALAPPDATA%\kgrouper\data
pub fn data_dir() -> PathBuf {
    std::env::var("KGROUPER_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            #[cfg(windows)]
            {
                use directories::ProjectDirs;
                ProjectDirs::from("", "", APP_NAME)
                    .map(|dirs| dirs.data_dir().to_path_buf())
                    .unwrap_or_else(|| {
                        PathBuf::from(".")
                            .join(".local")
                            .join("share")
                            .join(APP_NAME)
                    })
            }
            #[cfg(not(windows))]
            {
                use directories::BaseDirs;
                std::env::var("XDG_DATA_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        BaseDirs::new()
                            .map(|dirs| dirs.home_dir().join(".local").join("share"))
                            .unwrap_or_else(|| PathBuf::from(".").join(".local").join("share"))
                    })
                    .join(APP_NAME)
            }
        })
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Get the context-specific config file path
pub fn context_config_path(context: &str) -> PathBuf {
    data_dir()
        .join("contexts")
        .join(context)
        .join("config.yaml")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let dir = config_dir();
        assert!(dir.to_string_lossy().contains("kgrouper") || std::env::var("KGROUPER_CONFIG_DIR").is_ok());
    }

    #[test]
    fn test_context_config_path() {
        let path = context_config_path("prod-east");
        assert!(path.ends_with("contexts/prod-east/config.yaml"));
    }
}
