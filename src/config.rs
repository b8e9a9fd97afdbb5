//! Configuration management
//!
//! Handles the optional user configuration file. The file is only ever read;
//! a missing or broken file falls back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
const APP_DIR: &str = "pulumi-policy-runner";

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Program spawned as the delegated CLI
    #[serde(default = "default_pulumi_binary")]
    pub pulumi_binary: String,

    /// Whether the child gets PULUMI_SKIP_UPDATE_CHECK=true
    #[serde(default = "default_skip_update_check")]
    pub skip_update_check: bool,
}

fn default_pulumi_binary() -> String {
    "pulumi".to_string()
}

fn default_skip_update_check() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pulumi_binary: default_pulumi_binary(),
            skip_update_check: default_skip_update_check(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.config_dir().join(APP_DIR).join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::debug!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::debug!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path.display(), e);
            }
        }

        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.pulumi_binary, "pulumi");
        assert!(config.skip_update_check);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "pulumi_binary": "/opt/pulumi/bin/pulumi" }"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.pulumi_binary, "/opt/pulumi/bin/pulumi");
        assert!(config.skip_update_check);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn skip_update_check_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "skip_update_check": false }"#).unwrap();

        let config = Config::load_from(&path);
        assert!(!config.skip_update_check);
        assert_eq!(config.pulumi_binary, "pulumi");
    }
}
