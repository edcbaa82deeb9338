//! Configuration handling for pkgsync
//!
//! Configuration is stored in `~/.config/pkgsync/config.toml`. The
//! directory can be moved with `PKGSYNC_CONFIG_DIR`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "PKGSYNC_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How packages are produced and consumed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Executable implementing the package protocol
    pub command: Option<String>,

    /// Extra arguments passed to the command
    pub args: Vec<String>,

    /// Extension forced onto exported package paths
    pub extension: String,

    /// Include subfolders of the exported folder
    pub recurse: bool,

    /// Let the service prompt before importing
    pub interactive_import: bool,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: vec![],
            extension: "unitypackage".to_string(),
            recurse: true,
            interactive_import: false,
        }
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Package service settings
    pub package: PackageConfig,
}

impl Config {
    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = match Self::config_dir() {
            Some(dir) => dir.join("config.toml"),
            None => return Ok(Self::default()),
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        Self::parse(&content).context("Failed to load config")
    }

    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }

        ProjectDirs::from("dev", "pkgsync", "pkgsync").map(|dirs| dirs.config_dir().to_path_buf())
    }
}
