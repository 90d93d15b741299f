use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::license::discovery::DEFAULT_SOURCE_EXTENSION;
use crate::license::DEFAULT_LICENSE_FILENAME;
use crate::Result;

pub const CONFIG_FILENAME: &str = "license-updater.toml";
pub const ENV_PREFIX: &str = "LICENSE_UPDATER";

/// Main configuration structure for the license updater
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub project: ProjectConfig,
    pub logging: LoggingConfig,
}

/// Which files receive a license header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub extension: String,
}

/// Project license file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub filename: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub target: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_SOURCE_EXTENSION.to_string(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_LICENSE_FILENAME.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(), // pretty, json, compact
            target: "stderr".to_string(), // stdout, stderr
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (LICENSE_UPDATER_*)
    /// 2. license-updater.toml in the current directory (if exists)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_dir(&std::env::current_dir()?)
    }

    /// Load configuration with `license-updater.toml` looked up in `dir`
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_file = dir.join(CONFIG_FILENAME);
        let file = config_file.exists().then_some(config_file);
        Self::build(file.as_deref())
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(config::ConfigError::NotFound(path.display().to_string()).into());
        }
        Self::build(Some(path))
    }

    fn build(file: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(file) = file {
            builder = builder.add_source(File::from(file));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("_")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize::<Config>()?)
    }
}
