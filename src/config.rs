//! Configuration module for tag-crucible
//!
//! Configuration is stored as TOML in the user's config directory and may be
//! overridden with `TAG_CRUCIBLE_*` environment variables, e.g.
//! `TAG_CRUCIBLE_QUIET=true` or `TAG_CRUCIBLE_SCAN__DEFAULT_DEPTH=3`.

use crate::scan::DEFAULT_DEPTH;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "tag-crucible";
const ENV_PREFIX: &str = "TAG_CRUCIBLE";

/// Widest header label before the path is shortened
pub const DEFAULT_MAX_PATH_LENGTH: usize = 50;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CrucibleConfig {
    /// Tag database location; the data directory when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default)]
    pub scan: ScanSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Log destination for the explorer, which cannot log to the terminal
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    #[serde(default = "default_depth")]
    pub default_depth: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            default_depth: DEFAULT_DEPTH,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    #[serde(default = "default_max_path_length")]
    pub max_path_length: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
        }
    }
}

const fn default_depth() -> usize {
    DEFAULT_DEPTH
}

const fn default_max_path_length() -> usize {
    DEFAULT_MAX_PATH_LENGTH
}

impl CrucibleConfig {
    /// Get the path to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Load the default config file, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Database path, falling back to the local data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join(APP_DIR).join("tags.db"))
    }
}
