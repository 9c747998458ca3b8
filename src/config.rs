//! Configuration file support for dcmview.
//!
//! Preferences are stored as versioned JSON, either at an explicit path or in
//! the platform config directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ANONYMIZED_FIELDS, DEFAULT_CINE_SIZE, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_TILE_COLUMNS,
    DEFAULT_TILE_SIZE, DEFAULT_TOKEN_LENGTH,
};
use crate::data::DecoderRegistry;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// Display, playback and anonymization preferences.
///
/// Every field has a default so partial files load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Columns in the tile grid
    #[serde(default = "default_tile_columns")]
    pub tile_columns: usize,

    /// Tile edge length in exported contact sheets
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,

    /// Frame edge length in exported cine loops
    #[serde(default = "default_cine_size")]
    pub cine_size: u32,

    /// Playback interval in milliseconds
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Random digits appended to the anonymization prefix
    #[serde(default = "default_token_length")]
    pub token_length: usize,

    /// Fields rewritten by the anonymizer
    #[serde(default = "default_anonymized_fields")]
    pub anonymized_fields: Vec<String>,

    /// Extensions picked up when scanning a folder.
    /// Defaults to every extension a built-in decoder reads.
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Vec<String>,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_tile_columns() -> usize {
    DEFAULT_TILE_COLUMNS
}

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

fn default_cine_size() -> u32 {
    DEFAULT_CINE_SIZE
}

fn default_frame_interval_ms() -> u64 {
    DEFAULT_FRAME_INTERVAL_MS
}

fn default_token_length() -> usize {
    DEFAULT_TOKEN_LENGTH
}

fn default_anonymized_fields() -> Vec<String> {
    ANONYMIZED_FIELDS.iter().map(|s| s.to_string()).collect()
}

fn default_file_extensions() -> Vec<String> {
    DecoderRegistry::new()
        .supported_extensions()
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl Preferences {
    /// Playback interval as a duration.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tile_columns: default_tile_columns(),
            tile_size: default_tile_size(),
            cine_size: default_cine_size(),
            frame_interval_ms: default_frame_interval_ms(),
            token_length: default_token_length(),
            anonymized_fields: default_anonymized_fields(),
            file_extensions: default_file_extensions(),
            log_level: LogLevel::default(),
        }
    }
}

impl ViewerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: Preferences::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Read configuration from an explicit file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Write configuration to an explicit file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get the default config filename.
    pub fn default_filename() -> &'static str {
        "dcmview-config.json"
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("dcmview").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("dcmview")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
