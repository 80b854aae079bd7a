use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::file_utils::FileManager;
use crate::session::{ReaderSettings, ReadingScope};
use crate::text::document::Tradition;
use crate::text::pagination::PageUnit;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Tradition selected when a reader starts
    #[serde(default)]
    pub default_tradition: Tradition,

    /// Layout of the reading surface
    #[serde(default)]
    pub reading: ReadingConfig,

    /// Directory holding document JSON files and the manifest
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Layout of the reading surface
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReadingConfig {
    // @field: Budget per page, in `page_unit`
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    // @field: What counts toward the page budget
    #[serde(default)]
    pub page_unit: PageUnit,

    // @field: Show a marker before each verse group
    #[serde(default = "default_true")]
    pub include_group_boundaries: bool,

    // @field: Whole reading or one group at a time
    #[serde(default)]
    pub scope: ReadingScope,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_unit: PageUnit::default(),
            include_group_boundaries: default_true(),
            scope: ReadingScope::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_page_size() -> usize {
    120
}

fn default_true() -> bool {
    true
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("tikkun"))
        .unwrap_or_else(|| PathBuf::from("data"))
        .to_string_lossy()
        .to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reading.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.reading.page_size));
        }

        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        Ok(())
    }

    /// Load the configuration, writing a default one first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !FileManager::file_exists(path) {
            warn!("Config file not found at {:?}, creating default config.", path);
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let json = FileManager::read_to_string(path)?;
        let config: Config = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save the configuration as pretty JSON, replacing the file atomically
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        FileManager::write_atomic(path, &json)
    }

    /// Directory holding document files
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Reader settings derived from this configuration
    pub fn reader_settings(&self) -> ReaderSettings {
        ReaderSettings {
            tradition: self.default_tradition,
            page_size: self.reading.page_size,
            page_unit: self.reading.page_unit,
            include_group_boundaries: self.reading.include_group_boundaries,
            scope: self.reading.scope,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_tradition: Tradition::default(),
            reading: ReadingConfig::default(),
            data_dir: default_data_dir(),
            log_level: LogLevel::default(),
        }
    }
}
