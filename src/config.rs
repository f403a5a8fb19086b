//! Configuration file parser for ~/.config/instacats/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged as warnings, since they are
//! usually typos.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::records::DEFAULT_RECORDS_KEY;

/// Data file loaded when neither config nor CLI names one.
pub const DEFAULT_DATA_FILE: &str = "InstaCats.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },
}

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the record file inside the resource bundle (`base.ext`).
    pub data_file: String,

    /// Resource bundle directory. `None` uses the bundle shipped with the crate.
    pub resource_dir: Option<PathBuf>,

    /// Top-level JSON key holding the record list.
    pub records_key: String,

    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Custom keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            resource_dir: None,
            records_key: DEFAULT_RECORDS_KEY.to_string(),
            theme: "dark".to_string(),
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Largest config file accepted (1 MiB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 5] = [
        "data_file",
        "resource_dir",
        "records_key",
        "theme",
        "keybindings",
    ];

    /// Load configuration from a TOML file.
    ///
    /// A missing, empty or whitespace-only file gives `Config::default()`.
    /// Invalid TOML is an error; unknown keys are only warned about.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match Self::read_bounded(path)? {
            Some(content) => Self::parse(&content),
            None => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read the file if it exists and is within `MAX_FILE_SIZE`.
    fn read_bounded(path: &Path) -> Result<Option<String>, ConfigError> {
        let meta = match std::fs::metadata(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            other => other?,
        };
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(ConfigError::TooLarge {
                size: meta.len(),
                max: Self::MAX_FILE_SIZE,
            });
        }

        // The file can vanish between the two calls
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            data_file = %config.data_file,
            theme = %config.theme,
            "Loaded configuration"
        );
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
