//! Configuration system for yays.
//!
//! Settings are read from `~/.config/yays/config.toml`. Every field is optional in
//! the file and command-line flags always take precedence.
//!
//! # Example
//!
//! ```
//! use yays::config::Config;
//! use yays::sort::SortMode;
//!
//! let config = Config::default();
//! assert_eq!(config.sort, SortMode::Alphanumeric);
//! assert_eq!(config.indent_size, None);
//!
//! let custom = Config {
//!     sort: SortMode::Human,
//!     ..Config::default()
//! };
//! assert!(!custom.create_backup);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::sort::SortMode;

/// Configuration for the yays application.
///
/// # Fields
///
/// * `sort` - Sort mode used when `--sort` is not given (default: alphanumeric)
/// * `indent_size` - Fixed output indentation; detected from the input when unset
/// * `create_backup` - Copy the file to `<name>.bak` before writing it (default: false)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default sort mode for mapping keys
    #[serde(default)]
    pub sort: SortMode,

    /// Number of spaces per indentation level, overriding detection
    #[serde(default)]
    pub indent_size: Option<usize>,

    /// Create .bak files before writing
    #[serde(default)]
    pub create_backup: bool,
}

impl Default for Config {
    /// Creates a new configuration with default values.
    ///
    /// # Default Values
    ///
    /// * `sort`: alphanumeric
    /// * `indent_size`: none (detect)
    /// * `create_backup`: false
    fn default() -> Self {
        Self {
            sort: SortMode::default(),
            indent_size: None,
            create_backup: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yays/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yays");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(err) => {
                warn!("ignoring {}: {:#}", config_path.display(), err);
                Self::default()
            }
        }
    }

    /// Loads configuration from a specific file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Saves configuration to a specific file, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;

        Ok(())
    }

    /// Returns the output indentation: the configured size, else the detected one.
    pub fn effective_indent(&self, detected: usize) -> usize {
        self.indent_size.unwrap_or(detected).max(1)
    }
}
