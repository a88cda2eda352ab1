//! Configuration loading and management

mod settings;

pub use settings::{EndpointSettings, GuiSettings, SubmitSettings};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Save endpoint
    #[serde(default)]
    pub endpoint: EndpointSettings,

    /// Submission behaviour
    #[serde(default)]
    pub submit: SubmitSettings,

    /// Window and grid layout
    #[serde(default)]
    pub gui: GuiSettings,
}

impl Config {
    /// Get the global config directory path (~/.holiday-grid/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".holiday-grid")
    }

    /// Get the global config file path (~/.holiday-grid/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load the explicit config file if given, else the global one, else defaults.
    ///
    /// An explicit path must exist; a missing global file is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let global = Self::global_config_path();
        if global.exists() {
            debug!("[holiday-grid:config] Loading {}", global.display());
            return Self::from_file(&global);
        }

        debug!("[holiday-grid:config] No config file, using defaults");
        Ok(Self::default())
    }
}
