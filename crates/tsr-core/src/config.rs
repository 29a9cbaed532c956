// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves layout settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings that decide which panes are shown and where they sit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Show the one-row help bar at the top of the index dialog
    pub help: bool,

    /// Put the status bar above the index instead of below it
    pub status_on_top: bool,

    /// Show the folder sidebar
    pub sidebar_visible: bool,

    /// Sidebar width in columns
    pub sidebar_width: u16,

    /// Put the sidebar on the right-hand side
    pub sidebar_on_right: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            help: true,
            status_on_top: false,
            sidebar_visible: false,
            sidebar_width: 20,
            sidebar_on_right: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pane visibility and placement
    pub layout: LayoutSettings,

    /// Text wrap column.
    /// 0 = full width, >0 = wrap at this column, <0 = keep a right margin of |wrap|
    pub wrap: i16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            wrap: 0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl Config {
    /// Get the default config file path (~/.config/tessera/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tessera").join("config.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
