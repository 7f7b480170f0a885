//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/gnav/config.json`.
//! It only tunes how gnav talks to the desktop; the workspace names
//! themselves live in a separate document managed by
//! [`NameStore`](crate::store::NameStore).
//!
//! # Example
//!
//! ```json
//! {
//!   "tools": {
//!     "wmctrl": "/usr/bin/wmctrl",
//!     "wofi_args": ["--show", "dmenu", "-i", "--allow-markup"]
//!   },
//!   "feed": { "active_color": "#89b4fa" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Every field is optional — a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// External programs gnav invokes.
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Fuzzy-finder feed formatting.
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Names (or paths) of the external programs and the arguments passed to
/// the fuzzy-finder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub wmctrl: String,
    pub gsettings: String,
    pub wofi: String,
    pub wofi_args: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            wmctrl: "wmctrl".into(),
            gsettings: "gsettings".into(),
            wofi: "wofi".into(),
            wofi_args: ["--show", "dmenu", "-i", "--allow-images", "--allow-markup"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Fuzzy-finder feed formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Pango foreground colour for the active workspace line.
    pub active_color: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            active_color: "#ff5555".into(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/gnav`).
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("gnav")
}

/// Default location of the workspace names document.
pub fn default_names_path() -> PathBuf {
    config_dir().join("workspaces.json")
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
