//! Configuration file support for jsx-source.
//!
//! Loads optional `jsx-source.toml` from the working directory:
//!
//! ```toml
//! root = "/project/"
//!
//! [options]
//! attribute = "data-source"
//! ignore_tags = ["Fragment", "Show"]
//! disabled = false
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::error::{Error, Result};
use crate::options::PluginOptions;

pub const CONFIG_FILE_NAME: &str = "jsx-source.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JsxSourceConfig {
    /// Prefix stripped from file paths in generated locations.
    pub root: Option<String>,
    /// Plugin options, same keys as the JS plugin (`ignoreTags` or `ignore_tags`).
    pub options: PluginOptions,
}

impl JsxSourceConfig {
    /// Load config from `jsx-source.toml` in the given directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(dir: &Path) -> Self {
        Self::load_from_path(&dir.join(CONFIG_FILE_NAME))
    }

    /// Load config from a specific path, falling back to defaults.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::try_load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from a path that must exist and be valid.
    pub fn try_load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&content).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.options.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}
