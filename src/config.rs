//! TOML configuration.
//!
//! Looked up at `<config_dir>/zcalc/config.toml`. A missing file means
//! defaults; every key is optional.
//!
//! ```toml
//! angle_mode = "radians"
//!
//! [limits]
//! max_length = 1000
//! max_depth = 100
//!
//! [display]
//! thousands_separator = true
//!
//! [history]
//! enabled = true
//! max_entries = 100
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculator::{AngleMode, Limits, MAX_DEPTH_CEILING};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Angle mode used by trig functions unless overridden per call.
    pub angle_mode: AngleMode,
    pub limits: Limits,
    pub display: DisplayConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub thousands_separator: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            thousands_separator: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 100,
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    /// Load the config from `path`, or from [`Config::default_path`] when `None`.
    ///
    /// An explicit path must exist; the default path may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse a config, capping `limits.max_depth` at [`MAX_DEPTH_CEILING`].
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(text)?;
        if config.limits.max_depth > MAX_DEPTH_CEILING {
            warn!(
                requested = config.limits.max_depth,
                ceiling = MAX_DEPTH_CEILING,
                "limits.max_depth too large, capping"
            );
            config.limits.max_depth = MAX_DEPTH_CEILING;
        }
        Ok(config)
    }
}
