//! Configuration - ~/.orchestrium/config.yml
//!
//! Every key is optional; missing keys keep their defaults.
//!
//! ```yaml
//! workflows_dir: /srv/orchestrium/workflows
//! locale: en
//! layout:
//!   horizontal_spacing: 350
//!   vertical_spacing: 150
//!   baseline: 200
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::LayoutConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one sub-directory per workflow
    pub workflows_dir: PathBuf,
    /// Locale tag passed to the schedule describer
    pub locale: String,
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workflows_dir: PathBuf::from("workflows"),
            locale: "en".to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Config {
    /// Get the default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".orchestrium")
            .join("config.yml")
    }

    /// Load config from default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load config from a specific path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, workflows_dir: Option<PathBuf>, locale: Option<String>) -> Self {
        if let Some(dir) = workflows_dir {
            self.workflows_dir = dir;
        }
        if let Some(locale) = locale {
            self.locale = locale;
        }
        self
    }
}
