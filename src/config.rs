//! Settings file (`~/.yatina/config.toml`)
//!
//! All fields default individually, so a partial file only overrides what it
//! names.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::{GrowthConfig, UnlockMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Lesson gating: sequential unlock chain or everything open
    #[serde(default)]
    pub unlock_mode: UnlockMode,

    /// Success probability for the attempt outcome gate
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,

    #[serde(default)]
    pub growth: GrowthConfig,
}

fn default_success_rate() -> f64 {
    0.7
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unlock_mode: UnlockMode::default(),
            success_rate: default_success_rate(),
            growth: GrowthConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}
