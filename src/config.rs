//! Configuration module for Roost

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::mastodon::DEFAULT_LIMIT;
use crate::models::Sns;
use crate::store::DEFAULT_TOOT_MAX;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Instance base URL (e.g. `https://mastodon.social`)
    #[serde(default)]
    pub instance: Option<String>,

    /// Server software of the instance
    #[serde(default)]
    pub sns: Sns,

    /// Username of the signed-in account
    #[serde(default)]
    pub username: Option<String>,

    /// OAuth access token for the instance
    #[serde(default)]
    pub access_token: Option<String>,

    /// Number of entries to fetch per page
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,

    /// Character limit for new toots, until the instance reports its own
    #[serde(default = "default_toot_max")]
    pub toot_max: u32,

    /// Timeline display settings
    #[serde(default)]
    pub timeline: TimelineSetting,
}

/// Timeline display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimelineSetting {
    /// Expand content warnings by default
    #[serde(default)]
    pub cw: bool,
    /// Show sensitive media without a click-through
    #[serde(default)]
    pub nsfw: bool,
}

fn default_page_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_toot_max() -> u32 {
    DEFAULT_TOOT_MAX
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instance: None,
            sns: Sns::default(),
            username: None,
            access_token: None,
            page_limit: default_page_limit(),
            toot_max: default_toot_max(),
            timeline: TimelineSetting::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("roost");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }
}
