//! Instance metadata

use serde::{Deserialize, Serialize};

use super::Sns;

/// Subset of `/api/v1/instance` the client cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Domain
    pub uri: String,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Server version string
    #[serde(default)]
    pub version: String,
    /// Character limit (Pleroma, glitch-soc)
    #[serde(default)]
    pub max_toot_chars: Option<u32>,
    /// Server configuration (Mastodon 3.5+)
    #[serde(default)]
    pub configuration: Option<InstanceConfiguration>,
}

/// Server configuration block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceConfiguration {
    /// Status limits
    pub statuses: StatusConfiguration,
}

/// Status limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfiguration {
    /// Character limit
    pub max_characters: u32,
}

impl Instance {
    /// Server software, judged from the version string
    pub fn sns(&self) -> Sns {
        if self.version.contains("Pleroma") || self.version.contains("Akkoma") {
            Sns::Pleroma
        } else {
            Sns::Mastodon
        }
    }

    /// Character limit advertised by the server, if any
    pub fn toot_max(&self) -> Option<u32> {
        self.max_toot_chars.or_else(|| {
            self.configuration
                .as_ref()
                .map(|c| c.statuses.max_characters)
        })
    }
}
