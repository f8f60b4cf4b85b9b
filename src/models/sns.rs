//! Server software type definitions

use serde::{Deserialize, Serialize};

/// Supported server implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sns {
    /// Mastodon
    #[default]
    Mastodon,
    /// Pleroma (and Akkoma)
    Pleroma,
}

impl Sns {
    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mastodon => "Mastodon",
            Self::Pleroma => "Pleroma",
        }
    }
}

impl std::fmt::Display for Sns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
