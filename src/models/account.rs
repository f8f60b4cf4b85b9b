//! Remote account model (as returned by the Mastodon API)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account on a Mastodon-compatible instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Server-side account ID
    pub id: String,
    /// Username without the instance part
    pub username: String,
    /// `username` for local accounts, `username@domain` for remote ones
    #[serde(default)]
    pub acct: String,
    /// Display name
    #[serde(default)]
    pub display_name: String,
    /// Whether follow requests need manual approval
    #[serde(default)]
    pub locked: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Number of followers
    #[serde(default)]
    pub followers_count: u32,
    /// Number of accounts followed
    #[serde(default)]
    pub following_count: u32,
    /// Number of statuses posted
    #[serde(default)]
    pub statuses_count: u32,
    /// Profile bio (HTML)
    #[serde(default)]
    pub note: String,
    /// Profile page URL
    #[serde(default)]
    pub url: String,
    /// Avatar URL
    #[serde(default)]
    pub avatar: String,
    /// Static avatar URL
    #[serde(default)]
    pub avatar_static: String,
    /// Header image URL
    #[serde(default)]
    pub header: String,
    /// Static header image URL
    #[serde(default)]
    pub header_static: String,
    /// Whether the account is an automated bot
    #[serde(default)]
    pub bot: Option<bool>,
}

impl Account {
    /// Get the full handle with instance (e.g. `@user@pleroma.io`)
    pub fn full_handle(&self) -> String {
        if self.acct.is_empty() {
            format!("@{}", self.username)
        } else {
            format!("@{}", self.acct)
        }
    }
}
