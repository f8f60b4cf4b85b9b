//! Per-account state shared by every view of one account

use crate::api::MastodonClient;
use crate::config::{Config, TimelineSetting};
use crate::error::Result;
use crate::models::Sns;

/// Character limit used until the instance reports its own
pub const DEFAULT_TOOT_MAX: u32 = 500;

/// The signed-in account a timeline space belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAccount {
    /// Instance base URL
    pub base_url: String,
    /// Username on the instance
    pub username: String,
    /// OAuth access token
    pub access_token: String,
}

/// Account-wide settings and status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineSpace {
    /// Signed-in account, `None` until one is bound
    pub account: Option<LocalAccount>,
    /// Server software of the account's instance
    pub sns: Sns,
    /// Whether the space is loading its initial data
    pub loading: bool,
    /// Character limit for new toots
    pub toot_max: u32,
    /// Timeline display settings
    pub timeline_setting: TimelineSetting,
    page_limit: usize,
}

impl Default for TimelineSpace {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl TimelineSpace {
    /// Create a space with nothing bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a space from configuration, binding its account when one is set up
    pub fn from_config(config: &Config) -> Self {
        let account = match (&config.instance, &config.access_token) {
            (Some(base_url), Some(access_token)) => Some(LocalAccount {
                base_url: base_url.clone(),
                username: config.username.clone().unwrap_or_default(),
                access_token: access_token.clone(),
            }),
            _ => None,
        };

        Self {
            account,
            sns: config.sns,
            loading: false,
            toot_max: config.toot_max,
            timeline_setting: config.timeline,
            page_limit: config.page_limit,
        }
    }

    /// Set the character limit, falling back to [`DEFAULT_TOOT_MAX`]
    pub fn update_toot_max(&mut self, value: Option<u32>) {
        self.toot_max = value.unwrap_or(DEFAULT_TOOT_MAX);
    }

    /// API client for the bound account
    pub fn client(&self) -> Option<MastodonClient> {
        self.account.as_ref().map(|account| {
            MastodonClient::new(&account.base_url, &account.access_token, self.sns)
                .with_limit(self.page_limit)
        })
    }

    /// Ask the instance for its server type and character limit.
    ///
    /// `loading` is set for the duration and cleared afterwards, also on
    /// failure. Does nothing without a bound account.
    pub async fn detect_instance(&mut self) -> Result<()> {
        let Some(client) = self.client() else {
            return Ok(());
        };

        self.loading = true;
        let instance = client.instance().await;
        self.loading = false;

        let instance = instance.inspect_err(|e| {
            tracing::warn!("Failed to fetch instance info: {}", e);
        })?;

        self.sns = instance.sns();
        self.update_toot_max(instance.toot_max());
        tracing::debug!("Instance {} is {} (toot max {})", instance.uri, self.sns, self.toot_max);
        Ok(())
    }
}
