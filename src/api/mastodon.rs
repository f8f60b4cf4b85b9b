//! Mastodon API client (also serves Pleroma)

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::models::{Instance, Notification, NotificationType, Sns, Status};

use super::{Scope, TimelineSource};

/// Default page size when none is configured
pub const DEFAULT_LIMIT: usize = 40;

/// Notification types hidden from the mentions view on servers without `types[]`
const NON_MENTION_TYPES: &[NotificationType] = &[
    NotificationType::Follow,
    NotificationType::FollowRequest,
    NotificationType::Favourite,
    NotificationType::Reblog,
    NotificationType::Poll,
    NotificationType::Status,
    NotificationType::Update,
    NotificationType::EmojiReaction,
];

/// Mastodon API client
pub struct MastodonClient {
    client: Client,
    instance: String,
    access_token: String,
    sns: Sns,
    limit: usize,
}

impl MastodonClient {
    /// Create a new client for `instance`
    pub fn new(instance: &str, access_token: &str, sns: Sns) -> Self {
        Self {
            client: Client::new(),
            instance: instance.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            sns,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set the number of entries requested per page
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Server type this client talks to
    pub const fn sns(&self) -> Sns {
        self.sns
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/v1{}", self.instance, endpoint)
    }

    /// Build the full URL for a page of `scope`
    fn page_url(&self, scope: &Scope, max_id: Option<&str>) -> String {
        let (path, mut params) = match scope {
            Scope::Home => ("/timelines/home".to_string(), Vec::new()),
            Scope::Local => (
                "/timelines/public".to_string(),
                vec![("local", "true".to_string())],
            ),
            Scope::Public => ("/timelines/public".to_string(), Vec::new()),
            Scope::Tag(tag) => (
                format!("/timelines/tag/{}", urlencoding::encode(tag)),
                Vec::new(),
            ),
            Scope::List(id) => (
                format!("/timelines/list/{}", urlencoding::encode(id)),
                Vec::new(),
            ),
            Scope::Mentions => ("/notifications".to_string(), self.mention_filter()),
            Scope::Notifications => ("/notifications".to_string(), Vec::new()),
        };

        params.push(("limit", self.limit.to_string()));
        if let Some(max_id) = max_id {
            params.push(("max_id", max_id.to_string()));
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        self.api_url(&format!("{path}?{query}"))
    }

    /// Query parameters restricting notifications to mentions
    fn mention_filter(&self) -> Vec<(&'static str, String)> {
        match self.sns {
            Sns::Mastodon => vec![("types[]", NotificationType::Mention.as_str().to_string())],
            Sns::Pleroma => NON_MENTION_TYPES
                .iter()
                .map(|t| ("exclude_types[]", t.as_str().to_string()))
                .collect(),
        }
    }

    /// Fetch instance metadata (version, character limit)
    pub async fn instance(&self) -> Result<Instance> {
        self.get(&self.api_url("/instance")).await
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(status_error(status, response.text().await));
        }

        Ok(response.json().await?)
    }
}

/// Build the error for a non-success response. An unreadable body is logged
/// and left empty so the status code still reaches the caller.
fn status_error(status: u16, body: reqwest::Result<String>) -> Error {
    let body = body.unwrap_or_else(|e| {
        tracing::debug!("Failed to read body of HTTP {} response: {}", status, e);
        String::new()
    });
    Error::Status { status, body }
}

impl TimelineSource<Status> for MastodonClient {
    async fn fetch_latest(&self, scope: &Scope) -> Result<Vec<Status>> {
        if scope.is_notification() {
            return Err(Error::UnsupportedScope(scope.clone()));
        }
        self.get(&self.page_url(scope, None)).await
    }

    async fn fetch_before(&self, scope: &Scope, max_id: &str) -> Result<Vec<Status>> {
        if scope.is_notification() {
            return Err(Error::UnsupportedScope(scope.clone()));
        }
        self.get(&self.page_url(scope, Some(max_id))).await
    }
}

impl TimelineSource<Notification> for MastodonClient {
    async fn fetch_latest(&self, scope: &Scope) -> Result<Vec<Notification>> {
        if !scope.is_notification() {
            return Err(Error::UnsupportedScope(scope.clone()));
        }
        self.get(&self.page_url(scope, None)).await
    }

    async fn fetch_before(&self, scope: &Scope, max_id: &str) -> Result<Vec<Notification>> {
        if !scope.is_notification() {
            return Err(Error::UnsupportedScope(scope.clone()));
        }
        self.get(&self.page_url(scope, Some(max_id))).await
    }
}
