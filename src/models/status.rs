//! Status model (a toot, or a reblog wrapping one)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Account;

/// Who can see a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible on public timelines
    #[default]
    Public,
    /// Public, but not listed on public timelines
    Unlisted,
    /// Followers only
    Private,
    /// Mentioned accounts only
    Direct,
}

/// A status as returned by a Mastodon-compatible API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Server-side status ID
    pub id: String,
    /// ActivityPub URI
    #[serde(default)]
    pub uri: String,
    /// URL to the status on the web
    pub url: Option<String>,
    /// Author
    pub account: Account,
    /// ID of the status being replied to
    pub in_reply_to_id: Option<String>,
    /// ID of the account being replied to
    pub in_reply_to_account_id: Option<String>,
    /// The reblogged status, when this status is a reblog carrier
    pub reblog: Option<Box<Status>>,
    /// Content (HTML)
    pub content: String,
    /// Plain text content (Pleroma only)
    #[serde(default)]
    pub plain_content: Option<String>,
    /// When the status was created
    pub created_at: DateTime<Utc>,
    /// Number of replies
    #[serde(default)]
    pub replies_count: u32,
    /// Number of reblogs
    #[serde(default)]
    pub reblogs_count: u32,
    /// Number of favourites
    #[serde(default)]
    pub favourites_count: u32,
    /// Whether the current user has reblogged this status
    #[serde(default)]
    pub reblogged: Option<bool>,
    /// Whether the current user has favourited this status
    #[serde(default)]
    pub favourited: Option<bool>,
    /// Whether the current user has muted this conversation
    #[serde(default)]
    pub muted: Option<bool>,
    /// Whether the current user has bookmarked this status
    #[serde(default)]
    pub bookmarked: bool,
    /// Whether media is marked sensitive
    #[serde(default)]
    pub sensitive: bool,
    /// Content warning
    #[serde(default)]
    pub spoiler_text: String,
    /// Visibility
    #[serde(default)]
    pub visibility: Visibility,
    /// Media attachments
    #[serde(default)]
    pub media_attachments: Vec<MediaAttachment>,
    /// Language (ISO 639-1)
    #[serde(default)]
    pub language: Option<String>,
    /// Whether pinned on the author's profile
    #[serde(default)]
    pub pinned: Option<bool>,
}

/// Media attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    /// Attachment ID
    pub id: String,
    /// Media type (image, video, gifv, audio, unknown)
    #[serde(rename = "type")]
    pub media_type: String,
    /// Media URL
    pub url: String,
    /// Preview/thumbnail URL
    pub preview_url: Option<String>,
    /// Alt text description
    pub description: Option<String>,
}

impl Status {
    /// The status whose content is displayed: the reblogged one for reblog
    /// carriers, `self` otherwise.
    pub fn original(&self) -> &Self {
        self.reblog.as_deref().unwrap_or(self)
    }

    /// Whether this status is a reblog carrier
    pub fn is_reblog(&self) -> bool {
        self.reblog.is_some()
    }

    /// Whether this status is `id` or carries a reblog of `id`.
    ///
    /// Reblogs nest a single level deep, so only the direct reblog is checked.
    pub fn references(&self, id: &str) -> bool {
        self.id == id || self.reblog.as_ref().is_some_and(|r| r.id == id)
    }

    /// Plain text content, HTML stripped
    pub fn plain_text(&self) -> String {
        if let Some(plain) = &self.plain_content {
            return plain.clone();
        }

        let content = html_escape::decode_html_entities(&self.content)
            .to_string()
            .replace("<br>", "\n")
            .replace("<br/>", "\n")
            .replace("<br />", "\n")
            .replace("</p><p>", "\n\n");

        regex_lite::Regex::new(r"<[^>]+>")
            .map(|re| re.replace_all(&content, "").to_string())
            .unwrap_or(content)
    }

    /// Get a short preview of the content (for list display)
    pub fn preview(&self, max_len: usize) -> String {
        let content = self.original().plain_text().replace('\n', " ");
        if content.chars().count() <= max_len {
            content
        } else {
            let cut: String = content.chars().take(max_len.saturating_sub(3)).collect();
            format!("{cut}...")
        }
    }

    /// Get relative time string (e.g., "5m", "2h", "3d")
    pub fn relative_time(&self) -> String {
        let duration = Utc::now().signed_duration_since(self.created_at);

        if duration.num_seconds() < 60 {
            format!("{}s", duration.num_seconds())
        } else if duration.num_minutes() < 60 {
            format!("{}m", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h", duration.num_hours())
        } else if duration.num_days() < 7 {
            format!("{}d", duration.num_days())
        } else {
            self.created_at.format("%b %d").to_string()
        }
    }
}
