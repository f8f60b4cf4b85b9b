//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Account, Status};

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Someone mentioned the current user
    Mention,
    /// Someone reblogged a status
    Reblog,
    /// Someone favourited a status
    Favourite,
    /// Someone followed the current user
    Follow,
    /// Someone requested to follow the current user
    FollowRequest,
    /// A poll has ended
    Poll,
    /// Someone the user enabled notifications for has posted
    Status,
    /// A status the user interacted with was edited
    Update,
    /// Emoji reaction (Pleroma)
    #[serde(rename = "pleroma:emoji_reaction")]
    EmojiReaction,
    /// Anything this client does not know about yet
    #[serde(other)]
    Other,
}

impl NotificationType {
    /// Get the type as the API spells it
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mention => "mention",
            Self::Reblog => "reblog",
            Self::Favourite => "favourite",
            Self::Follow => "follow",
            Self::FollowRequest => "follow_request",
            Self::Poll => "poll",
            Self::Status => "status",
            Self::Update => "update",
            Self::EmojiReaction => "pleroma:emoji_reaction",
            Self::Other => "other",
        }
    }
}

/// A notification, optionally wrapping the status it is about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Server-side notification ID
    pub id: String,
    /// Account that triggered the notification
    pub account: Account,
    /// Status the notification is about, if any
    #[serde(default)]
    pub status: Option<Status>,
    /// Notification kind
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// When the notification was created
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Whether this is a mention
    pub fn is_mention(&self) -> bool {
        self.kind == NotificationType::Mention
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_unknown_type() {
        let json = r#"{
            "id": "9",
            "account": { "id": "2", "username": "h3poteto", "created_at": "2019-03-26T21:30:32Z" },
            "status": null,
            "type": "admin.sign_up",
            "created_at": "2019-04-01T17:01:32Z"
        }"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.kind, NotificationType::Other);
        assert!(notification.status.is_none());
    }

    #[test]
    fn test_deserialize_pleroma_reaction() {
        let json = r#"{
            "id": "10",
            "account": { "id": "2", "username": "h3poteto", "created_at": "2019-03-26T21:30:32Z" },
            "type": "pleroma:emoji_reaction",
            "created_at": "2019-04-01T17:01:32Z"
        }"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.kind, NotificationType::EmojiReaction);
        assert!(!notification.is_mention());
    }
}
