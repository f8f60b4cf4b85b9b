//! Live events pushed by the streaming API

use crate::models::{Notification, Status};

/// An event from a server push channel
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A new status arrived
    Update(Status),
    /// A new notification arrived
    Notification(Notification),
    /// A known status changed (edit, favourite, reblog, bookmark counts)
    StatusUpdate(Status),
    /// A status was deleted
    Delete(String),
}

impl StreamEvent {
    /// Short name for logging
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Update(_) => "update",
            Self::Notification(_) => "notification",
            Self::StatusUpdate(_) => "status.update",
            Self::Delete(_) => "delete",
        }
    }
}
