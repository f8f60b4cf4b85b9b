//! Data models for Mastodon-compatible entities

mod account;
mod instance;
mod notification;
mod sns;
mod status;

pub use account::Account;
pub use instance::{Instance, InstanceConfiguration, StatusConfiguration};
pub use notification::{Notification, NotificationType};
pub use sns::Sns;
pub use status::{MediaAttachment, Status, Visibility};
