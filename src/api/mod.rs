//! Remote timeline sources

pub mod mastodon;

pub use mastodon::MastodonClient;

use crate::error::Result;

/// Which remote timeline a page is fetched from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Home timeline of the signed-in account
    Home,
    /// Public timeline restricted to the local instance
    Local,
    /// Federated public timeline
    Public,
    /// Hashtag timeline (tag name without the leading `#`)
    Tag(String),
    /// List timeline (list ID)
    List(String),
    /// Notifications of type mention
    Mentions,
    /// All notifications
    Notifications,
}

impl Scope {
    /// Whether this scope yields notifications rather than statuses
    pub const fn is_notification(&self) -> bool {
        matches!(self, Self::Mentions | Self::Notifications)
    }

    /// Parse a scope from a CLI-style name (`home`, `local`, `#tag`, `list:42`, ...)
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(tag) = s.strip_prefix('#').or_else(|| s.strip_prefix("tag:")) {
            return (!tag.is_empty()).then(|| Self::Tag(tag.to_string()));
        }
        if let Some(id) = s.strip_prefix("list:") {
            return (!id.is_empty()).then(|| Self::List(id.to_string()));
        }
        match s.to_lowercase().as_str() {
            "home" => Some(Self::Home),
            "local" => Some(Self::Local),
            "public" | "federated" => Some(Self::Public),
            "mentions" => Some(Self::Mentions),
            "notifications" => Some(Self::Notifications),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Local => write!(f, "local"),
            Self::Public => write!(f, "public"),
            Self::Tag(tag) => write!(f, "tag:{tag}"),
            Self::List(id) => write!(f, "list:{id}"),
            Self::Mentions => write!(f, "mentions"),
            Self::Notifications => write!(f, "notifications"),
        }
    }
}

/// A remote source of timeline pages.
///
/// Both calls return entries newest-first. `T` is the entry type the scope
/// yields ([`Status`](crate::models::Status) or
/// [`Notification`](crate::models::Notification)).
#[allow(async_fn_in_trait)]
pub trait TimelineSource<T> {
    /// Fetch the newest page of `scope`
    async fn fetch_latest(&self, scope: &Scope) -> Result<Vec<T>>;

    /// Fetch the page of `scope` older than the entry with ID `max_id`
    async fn fetch_before(&self, scope: &Scope, max_id: &str) -> Result<Vec<T>>;
}
