//! Fixtures and source doubles shared by unit tests

use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use tokio::sync::Notify;

use crate::api::{Scope, TimelineSource};
use crate::error::{Error, Result};
use crate::models::{Account, Notification, NotificationType, Status, Visibility};

pub fn account(id: &str) -> Account {
    Account {
        id: id.to_string(),
        username: "h3poteto".to_string(),
        acct: "h3poteto@pleroma.io".to_string(),
        display_name: "h3poteto".to_string(),
        locked: false,
        created_at: Utc.with_ymd_and_hms(2019, 3, 26, 21, 30, 32).unwrap(),
        followers_count: 10,
        following_count: 10,
        statuses_count: 100,
        note: "engineer".to_string(),
        url: "https://pleroma.io".to_string(),
        avatar: String::new(),
        avatar_static: String::new(),
        header: String::new(),
        header_static: String::new(),
        bot: Some(false),
    }
}

pub fn status(id: &str) -> Status {
    Status {
        id: id.to_string(),
        uri: "http://example.com".to_string(),
        url: Some("http://example.com".to_string()),
        account: account("1"),
        in_reply_to_id: None,
        in_reply_to_account_id: None,
        reblog: None,
        content: "hoge".to_string(),
        plain_content: None,
        created_at: Utc.with_ymd_and_hms(2019, 3, 26, 21, 40, 32).unwrap(),
        replies_count: 0,
        reblogs_count: 0,
        favourites_count: 0,
        reblogged: None,
        favourited: None,
        muted: None,
        bookmarked: false,
        sensitive: false,
        spoiler_text: String::new(),
        visibility: Visibility::Public,
        media_attachments: Vec::new(),
        language: None,
        pinned: None,
    }
}

/// A status `id` carrying a reblog of `original`
pub fn reblog(id: &str, original: Status) -> Status {
    Status {
        reblog: Some(Box::new(original)),
        ..status(id)
    }
}

pub fn mention(id: &str, status: Option<Status>) -> Notification {
    notification(id, NotificationType::Mention, status)
}

pub fn notification(id: &str, kind: NotificationType, status: Option<Status>) -> Notification {
    Notification {
        id: id.to_string(),
        account: account("2"),
        status,
        kind,
        created_at: Utc.with_ymd_and_hms(2019, 4, 1, 17, 1, 32).unwrap(),
    }
}

/// Canned source: returns fixed pages and records every request
pub struct MockSource<T> {
    pub latest: Vec<T>,
    pub before: Vec<T>,
    pub fail: bool,
    pub calls: Mutex<Vec<(Scope, Option<String>)>>,
}

impl<T> MockSource<T> {
    pub fn new(latest: Vec<T>, before: Vec<T>) -> Self {
        Self {
            latest,
            before,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new(), Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<(Scope, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, scope: &Scope, max_id: Option<&str>, page: &[T]) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.calls
            .lock()
            .unwrap()
            .push((scope.clone(), max_id.map(str::to_string)));
        if self.fail {
            return Err(Error::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(page.to_vec())
    }
}

impl<T: Clone> TimelineSource<T> for MockSource<T> {
    async fn fetch_latest(&self, scope: &Scope) -> Result<Vec<T>> {
        self.respond(scope, None, &self.latest)
    }

    async fn fetch_before(&self, scope: &Scope, max_id: &str) -> Result<Vec<T>> {
        self.respond(scope, Some(max_id), &self.before)
    }
}

/// Source whose fetches block until `release` is notified
pub struct GatedSource<T> {
    pub latest: Vec<T>,
    pub before: Vec<T>,
    pub started: Notify,
    pub release: Notify,
}

impl<T> GatedSource<T> {
    pub fn new(before: Vec<T>) -> Self {
        Self {
            latest: Vec::new(),
            before,
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn with_latest(self, latest: Vec<T>) -> Self {
        Self { latest, ..self }
    }

    async fn gate(&self, page: &[T]) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.started.notify_one();
        self.release.notified().await;
        Ok(page.to_vec())
    }
}

impl<T: Clone> TimelineSource<T> for GatedSource<T> {
    async fn fetch_latest(&self, _scope: &Scope) -> Result<Vec<T>> {
        self.gate(&self.latest).await
    }

    async fn fetch_before(&self, _scope: &Scope, _max_id: &str) -> Result<Vec<T>> {
        self.gate(&self.before).await
    }
}
