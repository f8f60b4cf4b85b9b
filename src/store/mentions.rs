//! Mentions view: notifications of type mention

use crate::api::{Scope, TimelineSource};
use crate::error::Result;
use crate::models::{Notification, Status};
use crate::timeline::{StreamEvent, Timeline};

use super::TimelineModule;

/// Passes pages through, keeping only mentions.
///
/// Servers that filter with `exclude_types[]` let notification kinds they
/// added later slip through.
struct MentionsOnly<'a, S>(&'a S);

impl<S: TimelineSource<Notification>> TimelineSource<Notification> for MentionsOnly<'_, S> {
    async fn fetch_latest(&self, scope: &Scope) -> Result<Vec<Notification>> {
        let page = self.0.fetch_latest(scope).await?;
        Ok(page.into_iter().filter(Notification::is_mention).collect())
    }

    async fn fetch_before(&self, scope: &Scope, max_id: &str) -> Result<Vec<Notification>> {
        let page = self.0.fetch_before(scope, max_id).await?;
        Ok(page.into_iter().filter(Notification::is_mention).collect())
    }
}

/// Notifications mentioning the signed-in account
#[derive(Debug, Default)]
pub struct Mentions {
    module: TimelineModule<Notification>,
}

impl Mentions {
    /// Create an empty mentions view
    pub fn new() -> Self {
        Self::default()
    }

    /// The mentions, newest first
    pub fn mentions(&self) -> &Timeline<Notification> {
        self.module.timeline()
    }

    /// The underlying module (flags, lazy-loading handle)
    pub fn module(&self) -> &TimelineModule<Notification> {
        &self.module
    }

    /// Mutable access to the underlying module
    pub fn module_mut(&mut self) -> &mut TimelineModule<Notification> {
        &mut self.module
    }

    /// Load the newest mentions, replacing the list
    pub async fn fetch<S>(&mut self, source: &S) -> Result<Vec<Notification>>
    where
        S: TimelineSource<Notification>,
    {
        let page = self
            .module
            .fetch(&MentionsOnly(source), &Scope::Mentions)
            .await?;
        Ok(page.to_vec())
    }

    /// Load mentions older than `anchor` and add them to the tail
    pub async fn lazy_fetch_mentions<S>(&mut self, source: &S, anchor: &Notification) -> Result<usize>
    where
        S: TimelineSource<Notification>,
    {
        self.module
            .lazy_fetch(&MentionsOnly(source), &Scope::Mentions, anchor)
            .await
    }

    /// Add a live mention at the head unless its status is already listed
    pub fn append_mentions(&mut self, notification: Notification) -> bool {
        self.module.append(notification)
    }

    /// Add older mentions at the tail
    pub fn insert_mentions(&mut self, notifications: Vec<Notification>) -> usize {
        self.module.insert(notifications)
    }

    /// Replace a changed status inside the mentions
    pub fn update_toot(&mut self, status: &Status) -> usize {
        self.module.update(status)
    }

    /// Remove mentions of a deleted status
    pub fn delete_toot(&mut self, id: &str) -> usize {
        self.module.delete(id)
    }

    /// Apply a live event; notifications other than mentions are ignored
    pub fn apply(&mut self, event: StreamEvent) -> bool {
        match event {
            StreamEvent::Notification(n) if !n.is_mention() => false,
            event => self.module.apply(event),
        }
    }
}
