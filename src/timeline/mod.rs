//! Timeline reconciliation
//!
//! A [`Timeline`] is an ordered, newest-first list of statuses or
//! notifications. Entries arrive from three places: the initial page
//! (replaces everything), live pushes (prepended, duplicates dropped) and
//! backward pagination (appended to the tail). Update and delete events are
//! matched against both an entry's own status and the status it reblogs.

mod backlog;
mod event;
mod lazy;

pub use backlog::{Backlog, BacklogGuard};
pub use event::StreamEvent;
pub use lazy::{LazyGuard, LazyLoading};

use crate::models::{Notification, Status};

/// Something that can sit in a [`Timeline`]
pub trait TimelineEntry: Sized {
    /// Deduplication key: the ID of the status shown, so a reblog and the
    /// status it reblogs share one
    fn identity(&self) -> &str;

    /// ID passed as `max_id` when paginating backward from this entry
    fn cursor(&self) -> &str;

    /// Whether this entry shows status `id`, directly or as a reblog
    fn references(&self, id: &str) -> bool;

    /// Swap in `status` wherever this entry holds a status with the same ID.
    /// Returns whether anything changed.
    fn replace_status(&mut self, status: &Status) -> bool;

    /// Extract an entry from a live event, if the event carries one
    fn from_stream(event: StreamEvent) -> Option<Self>;
}

impl TimelineEntry for Status {
    fn identity(&self) -> &str {
        self.reblog.as_deref().map_or(&self.id, |reblog| &reblog.id)
    }

    fn cursor(&self) -> &str {
        &self.id
    }

    fn references(&self, id: &str) -> bool {
        Status::references(self, id)
    }

    fn replace_status(&mut self, status: &Status) -> bool {
        if self.id == status.id {
            *self = status.clone();
            return true;
        }
        match self.reblog.as_deref_mut() {
            Some(reblog) if reblog.id == status.id => {
                *reblog = status.clone();
                true
            }
            _ => false,
        }
    }

    fn from_stream(event: StreamEvent) -> Option<Self> {
        match event {
            StreamEvent::Update(status) => Some(status),
            _ => None,
        }
    }
}

impl TimelineEntry for Notification {
    fn identity(&self) -> &str {
        self.status
            .as_ref()
            .map_or(self.id.as_str(), |status| status.identity())
    }

    fn cursor(&self) -> &str {
        &self.id
    }

    fn references(&self, id: &str) -> bool {
        match &self.status {
            Some(status) => status.references(id),
            None => self.id == id,
        }
    }

    fn replace_status(&mut self, status: &Status) -> bool {
        self.status
            .as_mut()
            .is_some_and(|s| s.replace_status(status))
    }

    fn from_stream(event: StreamEvent) -> Option<Self> {
        match event {
            StreamEvent::Notification(notification) => Some(notification),
            _ => None,
        }
    }
}

/// Newest-first list of timeline entries
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<T> {
    entries: Vec<T>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: TimelineEntry> Timeline<T> {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entries with a freshly fetched page, as given
    pub fn replace(&mut self, entries: Vec<T>) {
        self.entries = entries;
    }

    /// Whether an entry with this identity is present
    pub fn contains(&self, identity: &str) -> bool {
        self.entries.iter().any(|e| e.identity() == identity)
    }

    /// Put `entry` at the head unless its identity is already present.
    /// Returns whether it was added.
    pub fn append(&mut self, entry: T) -> bool {
        if self.contains(entry.identity()) {
            return false;
        }
        self.entries.insert(0, entry);
        true
    }

    /// Add older entries at the tail in the given order. Returns how many
    /// were added.
    pub fn insert(&mut self, entries: impl IntoIterator<Item = T>) -> usize {
        let before = self.entries.len();
        self.entries.extend(entries);
        self.entries.len() - before
    }

    /// Replace every occurrence of `status`, direct or reblogged, keeping
    /// positions. Returns the number of entries touched.
    pub fn update(&mut self, status: &Status) -> usize {
        self.entries
            .iter_mut()
            .map(|e| e.replace_status(status))
            .filter(|changed| *changed)
            .count()
    }

    /// Remove every entry showing status `id`, direct or reblogged. Returns
    /// the number removed.
    pub fn delete(&mut self, id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.references(id));
        before - self.entries.len()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Newest entry
    pub fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    /// Oldest entry, the anchor for the next backward page
    pub fn last(&self) -> Option<&T> {
        self.entries.last()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, newest first
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Iterate entries, newest first
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

}

impl<T: TimelineEntry> From<Vec<T>> for Timeline<T> {
    fn from(entries: Vec<T>) -> Self {
        Self { entries }
    }
}

impl<'a, T: TimelineEntry> IntoIterator for &'a Timeline<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
