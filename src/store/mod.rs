//! Per-view timeline state
//!
//! Each view (hashtag, list, mentions, ...) owns one module. Modules are
//! plain structs: whoever owns the view owns its state, and every write goes
//! through the reconciliation operations in [`crate::timeline`].

mod list;
mod mentions;
mod tag;
mod timeline_space;

pub use list::{ListTimeline, LoadPositionWithList};
pub use mentions::Mentions;
pub use tag::{LoadPositionWithTag, TagTimeline};
pub use timeline_space::{DEFAULT_TOOT_MAX, LocalAccount, TimelineSpace};

use crate::api::{Scope, TimelineSource};
use crate::error::{Error, Result};
use crate::models::Status;
use crate::timeline::{Backlog, BacklogGuard, LazyLoading, StreamEvent, Timeline, TimelineEntry};

/// Timeline plus the view flags that steer it
#[derive(Debug)]
pub struct TimelineModule<T> {
    timeline: Timeline<T>,
    heading: bool,
    scrolling: bool,
    lazy_loading: LazyLoading,
    generation: u64,
    backlog: Backlog,
}

impl<T: TimelineEntry> Default for TimelineModule<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimelineEntry> TimelineModule<T> {
    /// Create an empty module following the head of the timeline
    pub fn new() -> Self {
        Self {
            timeline: Timeline::new(),
            heading: true,
            scrolling: false,
            lazy_loading: LazyLoading::new(),
            generation: 0,
            backlog: Backlog::new(),
        }
    }

    /// The timeline, newest first
    pub fn timeline(&self) -> &Timeline<T> {
        &self.timeline
    }

    /// Whether the view follows the newest entries
    pub fn heading(&self) -> bool {
        self.heading
    }

    /// Whether the view is mid-scroll
    pub fn scrolling(&self) -> bool {
        self.scrolling
    }

    /// Whether a backward page is being fetched
    pub fn is_lazy_loading(&self) -> bool {
        self.lazy_loading.is_loading()
    }

    /// Shared handle on the lazy-loading flag
    pub fn lazy_loading(&self) -> &LazyLoading {
        &self.lazy_loading
    }

    /// Bumped every time the timeline is replaced. A backward page anchored
    /// in an older generation no longer fits the list.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Set heading mode (the user scrolled to or away from the top)
    pub fn change_heading(&mut self, heading: bool) {
        self.heading = heading;
    }

    /// Set the scrolling flag
    pub fn change_scrolling(&mut self, scrolling: bool) {
        self.scrolling = scrolling;
    }

    /// Load the newest page of `scope`, replacing the timeline.
    ///
    /// On failure the timeline is left untouched.
    pub async fn fetch<S>(&mut self, source: &S, scope: &Scope) -> Result<&[T]>
    where
        S: TimelineSource<T>,
    {
        let page = source.fetch_latest(scope).await.inspect_err(|e| {
            tracing::warn!("Failed to fetch {}: {}", scope, e);
        })?;

        tracing::debug!("Fetched {} entries for {}", page.len(), scope);
        self.replace(page);
        Ok(self.timeline.as_slice())
    }

    /// Load the page of `scope` older than `anchor` and add it to the tail.
    ///
    /// Rejected with [`Error::LazyLoadingInFlight`] while another backward
    /// fetch is running. The lazy-loading flag is back to idle once this
    /// returns, whatever the outcome. Returns the number of entries added.
    pub async fn lazy_fetch<S>(&mut self, source: &S, scope: &Scope, anchor: &T) -> Result<usize>
    where
        S: TimelineSource<T>,
    {
        let guard = self.lazy_loading.begin().ok_or(Error::LazyLoadingInFlight)?;
        let page = source.fetch_before(scope, anchor.cursor()).await;
        drop(guard);

        let page = page.inspect_err(|e| {
            tracing::warn!("Failed to fetch {} before {}: {}", scope, anchor.cursor(), e);
        })?;

        tracing::debug!(
            "Fetched {} older entries for {} before {}",
            page.len(),
            scope,
            anchor.cursor()
        );
        Ok(self.timeline.insert(page))
    }

    /// Replace the timeline with a freshly fetched page. Returns its length.
    pub fn replace(&mut self, entries: Vec<T>) -> usize {
        self.timeline.replace(entries);
        self.generation = self.generation.wrapping_add(1);
        self.timeline.len()
    }

    /// Keep every live event applied from now on until the guard drops.
    /// Returns the position to hand to [`Self::replace_and_replay`].
    pub fn record_events(&mut self) -> (usize, BacklogGuard) {
        self.backlog.record()
    }

    /// Replace the timeline, then re-apply the live events recorded since
    /// `start` in arrival order. Returns the resulting length.
    pub fn replace_and_replay(&mut self, entries: Vec<T>, start: usize) -> usize {
        self.replace(entries);
        let events = self.backlog.since(start).to_vec();
        if !events.is_empty() {
            tracing::debug!("Replaying {} live events onto the fresh page", events.len());
        }
        for event in events {
            self.reconcile(event);
        }
        self.timeline.len()
    }

    /// Add a live entry at the head. Entries already present are dropped.
    pub fn append(&mut self, entry: T) -> bool {
        self.timeline.append(entry)
    }

    /// Add older entries at the tail
    pub fn insert(&mut self, entries: Vec<T>) -> usize {
        self.timeline.insert(entries)
    }

    /// Replace a changed status in place
    pub fn update(&mut self, status: &Status) -> usize {
        self.timeline.update(status)
    }

    /// Remove a deleted status
    pub fn delete(&mut self, id: &str) -> usize {
        self.timeline.delete(id)
    }

    /// Drop every entry (view torn down or account switched)
    pub fn clear(&mut self) {
        self.timeline.clear();
    }

    /// Apply a live event. Returns whether the timeline changed.
    pub fn apply(&mut self, event: StreamEvent) -> bool {
        self.backlog.push(&event);
        self.reconcile(event)
    }

    fn reconcile(&mut self, event: StreamEvent) -> bool {
        match event {
            StreamEvent::StatusUpdate(status) => self.update(&status) > 0,
            StreamEvent::Delete(id) => self.delete(&id) > 0,
            other => T::from_stream(other).is_some_and(|entry| self.append(entry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Notification;
    use crate::test_support::{MockSource, mention, reblog, status};

    #[tokio::test]
    async fn test_fetch_seeds_empty_timeline() {
        let source = MockSource::new(vec![status("1")], Vec::new());
        let mut module = TimelineModule::new();

        let statuses = module.fetch(&source, &Scope::Home).await.unwrap().to_vec();

        assert_eq!(statuses, [status("1")]);
        assert_eq!(module.timeline().as_slice(), [status("1")]);
        assert_eq!(source.calls(), [(Scope::Home, None)]);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_timeline_unchanged() {
        let source = MockSource::<Status>::failing();
        let mut module = TimelineModule::new();
        module.insert(vec![status("1")]);

        let result = module.fetch(&source, &Scope::Home).await;

        assert!(matches!(result, Err(Error::Status { status: 503, .. })));
        assert_eq!(module.timeline().as_slice(), [status("1")]);
    }

    #[tokio::test]
    async fn test_lazy_fetch_appends_to_tail() {
        let source = MockSource::new(Vec::new(), vec![status("2")]);
        let mut module = TimelineModule::new();
        module.insert(vec![status("1")]);

        let added = module
            .lazy_fetch(&source, &Scope::Home, &status("1"))
            .await
            .unwrap();

        assert_eq!(added, 1);
        assert!(!module.is_lazy_loading());
        assert_eq!(module.timeline().as_slice(), [status("1"), status("2")]);
        assert_eq!(source.calls(), [(Scope::Home, Some("1".to_string()))]);
    }

    #[tokio::test]
    async fn test_lazy_fetch_failure_resets_flag() {
        let source = MockSource::<Status>::failing();
        let mut module = TimelineModule::new();
        module.insert(vec![status("1")]);

        let result = module.lazy_fetch(&source, &Scope::Home, &status("1")).await;

        assert!(result.is_err());
        assert!(!module.is_lazy_loading());
        assert_eq!(module.timeline().len(), 1);
    }

    #[tokio::test]
    async fn test_lazy_fetch_rejected_while_in_flight() {
        let source = MockSource::new(Vec::new(), vec![status("2")]);
        let mut module = TimelineModule::new();
        let held = module.lazy_loading().clone();
        let _guard = held.begin().unwrap();

        let result = module.lazy_fetch(&source, &Scope::Home, &status("1")).await;

        assert!(matches!(result, Err(Error::LazyLoadingInFlight)));
        assert!(source.calls().is_empty());
        assert!(module.is_lazy_loading());
    }

    #[test]
    fn test_lazy_fetch_cancelled_resets_flag() {
        let source = crate::test_support::GatedSource::new(vec![status("2")]);
        let mut module = TimelineModule::new();
        let scope = Scope::Home;
        let anchor = status("1");

        {
            let mut fetch = tokio_test::task::spawn(module.lazy_fetch(&source, &scope, &anchor));
            assert!(fetch.poll().is_pending());
        }

        assert!(!module.is_lazy_loading());
        assert!(module.timeline().is_empty());
    }

    #[test]
    fn test_apply_status_events() {
        let mut module = TimelineModule::new();
        module.insert(vec![reblog("3", status("2")), status("1")]);

        assert!(module.apply(StreamEvent::Update(status("4"))));
        assert!(!module.apply(StreamEvent::Update(status("4"))));
        assert!(!module.apply(StreamEvent::Notification(mention("9", None))));

        let bookmarked = Status {
            bookmarked: true,
            ..status("2")
        };
        assert!(module.apply(StreamEvent::StatusUpdate(bookmarked)));
        assert!(module.timeline().as_slice()[1].reblog.as_ref().unwrap().bookmarked);

        assert!(module.apply(StreamEvent::Delete("2".to_string())));
        assert!(!module.apply(StreamEvent::Delete("2".to_string())));
        let ids: Vec<_> = module.timeline().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["4", "1"]);
    }

    #[test]
    fn test_replace_and_replay_recorded_events() {
        let mut module = TimelineModule::new();
        module.insert(vec![status("1")]);
        module.apply(StreamEvent::Update(status("0")));

        let (start, recording) = module.record_events();
        assert!(module.apply(StreamEvent::Update(status("3"))));
        module.apply(StreamEvent::StatusUpdate(Status {
            bookmarked: true,
            ..status("2")
        }));
        module.apply(StreamEvent::Delete("1".to_string()));

        let generation = module.generation();
        let shown = module.replace_and_replay(vec![status("2"), status("1")], start);
        drop(recording);

        assert_eq!(shown, 2);
        assert_ne!(module.generation(), generation);
        let ids: Vec<_> = module.timeline().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["3", "2"]);
        assert!(module.timeline().as_slice()[1].bookmarked);
    }

    #[test]
    fn test_events_after_recording_are_not_replayed() {
        let mut module = TimelineModule::new();
        let (start, recording) = module.record_events();
        drop(recording);
        module.apply(StreamEvent::Update(status("3")));

        assert_eq!(module.replace_and_replay(vec![status("1")], start), 1);
        assert_eq!(module.timeline().as_slice(), [status("1")]);
    }

    #[test]
    fn test_append_while_not_heading_still_prepends() {
        let mut module: TimelineModule<Notification> = TimelineModule::new();
        module.change_heading(false);
        module.insert(vec![mention("1", Some(status("1")))]);

        assert!(module.append(mention("2", Some(status("2")))));
        assert!(!module.heading());
        assert_eq!(module.timeline().first().unwrap().id, "2");
    }
}
