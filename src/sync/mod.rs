//! Shared timelines fed by live streams
//!
//! A stream event can arrive while a page is still loading. The shared
//! handle locks the module only to read the anchor and to apply a result,
//! never across a network request, so live events keep flowing. Events that
//! land during a refetch are replayed on top of the fresh page, and a
//! backward page is dropped if the list was replaced under it.

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, mpsc};
use tokio::task::JoinHandle;

use crate::api::{Scope, TimelineSource};
use crate::error::{Error, Result};
use crate::store::TimelineModule;
use crate::timeline::{LazyLoading, StreamEvent, TimelineEntry};

/// Cloneable handle on a timeline module
pub struct SharedTimeline<T> {
    module: Arc<Mutex<TimelineModule<T>>>,
    lazy_loading: LazyLoading,
}

impl<T> Clone for SharedTimeline<T> {
    fn clone(&self) -> Self {
        Self {
            module: Arc::clone(&self.module),
            lazy_loading: self.lazy_loading.clone(),
        }
    }
}

impl<T: TimelineEntry> SharedTimeline<T> {
    /// Wrap a module
    pub fn new(module: TimelineModule<T>) -> Self {
        let lazy_loading = module.lazy_loading().clone();
        Self {
            module: Arc::new(Mutex::new(module)),
            lazy_loading,
        }
    }

    /// Lock the module for reading or direct mutation
    pub async fn lock(&self) -> MutexGuard<'_, TimelineModule<T>> {
        self.module.lock().await
    }

    /// Whether a backward page is being fetched
    pub fn is_lazy_loading(&self) -> bool {
        self.lazy_loading.is_loading()
    }

    /// Apply a live event
    pub async fn apply(&self, event: StreamEvent) -> bool {
        self.module.lock().await.apply(event)
    }

    /// Load the newest page of `scope`, replacing the timeline. Live events
    /// applied while the request is in flight are replayed on top of it.
    /// Returns the number of entries now shown.
    pub async fn fetch<S>(&self, source: &S, scope: &Scope) -> Result<usize>
    where
        S: TimelineSource<T>,
    {
        let (start, recording) = self.module.lock().await.record_events();

        let page = source.fetch_latest(scope).await.inspect_err(|e| {
            tracing::warn!("Failed to fetch {}: {}", scope, e);
        })?;

        tracing::debug!("Fetched {} entries for {}", page.len(), scope);
        let shown = self.module.lock().await.replace_and_replay(page, start);
        drop(recording);
        Ok(shown)
    }

    /// Load the page of `scope` older than the current tail and append it.
    ///
    /// Returns `Ok(0)` without a request when the timeline is empty, and
    /// [`Error::LazyLoadingInFlight`] while another backward fetch runs. The
    /// page is discarded, also with `Ok(0)`, when the timeline was replaced
    /// while it loaded.
    pub async fn lazy_fetch<S>(&self, source: &S, scope: &Scope) -> Result<usize>
    where
        S: TimelineSource<T>,
    {
        let guard = self.lazy_loading.begin().ok_or(Error::LazyLoadingInFlight)?;

        let (cursor, generation) = {
            let module = self.module.lock().await;
            match module.timeline().last() {
                Some(anchor) => (anchor.cursor().to_string(), module.generation()),
                None => return Ok(0),
            }
        };

        let page = source.fetch_before(scope, &cursor).await;
        let page = page.inspect_err(|e| {
            tracing::warn!("Failed to fetch {} before {}: {}", scope, cursor, e);
        })?;

        let mut module = self.module.lock().await;
        if module.generation() != generation {
            tracing::debug!("Dropping page before {}: {} was refetched meanwhile", cursor, scope);
            return Ok(0);
        }
        let added = module.insert(page);
        drop(module);
        drop(guard);

        tracing::debug!("Fetched {} older entries for {} before {}", added, scope, cursor);
        Ok(added)
    }

    /// Clone out the current entries
    pub async fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.module.lock().await.timeline().as_slice().to_vec()
    }
}

/// Apply every event from `events` to `timeline` until the sender side closes.
/// Returns how many events changed the timeline.
pub async fn pump_events<T: TimelineEntry>(
    timeline: SharedTimeline<T>,
    mut events: mpsc::Receiver<StreamEvent>,
) -> usize {
    let mut applied = 0;

    while let Some(event) = events.recv().await {
        let name = event.name();
        if timeline.apply(event).await {
            applied += 1;
        } else {
            tracing::trace!("Stream event {} left the timeline unchanged", name);
        }
    }

    tracing::debug!("Stream closed after {} applied events", applied);
    applied
}

/// Spawn [`pump_events`] on the runtime
pub fn spawn_pump<T>(
    timeline: SharedTimeline<T>,
    events: mpsc::Receiver<StreamEvent>,
) -> JoinHandle<usize>
where
    T: TimelineEntry + Send + 'static,
{
    tokio::spawn(pump_events(timeline, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::test_support::{GatedSource, MockSource, status};

    fn shared(entries: Vec<Status>) -> SharedTimeline<Status> {
        let mut module = TimelineModule::new();
        module.insert(entries);
        SharedTimeline::new(module)
    }

    #[tokio::test]
    async fn test_fetch_replaces() {
        let timeline = shared(vec![status("9")]);
        let source = MockSource::new(vec![status("2"), status("1")], Vec::new());

        assert_eq!(timeline.fetch(&source, &Scope::Public).await.unwrap(), 2);
        assert_eq!(timeline.snapshot().await, [status("2"), status("1")]);
    }

    #[tokio::test]
    async fn test_lazy_fetch_uses_tail_as_anchor() {
        let timeline = shared(vec![status("2"), status("1")]);
        let source = MockSource::new(Vec::new(), vec![status("0")]);

        assert_eq!(timeline.lazy_fetch(&source, &Scope::Local).await.unwrap(), 1);
        assert_eq!(source.calls(), [(Scope::Local, Some("1".to_string()))]);
        assert!(!timeline.is_lazy_loading());
    }

    #[tokio::test]
    async fn test_lazy_fetch_on_empty_timeline_skips_request() {
        let timeline = shared(Vec::new());
        let source = MockSource::<Status>::new(Vec::new(), vec![status("0")]);

        assert_eq!(timeline.lazy_fetch(&source, &Scope::Home).await.unwrap(), 0);
        assert!(source.calls().is_empty());
        assert!(!timeline.is_lazy_loading());
    }

    #[tokio::test]
    async fn test_lazy_fetch_failure_resets_flag() {
        let timeline = shared(vec![status("1")]);
        let source = MockSource::<Status>::failing();

        assert!(timeline.lazy_fetch(&source, &Scope::Home).await.is_err());
        assert!(!timeline.is_lazy_loading());
        assert_eq!(timeline.snapshot().await, [status("1")]);
    }

    #[tokio::test]
    async fn test_live_events_during_lazy_fetch() {
        let timeline = shared(vec![status("2")]);
        let source = GatedSource::new(vec![status("1")]);

        let scope = Scope::Home;

        let fetch = timeline.lazy_fetch(&source, &scope);
        let events = async {
            source.started.notified().await;
            assert!(timeline.is_lazy_loading());

            let second = timeline.lazy_fetch(&source, &scope).await;
            assert!(matches!(second, Err(Error::LazyLoadingInFlight)));

            assert!(timeline.apply(StreamEvent::Update(status("3"))).await);
            assert!(!timeline.apply(StreamEvent::Update(status("2"))).await);
            source.release.notify_one();
        };

        let (added, ()) = tokio::join!(fetch, events);

        assert_eq!(added.unwrap(), 1);
        assert!(!timeline.is_lazy_loading());
        assert_eq!(timeline.snapshot().await, [status("3"), status("2"), status("1")]);
    }

    #[tokio::test]
    async fn test_live_events_during_fetch_survive_replace() {
        let timeline = shared(vec![status("1")]);
        let source = GatedSource::new(Vec::new()).with_latest(vec![status("2"), status("1")]);
        let scope = Scope::Home;

        let fetch = timeline.fetch(&source, &scope);
        let events = async {
            source.started.notified().await;
            assert!(timeline.apply(StreamEvent::Update(status("3"))).await);
            assert!(timeline.apply(StreamEvent::Delete("1".to_string())).await);
            source.release.notify_one();
        };

        let (shown, ()) = tokio::join!(fetch, events);

        assert_eq!(shown.unwrap(), 2);
        assert_eq!(timeline.snapshot().await, [status("3"), status("2")]);
    }

    #[tokio::test]
    async fn test_lazy_page_dropped_after_refetch() {
        let timeline = shared(vec![status("2")]);
        let gated = GatedSource::new(vec![status("1")]);
        let refetch = MockSource::new(vec![status("5"), status("4")], Vec::new());
        let scope = Scope::Home;

        let lazy = timeline.lazy_fetch(&gated, &scope);
        let other = async {
            gated.started.notified().await;
            assert_eq!(timeline.fetch(&refetch, &scope).await.unwrap(), 2);
            gated.release.notify_one();
        };

        let (added, ()) = tokio::join!(lazy, other);

        assert_eq!(added.unwrap(), 0);
        assert!(!timeline.is_lazy_loading());
        assert_eq!(timeline.snapshot().await, [status("5"), status("4")]);
    }

    #[tokio::test]
    async fn test_pump_applies_until_closed() {
        let timeline = shared(vec![status("1")]);
        let (tx, rx) = mpsc::channel(8);
        let pump = spawn_pump(timeline.clone(), rx);

        tx.send(StreamEvent::Update(status("2"))).await.unwrap();
        tx.send(StreamEvent::Update(status("2"))).await.unwrap();
        tx.send(StreamEvent::Delete("1".to_string())).await.unwrap();
        drop(tx);

        assert_eq!(pump.await.unwrap(), 2);
        assert_eq!(timeline.snapshot().await, [status("2")]);
    }
}
