//! Live events held back while a timeline is being refetched

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::StreamEvent;

/// Events applied while at least one refetch is in flight.
///
/// A refetch replaces the whole list with the server's page, which can
/// predate pushes that arrived during the request. Those pushes are kept
/// here and replayed on top of the fresh page.
#[derive(Debug, Default)]
pub struct Backlog {
    events: Vec<StreamEvent>,
    recorders: Arc<AtomicUsize>,
}

impl Backlog {
    /// Create an idle backlog
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any refetch is recording
    pub fn is_recording(&self) -> bool {
        self.recorders.load(Ordering::Acquire) > 0
    }

    /// Start recording.
    ///
    /// Returns the position replay starts from and a guard that stops this
    /// recorder when dropped, including when its future is cancelled.
    pub fn record(&mut self) -> (usize, BacklogGuard) {
        if !self.is_recording() {
            self.events.clear();
        }
        self.recorders.fetch_add(1, Ordering::AcqRel);
        let guard = BacklogGuard(Arc::clone(&self.recorders));
        (self.events.len(), guard)
    }

    /// Keep `event` if anyone is recording, otherwise drop what is left over
    pub fn push(&mut self, event: &StreamEvent) {
        if self.is_recording() {
            self.events.push(event.clone());
        } else if !self.events.is_empty() {
            self.events.clear();
        }
    }

    /// Events recorded from `start` on, oldest first
    pub fn since(&self, start: usize) -> &[StreamEvent] {
        self.events.get(start..).unwrap_or_default()
    }
}

/// Keeps one recorder active until dropped
#[derive(Debug)]
#[must_use = "recording stops as soon as the guard is dropped"]
pub struct BacklogGuard(Arc<AtomicUsize>);

impl Drop for BacklogGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
