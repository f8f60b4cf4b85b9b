//! Guard against overlapping backward pagination

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// The `lazyLoading` flag of a timeline.
///
/// Clones share the same flag, so a handle can be read outside whatever lock
/// protects the timeline itself.
#[derive(Debug, Clone, Default)]
pub struct LazyLoading(Arc<AtomicBool>);

impl LazyLoading {
    /// Create an idle flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a lazy fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Mark a lazy fetch as started.
    ///
    /// Returns `None` when one is already in flight. The flag drops back to
    /// idle when the returned guard is dropped, whether the fetch finished,
    /// failed, or its future was cancelled.
    pub fn begin(&self) -> Option<LazyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LazyGuard(Arc::clone(&self.0)))
    }
}

/// Holds the lazy-loading flag set until dropped
#[derive(Debug)]
#[must_use = "the flag is released as soon as the guard is dropped"]
pub struct LazyGuard(Arc<AtomicBool>);

impl Drop for LazyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_sets_and_drop_resets() {
        let flag = LazyLoading::new();
        assert!(!flag.is_loading());

        let guard = flag.begin().unwrap();
        assert!(flag.is_loading());

        drop(guard);
        assert!(!flag.is_loading());
    }

    #[test]
    fn test_second_begin_is_rejected() {
        let flag = LazyLoading::new();
        let _guard = flag.begin().unwrap();
        assert!(flag.begin().is_none());
        assert!(flag.clone().begin().is_none());
    }
}
