use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Injectable counter of live elements, used to detect leaked element trees.
///
/// Clones share the same count. Each element built with a counter holds a [`LiveGuard`] that
/// decrements on drop.
#[derive(Clone, Debug, Default)]
pub struct LiveCounter(Arc<AtomicUsize>);

impl LiveCounter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements currently alive.
    pub fn live(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    /// Return `true` when no element is alive; logs a warning otherwise.
    pub fn check_leaks(&self) -> bool {
        let live = self.live();
        if live > 0 {
            tracing::warn!(live, "element leak detected");
            return false;
        }
        true
    }

    pub(crate) fn guard(&self) -> LiveGuard {
        self.0.fetch_add(1, Ordering::Relaxed);
        LiveGuard(Arc::clone(&self.0))
    }
}

/// Keeps one element counted while alive.
#[derive(Debug)]
pub(crate) struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}
