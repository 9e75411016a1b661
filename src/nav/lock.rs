//! Single-flight guard for navigation.
//!
//! Only one navigation transition may be in progress. Requests arriving
//! while the lock is held are dropped by the caller, never queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct NavigationLock {
    held: Arc<AtomicBool>,
}

impl NavigationLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the lock if it is free. The lock is released when the returned
    /// permit is dropped.
    pub fn try_acquire(&self) -> Option<NavigationPermit> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| NavigationPermit {
                held: Arc::clone(&self.held),
            })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the navigation lock.
#[derive(Debug)]
#[must_use = "the navigation lock is released as soon as the permit is dropped"]
pub struct NavigationPermit {
    held: Arc<AtomicBool>,
}

impl Drop for NavigationPermit {
    fn drop(&mut self) {
        self.held.store(false, Ordering::Release);
    }
}
