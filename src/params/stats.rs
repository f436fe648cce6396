//! Access Statistics Module
//!
//! Tracks how reads were served: from fresh cache, after a reload, or stale
//! after a failed reload.

use serde::Serialize;

// == Access Stats ==
/// Counters for one parameter set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessStats {
    /// Reads served from a fresh cache without touching the store
    pub fresh_hits: u64,
    /// Reloads that replaced the cache
    pub reloads: u64,
    /// Reloads that failed (store error or missing keys)
    pub failed_reloads: u64,
    /// Reads that swallowed a failed reload and returned stale values
    pub stale_served: u64,
}

impl AccessStats {
    // == Constructor ==
    /// Creates a new AccessStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the fresh hit counter.
    pub fn record_fresh_hit(&mut self) {
        self.fresh_hits += 1;
    }

    /// Increments the reload counter.
    pub fn record_reload(&mut self) {
        self.reloads += 1;
    }

    /// Increments the failed reload counter.
    pub fn record_failed_reload(&mut self) {
        self.failed_reloads += 1;
    }

    /// Increments the stale read counter.
    pub fn record_stale_served(&mut self) {
        self.stale_served += 1;
    }
}
