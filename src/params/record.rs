//! Cache Record Module
//!
//! The last successfully loaded values of a parameter set, plus the time
//! source used to decide whether they are still fresh.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Record ==
/// Values from the last successful reload and their expiration.
///
/// `items` is either empty or holds every configured key; the two fields are
/// only ever replaced together.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheRecord {
    /// Parameter values by name
    pub items: HashMap<String, String>,
    /// Expiration timestamp (Unix milliseconds), None = never expires
    pub expires_at: Option<u64>,
}

impl CacheRecord {
    // == Constructor ==
    /// Builds a freshly loaded record.
    ///
    /// # Arguments
    /// * `items` - The loaded values
    /// * `loaded_at` - Load timestamp (Unix milliseconds)
    /// * `expiry_ms` - Time to live; 0 disables expiry
    pub fn loaded(items: HashMap<String, String>, loaded_at: u64, expiry_ms: u64) -> Self {
        let expires_at = (expiry_ms > 0).then(|| loaded_at.saturating_add(expiry_ms));
        Self { items, expires_at }
    }

    // == Is Fresh ==
    /// Checks whether the record can be served without a reload.
    ///
    /// Boundary condition: a record is still fresh at exactly `expires_at`
    /// and goes stale one millisecond later.
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        if self.items.is_empty() {
            return false;
        }
        match self.expires_at {
            Some(expires) => now_ms <= expires,
            None => true,
        }
    }

    /// Returns true if nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up one value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}

// Values may be decrypted secrets; only their count is printed.
impl Debug for CacheRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheRecord")
            .field("items", &self.items.len())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// == Clock ==
/// Source of the current time in Unix milliseconds.
pub trait Clock: Debug + Send + Sync + 'static {
    fn now_ms(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        current_timestamp_ms()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    /// Jumps to an absolute time.
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    /// Moves forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
