//! Parameter Module
//!
//! Lazily refreshed access to a fixed set of parameters, with single-flight
//! reloads and stale fallback when the store is unavailable.

mod record;
mod set;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use record::{current_timestamp_ms, CacheRecord, Clock, ManualClock, SystemClock};
pub use set::{Parameter, ParameterSet};
pub use stats::AccessStats;

// == Public Constants ==
/// Default time to live of loaded values, in milliseconds
pub const DEFAULT_EXPIRY_MS: u64 = 5 * 60 * 1000;
