//! Param Cache - lazily refreshed access to a remote parameter store
//!
//! Loads a fixed set of parameters in bulk, caches them for a bounded time,
//! reloads on demand once they expire, and keeps serving the last good values
//! while the store is unavailable.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod params;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::{ParamError, Result, StoreError};
pub use params::{Parameter, ParameterSet, DEFAULT_EXPIRY_MS};
pub use store::{FileParameterStore, InMemoryParameterStore, ParameterStore, StoreParameter};
