//! Parameter Set Module
//!
//! The reload and access policy over one cache record.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, warn};

use crate::error::{ParamError, Result};
use crate::params::{AccessStats, CacheRecord, Clock, SystemClock, DEFAULT_EXPIRY_MS};
use crate::store::ParameterStore;

/// The reload currently running for a set, awaited by every caller that needs it.
type ReloadFuture = Shared<BoxFuture<'static, Result<()>>>;

// == Parameter Set ==
/// Cached access to a fixed list of parameters from a [`ParameterStore`].
///
/// Values are fetched in bulk on first use and again whenever a read finds
/// them past their expiry. If such a reload fails after a previous one
/// succeeded, the old values keep being served and the next read retries.
///
/// Cloning is cheap; clones share the same cache.
#[derive(Clone)]
pub struct ParameterSet {
    inner: Arc<Inner>,
}

struct Inner {
    keys: Arc<[String]>,
    expiry_ms: u64,
    store: Arc<dyn ParameterStore>,
    clock: Arc<dyn Clock>,
    record: RwLock<CacheRecord>,
    in_flight: Mutex<Option<ReloadFuture>>,
    stats: Mutex<AccessStats>,
}

impl ParameterSet {
    // == Constructors ==
    /// Creates a set with the default expiry of five minutes.
    ///
    /// Nothing is fetched until the first read.
    pub fn load<I, K>(store: Arc<dyn ParameterStore>, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::load_with_expiry(store, keys, DEFAULT_EXPIRY_MS)
    }

    /// Creates a set whose values expire `expiry_ms` after each successful
    /// reload. `0` means values never expire once loaded.
    pub fn load_with_expiry<I, K>(store: Arc<dyn ParameterStore>, keys: I, expiry_ms: u64) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::with_clock(store, keys, expiry_ms, Arc::new(SystemClock))
    }

    /// Same as [`load_with_expiry`](Self::load_with_expiry) with an explicit time source.
    ///
    /// Duplicate keys are dropped, keeping the first occurrence.
    pub fn with_clock<I, K>(
        store: Arc<dyn ParameterStore>,
        keys: I,
        expiry_ms: u64,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for key in keys.into_iter().map(Into::into) {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }

        Self {
            inner: Arc::new(Inner {
                keys: unique.into(),
                expiry_ms,
                store,
                clock,
                record: RwLock::new(CacheRecord::default()),
                in_flight: Mutex::new(None),
                stats: Mutex::new(AccessStats::new()),
            }),
        }
    }

    // == Get ==
    /// Returns the current value of `key`, reloading first if the cache is
    /// empty or expired.
    ///
    /// A failed reload is swallowed when older values exist, and those are
    /// returned instead. It is only surfaced when nothing was ever loaded.
    ///
    /// Keys outside the configured list resolve to `Ok(None)` without any
    /// store access.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.is_configured(key) {
            debug!("{} is not a configured parameter", key);
            return Ok(None);
        }
        self.read_with(|record| record.get(key)).await
    }

    // == Values ==
    /// Returns every configured parameter, all taken from the same load.
    ///
    /// Follows the same reload and fallback rules as [`get`](Self::get).
    pub async fn values(&self) -> Result<HashMap<String, String>> {
        let keys = Arc::clone(&self.inner.keys);
        self.read_with(move |record| {
            keys.iter()
                .filter_map(|key| record.get(key).map(|value| (key.clone(), value)))
                .collect::<HashMap<_, _>>()
        })
        .await
    }

    // == Reload ==
    /// Fetches every configured key and replaces the cache, regardless of
    /// expiry. Joins the in-flight reload if one is already running.
    ///
    /// The cache is left untouched on failure.
    pub async fn reload(&self) -> Result<()> {
        self.refresh(true).await
    }

    // == Accessors ==
    /// Handle on one configured parameter, `None` for any other name.
    pub fn parameter(&self, key: &str) -> Option<Parameter> {
        self.is_configured(key).then(|| Parameter {
            set: self.clone(),
            name: key.to_string(),
        })
    }

    /// Handles on every configured parameter, in configuration order.
    pub fn parameters(&self) -> Vec<Parameter> {
        self.inner
            .keys
            .iter()
            .map(|name| Parameter {
                set: self.clone(),
                name: name.clone(),
            })
            .collect()
    }

    /// Configured keys, in configuration order.
    pub fn keys(&self) -> &[String] {
        &self.inner.keys
    }

    /// Configured time to live in milliseconds.
    pub fn expiry_ms(&self) -> u64 {
        self.inner.expiry_ms
    }

    /// Copy of the cache as it stands, without reloading.
    pub fn snapshot(&self) -> CacheRecord {
        self.inner.record.read().clone()
    }

    /// Current access statistics.
    pub fn stats(&self) -> AccessStats {
        self.inner.stats.lock().clone()
    }

    fn is_configured(&self, key: &str) -> bool {
        self.inner.keys.iter().any(|k| k == key)
    }

    /// Runs `view` against a usable cache, reloading first if needed.
    async fn read_with<T, F>(&self, view: F) -> Result<T>
    where
        F: FnOnce(&CacheRecord) -> T + Send,
    {
        {
            let record = self.inner.record.read();
            if record.is_fresh(self.inner.clock.now_ms()) {
                self.inner.stats.lock().record_fresh_hit();
                return Ok(view(&*record));
            }
        }

        match self.refresh(false).await {
            Ok(()) => Ok(view(&*self.inner.record.read())),
            Err(err) => {
                let record = self.inner.record.read();
                if record.is_empty() {
                    error!(keys = ?self.inner.keys, "couldn't fetch the initial parameters: {}", err);
                    return Err(err);
                }

                // Expiry is left as is, so the next read retries.
                warn!("swallowing error from parameter store, serving stale values: {}", err);
                self.inner.stats.lock().record_stale_served();
                Ok(view(&*record))
            }
        }
    }

    /// Joins the running reload or starts one.
    ///
    /// Without `force`, a cache that became fresh while waiting for the slot
    /// is accepted as is.
    async fn refresh(&self, force: bool) -> Result<()> {
        let reload = {
            let mut slot = self.inner.in_flight.lock();
            match slot.clone() {
                Some(running) => running,
                None => {
                    if !force && self.inner.record.read().is_fresh(self.inner.clock.now_ms()) {
                        return Ok(());
                    }

                    // The set owns this future, so it only holds a weak link back.
                    let owner = Arc::downgrade(&self.inner);
                    let store = Arc::clone(&self.inner.store);
                    let keys = Arc::clone(&self.inner.keys);
                    let reload = async move {
                        debug!(keys = ?keys, "loading parameter keys");
                        let fetched = fetch(store.as_ref(), &keys).await;
                        finish_reload(&owner, fetched)
                    }
                    .boxed()
                    .shared();

                    *slot = Some(reload.clone());
                    reload
                }
            }
        };

        reload.await
    }
}

impl fmt::Debug for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.inner.record.read();
        f.debug_struct("ParameterSet")
            .field("keys", &self.inner.keys)
            .field("expiry_ms", &self.inner.expiry_ms)
            .field("cached", &record.items.len())
            .field("expires_at", &record.expires_at)
            .finish_non_exhaustive()
    }
}

impl Inner {
    /// Replaces the cache on success; leaves it untouched on failure.
    fn apply(&self, fetched: Result<HashMap<String, String>>) -> Result<()> {
        match fetched {
            Ok(items) => {
                let loaded = CacheRecord::loaded(items, self.clock.now_ms(), self.expiry_ms);
                *self.record.write() = loaded;
                self.stats.lock().record_reload();
                Ok(())
            }
            Err(err) => {
                self.stats.lock().record_failed_reload();
                Err(err)
            }
        }
    }
}

/// Applies a finished fetch to the set, if it still exists, and frees the
/// reload slot.
fn finish_reload(owner: &Weak<Inner>, fetched: Result<HashMap<String, String>>) -> Result<()> {
    match owner.upgrade() {
        Some(inner) => {
            let outcome = inner.apply(fetched);
            inner.in_flight.lock().take();
            outcome
        }
        None => fetched.map(|_| ()),
    }
}

/// One bulk fetch of `keys`, validated as a whole.
async fn fetch(store: &dyn ParameterStore, keys: &[String]) -> Result<HashMap<String, String>> {
    let params = store.get_parameters(keys, true).await?;

    let items: HashMap<String, String> = params
        .into_iter()
        .map(|param| (param.name, param.value))
        .collect();

    validate(keys, &items)?;
    Ok(items)
}

/// Fails with every configured key absent from `items`.
fn validate(keys: &[String], items: &HashMap<String, String>) -> Result<()> {
    let missing: Vec<String> = keys
        .iter()
        .filter(|key| !items.contains_key(key.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ParamError::MissingKeys(missing))
    }
}

// == Parameter ==
/// Accessor for a single configured parameter of a [`ParameterSet`].
#[derive(Debug, Clone)]
pub struct Parameter {
    set: ParameterSet,
    name: String,
}

impl Parameter {
    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, following the same reload and fallback rules as
    /// [`ParameterSet::get`].
    pub async fn value(&self) -> Result<String> {
        let name = self.name.as_str();
        self.set
            .read_with(|record| record.get(name))
            .await?
            .ok_or_else(|| ParamError::MissingKeys(vec![self.name.clone()]))
    }
}
