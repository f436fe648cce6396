//! In-memory parameter store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{ParameterStore, StoreParameter};
use crate::error::StoreError;

// == In-Memory Store ==
/// Map-backed [`ParameterStore`] that can be switched into a failing mode.
///
/// Counts every fetch, which makes it the test double of choice for
/// checking when the cache does or does not go to the store.
#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    values: RwLock<HashMap<String, String>>,
    unavailable: AtomicBool,
    calls: AtomicUsize,
    last_with_decryption: AtomicBool,
}

impl InMemoryParameterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given pairs.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store.replace_all(values);
        store
    }

    /// Inserts or overwrites one parameter.
    pub fn put(&self, name: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(name.into(), value.into());
    }

    /// Removes one parameter.
    pub fn remove(&self, name: &str) -> Option<String> {
        self.values.write().remove(name)
    }

    /// Replaces the whole content of the store.
    pub fn replace_all<I, K, V>(&self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        *self.values.write() = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
    }

    /// When set, every fetch fails with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of fetches made so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Decryption flag of the most recent fetch.
    pub fn last_with_decryption(&self) -> bool {
        self.last_with_decryption.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParameterStore for InMemoryParameterStore {
    async fn get_parameters(
        &self,
        names: &[String],
        with_decryption: bool,
    ) -> Result<Vec<StoreParameter>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_with_decryption
            .store(with_decryption, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store switched off".to_string(),
            ));
        }

        let values = self.values.read();
        Ok(names
            .iter()
            .filter_map(|name| {
                values
                    .get(name)
                    .map(|value| StoreParameter::new(name.clone(), value.clone()))
            })
            .collect())
    }
}
