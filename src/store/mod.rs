//! Parameter Store Module
//!
//! The external key-value store the cache reads from, behind a single
//! bulk-fetch trait so callers can inject any backend.

mod file;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use file::FileParameterStore;
pub use memory::InMemoryParameterStore;

// == Store Parameter ==
/// One name/value pair returned by a bulk fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreParameter {
    /// Fully qualified parameter name
    pub name: String,
    /// Parameter value, decrypted when requested
    pub value: String,
}

impl StoreParameter {
    /// Creates a new StoreParameter
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// == Parameter Store Trait ==
/// A remote key-value parameter store.
///
/// Names the store does not hold are left out of the returned list; that is
/// not an error. Implementations enforce their own timeouts.
#[async_trait]
pub trait ParameterStore: Send + Sync + 'static {
    /// Fetches the values for `names` in one round trip.
    ///
    /// `with_decryption` asks the store to decrypt encrypted values.
    async fn get_parameters(
        &self,
        names: &[String],
        with_decryption: bool,
    ) -> Result<Vec<StoreParameter>, StoreError>;
}
