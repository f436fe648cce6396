//! File-backed parameter store
//!
//! Reads a flat JSON object (`{"name": "value"}`) from disk on every fetch,
//! so edits to the file show up on the next reload. Intended for local
//! development in place of the remote store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{ParameterStore, StoreParameter};
use crate::error::StoreError;

// == File Store ==
/// [`ParameterStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileParameterStore {
    path: PathBuf,
}

impl FileParameterStore {
    /// Creates a store reading from `path`. The file is not touched until
    /// the first fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ParameterStore for FileParameterStore {
    async fn get_parameters(
        &self,
        names: &[String],
        _with_decryption: bool,
    ) -> Result<Vec<StoreParameter>, StoreError> {
        debug!("reading parameters from {}", self.path.display());

        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            StoreError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let mut values: HashMap<String, String> = serde_json::from_slice(&raw)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", self.path.display(), e)))?;

        Ok(names
            .iter()
            .filter_map(|name| {
                values
                    .remove(name)
                    .map(|value| StoreParameter::new(name.clone(), value))
            })
            .collect())
    }
}
