//! Configuration Module
//!
//! Handles loading the host process configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::params::DEFAULT_EXPIRY_MS;

/// Host process configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Parameter names to load
    pub keys: Vec<String>,
    /// Time to live of loaded values in milliseconds, 0 = never expire
    pub expiry_ms: u64,
    /// JSON file backing the local parameter store
    pub source_file: PathBuf,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PARAM_KEYS` - Comma-separated parameter names (default: none)
    /// - `PARAM_EXPIRY_MS` - Time to live in milliseconds (default: 300000)
    /// - `PARAM_SOURCE_FILE` - Parameter file path (default: parameters.json)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            keys: env::var("PARAM_KEYS")
                .map(|v| parse_keys(&v))
                .unwrap_or(defaults.keys),
            expiry_ms: env::var("PARAM_EXPIRY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.expiry_ms),
            source_file: env::var("PARAM_SOURCE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.source_file),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            expiry_ms: DEFAULT_EXPIRY_MS,
            source_file: PathBuf::from("parameters.json"),
            server_port: 3000,
        }
    }
}

/// Splits a comma-separated key list, dropping blanks.
fn parse_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}
