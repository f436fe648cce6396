//! Response DTOs for the parameter API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::params::AccessStats;

/// Response body for GET /params/:key
#[derive(Debug, Clone, Serialize)]
pub struct ParameterResponse {
    /// The requested parameter name
    pub key: String,
    /// The current value
    pub value: String,
}

impl ParameterResponse {
    /// Creates a new ParameterResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for GET /params
#[derive(Debug, Clone, Serialize)]
pub struct ParametersResponse {
    /// Every configured parameter with its current value
    pub parameters: BTreeMap<String, String>,
}

impl ParametersResponse {
    /// Creates a new ParametersResponse
    pub fn new(parameters: BTreeMap<String, String>) -> Self {
        Self { parameters }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads served from fresh cache
    pub fresh_hits: u64,
    /// Successful reloads
    pub reloads: u64,
    /// Failed reloads
    pub failed_reloads: u64,
    /// Reads served stale after a failed reload
    pub stale_served: u64,
    /// Number of values currently cached
    pub cached_keys: usize,
    /// Expiration of the cached values in RFC 3339, absent if they never
    /// expire or the timestamp is out of range
    pub expires_at: Option<String>,
}

impl StatsResponse {
    /// Creates a new StatsResponse from access statistics and the cache state
    pub fn new(stats: AccessStats, cached_keys: usize, expires_at_ms: Option<u64>) -> Self {
        let expires_at = expires_at_ms
            .and_then(|ms| i64::try_from(ms).ok())
            .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
            .map(|at| at.to_rfc3339());
        Self {
            fresh_hits: stats.fresh_hits,
            reloads: stats.reloads,
            failed_reloads: stats.failed_reloads,
            stale_served: stats.stale_served,
            cached_keys,
            expires_at,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for conditions outside the parameter error taxonomy
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_response_serialize() {
        let resp = ParameterResponse::new("/app/db_url", "postgres://db");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("/app/db_url"));
        assert!(json.contains("postgres://db"));
    }

    #[test]
    fn test_parameters_response_sorted() {
        let resp = ParametersResponse::new(BTreeMap::from([
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ]));
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"parameters":{"a":"1","b":"2"}}"#);
    }

    #[test]
    fn test_stats_response_expiry() {
        let resp = StatsResponse::new(AccessStats::new(), 2, Some(0));
        assert_eq!(resp.cached_keys, 2);
        assert_eq!(resp.expires_at.as_deref(), Some("1970-01-01T00:00:00+00:00"));

        let resp = StatsResponse::new(AccessStats::new(), 0, None);
        assert!(resp.expires_at.is_none());
    }

    #[test]
    fn test_stats_response_out_of_range_expiry() {
        // Saturated expiry from a huge PARAM_EXPIRY_MS must not wrap into the past.
        let resp = StatsResponse::new(AccessStats::new(), 1, Some(u64::MAX));
        assert!(resp.expires_at.is_none());

        let resp = StatsResponse::new(AccessStats::new(), 1, Some(i64::MAX as u64 + 1));
        assert!(resp.expires_at.is_none());
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
