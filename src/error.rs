//! Error types for the parameter cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failure reported by a [`ParameterStore`](crate::store::ParameterStore) backend.
///
/// A name that the store does not know is not an error at this level; it is
/// simply absent from the response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or returned a malformed response
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the call due to rate limiting
    #[error("store throttled: {0}")]
    Throttled(String),

    /// The caller is not permitted to read (or decrypt) the requested names
    #[error("access denied: {0}")]
    AccessDenied(String),
}

// == Param Error Enum ==
/// Failure of a reload, as seen by callers of a
/// [`ParameterSet`](crate::params::ParameterSet).
///
/// `Clone` because a single in-flight reload hands the same outcome to every
/// concurrent waiter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// The bulk fetch itself failed
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// The store answered but omitted some of the requested names
    #[error("missing keys: {}", .0.join(","))]
    MissingKeys(Vec<String>),
}

// == IntoResponse Implementation ==
impl IntoResponse for ParamError {
    fn into_response(self) -> Response {
        let status = match &self {
            ParamError::StoreUnavailable(_) => StatusCode::BAD_GATEWAY,
            ParamError::MissingKeys(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for parameter access.
pub type Result<T> = std::result::Result<T, ParamError>;
