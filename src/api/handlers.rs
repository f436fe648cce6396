//! API Handlers
//!
//! HTTP request handlers for each parameter endpoint.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::Result;
use crate::models::{
    ErrorResponse, HealthResponse, ParameterResponse, ParametersResponse, StatsResponse,
};
use crate::params::ParameterSet;
use crate::store::ParameterStore;

/// Application state shared across all handlers.
///
/// `ParameterSet` is already shared and synchronized internally, so it is
/// held directly.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Cached parameters served by the API
    pub params: ParameterSet,
}

impl AppState {
    /// Creates a new AppState around the given parameter set.
    pub fn new(params: ParameterSet) -> Self {
        Self { params }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the parameter set over `store` with the configured keys and expiry.
    pub fn from_config(config: &crate::config::Config, store: Arc<dyn ParameterStore>) -> Self {
        Self::new(ParameterSet::load_with_expiry(
            store,
            config.keys.iter().cloned(),
            config.expiry_ms,
        ))
    }
}

/// Handler for GET /params/:key
///
/// Returns the current value of one configured parameter, 404 for any other name.
pub async fn get_parameter_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Response {
    let Some(param) = state.params.parameter(&key) else {
        let body = ErrorResponse::new(format!("Unknown parameter: {}", key));
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    };

    match param.value().await {
        Ok(value) => Json(ParameterResponse::new(key, value)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Handler for GET /params
///
/// Returns every configured parameter with its current value, all from the
/// same load.
pub async fn list_parameters_handler(
    State(state): State<AppState>,
) -> Result<Json<ParametersResponse>> {
    let values: BTreeMap<String, String> = state.params.values().await?.into_iter().collect();

    Ok(Json(ParametersResponse::new(values)))
}

/// Handler for GET /stats
///
/// Returns access statistics and the state of the cache, without reloading.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.params.snapshot();

    Json(StatsResponse::new(
        state.params.stats(),
        snapshot.items.len(),
        snapshot.expires_at,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
