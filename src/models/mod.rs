//! Response models for the parameter API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing HTTP response bodies. The API is read-only, so there are no
//! request bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    ErrorResponse, HealthResponse, ParameterResponse, ParametersResponse, StatsResponse,
};
