//! API Module
//!
//! Read-only HTTP access to a parameter set.
//!
//! # Endpoints
//! - `GET /params` - Every configured parameter
//! - `GET /params/:key` - One parameter by name
//! - `GET /stats` - Access statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
