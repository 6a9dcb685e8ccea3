//! # HTTP Server Module
//!
//! Thin axum adapter over the core: maps requests onto store and query
//! operations and serializes their results.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/metrics` - Counters
//! - `/strings/*` - String analysis, lookup, filtering and deletion

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod state;
pub mod string_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use state::AppState;
