//! # Web API Route Definitions

use axum::routing::{get, post};
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Batch submission
pub fn calculation_routes() -> Router<AppState> {
    Router::new().route("/calculate", post(handlers::calculations::calculate))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::basic_health))
}
