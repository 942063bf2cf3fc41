//! # Web API Module
//!
//! Axum-based HTTP front door. `POST /calculate` accepts a product list and
//! returns a calculation id immediately; the batch runs on the background
//! worker.
//!
//! - [`routes`] - HTTP route definitions
//! - [`handlers`] - request handlers
//! - [`state`] - shared application state
//! - [`response_types`] - response bodies and `ApiError`

pub mod handlers;
pub mod response_types;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

pub use response_types::{ApiError, ApiResult, CalculationAccepted, HealthResponse};

/// Create the Axum application with all routes and middleware
pub fn create_app(app_state: AppState) -> Router {
    let request_timeout = app_state.request_timeout();

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::calculation_routes())
        .layer(tower_http::timeout::TimeoutLayer::new(request_timeout))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}
