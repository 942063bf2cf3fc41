//! # Calculation Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, info};

use crate::models::Product;
use crate::web::response_types::{ApiError, ApiResult, CalculationAccepted};
use crate::web::state::AppState;

/// Accept a batch of products: POST /calculate
///
/// Responds `202 Accepted` with the calculation id as soon as the batch is
/// queued. Results are only observable on the result and dead-letter queues.
/// A full batch queue or a stopped worker answers `503`.
pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Product>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CalculationAccepted>)> {
    let Json(products) = payload?;
    info!(product_count = products.len(), "Calculation requested via web API");

    if products.is_empty() {
        return Err(ApiError::bad_request("Product list cannot be empty"));
    }
    if let Some(product) = products.iter().find(|p| p.name.trim().is_empty()) {
        return Err(ApiError::bad_request(format!(
            "Product name cannot be empty (unit: {})",
            product.unit
        )));
    }

    let calculation_id = state.scheduler.submit(products).map_err(|e| {
        error!(error = %e, "Failed to schedule calculation batch");
        ApiError::from(e)
    })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(CalculationAccepted {
            value: calculation_id,
        }),
    ))
}
