//! JSON Prediction Route

use axum::{extract::State, http::StatusCode, Json};
use chrono::Local;
use order_intake::{OrderDetails, OrderValidator};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;

/// Response for the prediction endpoint
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub estimated_hours: f64,
    pub message: String,
    /// Schema columns that were zero-filled during alignment
    pub defaulted_columns: Vec<String>,
}

/// Predict the delivery time for one order
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(order): Json<OrderDetails>,
) -> Result<Json<PredictResponse>, (StatusCode, Json<serde_json::Value>)> {
    let request_id = Uuid::new_v4();

    let validation = OrderValidator::default().validate(&order);
    if !validation.valid {
        let errors: Vec<String> = validation.errors.iter().map(ToString::to_string).collect();
        info!("request {} rejected: {:?}", request_id, errors);
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": errors })),
        ));
    }

    let today = Local::now().date_naive();
    let estimate = state
        .runtime
        .estimate(&order.to_table(today))
        .map_err(|e| {
            error!("request {} inference failed: {}", request_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })?;

    info!(
        "request {} predicted {:.2} hours ({} columns defaulted)",
        request_id,
        estimate.hours,
        estimate.defaulted_columns.len()
    );

    Ok(Json(PredictResponse {
        message: format!("Estimated Delivery Time: {:.2} hours", estimate.hours),
        estimated_hours: estimate.hours,
        defaulted_columns: estimate.defaulted_columns,
    }))
}
