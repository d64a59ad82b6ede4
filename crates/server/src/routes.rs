//! API route handlers

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub series: Vec<f64>,
    #[serde(default)]
    pub steps: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub forecast: Vec<f64>,
}

/// Train a fresh model on the posted series and forecast `steps` values
///
/// Training is CPU bound, so it runs on the blocking pool.
pub async fn forecast(
    State(state): State<AppState>,
    Json(req): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let forecaster = state.forecaster.clone();
    let ForecastRequest { series, steps } = req;
    tracing::debug!(series_len = series.len(), ?steps, "forecast requested");

    let forecast =
        tokio::task::spawn_blocking(move || forecaster.forecast(&series, steps)).await??;

    Ok(Json(ForecastResponse {
        forecast: forecast.values,
    }))
}
