// HTTP request handlers
use crate::domain::sensor::SensorTotal;
use crate::domain::series::CleanedSeries;
use crate::presentation::api_error::ApiError;
use crate::presentation::app_state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorQuery {
    pub sensor_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedDataResponse {
    pub cleaned_data: CleanedSeries,
}

#[derive(Debug, Serialize)]
pub struct SensorsResponse {
    pub sensors: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorTotalsResponse {
    pub sensor_totals: Vec<SensorTotal>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Cleaned and cumulative series for the sensor named in the body
pub async fn query_sensor(
    State(state): State<Arc<AppState>>,
    Json(query): Json<SensorQuery>,
) -> Result<Json<CleanedDataResponse>, ApiError> {
    let cleaned_data = state
        .series_service
        .cleaned_series(&query.sensor_name)
        .await?;
    tracing::debug!(sensor = %query.sensor_name, points = cleaned_data.values.len(), "served sensor series");
    Ok(Json(CleanedDataResponse { cleaned_data }))
}

/// Same as `query_sensor`, fixed to the generation meter
pub async fn generated_energy(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CleanedDataResponse>, ApiError> {
    let cleaned_data = state.series_service.generated_energy_series().await?;
    Ok(Json(CleanedDataResponse { cleaned_data }))
}

pub async fn list_sensors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SensorsResponse>, ApiError> {
    let sensors = state.sensor_service.list_sensors().await?;
    Ok(Json(SensorsResponse { sensors }))
}

pub async fn sensor_totals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SensorTotalsResponse>, ApiError> {
    let sensor_totals = state.sensor_service.sensor_totals().await?;
    Ok(Json(SensorTotalsResponse { sensor_totals }))
}
