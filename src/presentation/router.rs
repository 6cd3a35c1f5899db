// Route table and HTTP middleware
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    generated_energy, health_check, list_sensors, query_sensor, sensor_totals,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/query-sensor", post(query_sensor))
        .route("/generated-energy", get(generated_energy))
        .route("/sensors", get(list_sensors))
        .route("/sensor-total", get(sensor_totals))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
