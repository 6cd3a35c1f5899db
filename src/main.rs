// Main entry point - Dependency injection and server setup
use std::sync::Arc;

use anyhow::Context;

use sensor_series::application::sensor_service::SensorService;
use sensor_series::application::series_service::SeriesService;
use sensor_series::domain::outliers::OutlierFilter;
use sensor_series::domain::sensor::SensorId;
use sensor_series::infrastructure::config::load_service_config;
use sensor_series::infrastructure::sparql_query::SparqlQueryBuilder;
use sensor_series::infrastructure::sparql_repository::{build_http_client, SparqlRepository};
use sensor_series::presentation::app_state::AppState;
use sensor_series::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_service_config()?;

    // Create repository (infrastructure layer)
    let client = build_http_client(config.sparql.timeout())?;
    let repository = Arc::new(SparqlRepository::new(
        client,
        config.sparql.endpoint.clone(),
        SparqlQueryBuilder::new(config.sparql.sensor_namespace.clone()),
    ));

    // Create services (application layer)
    let series_service = SeriesService::new(
        repository.clone(),
        OutlierFilter::new(config.pipeline.z_threshold),
        SensorId::parse(&config.sparql.generation_sensor)?,
    );
    let sensor_service = SensorService::new(repository, config.sparql.sensor_namespace.clone());

    let state = Arc::new(AppState {
        series_service,
        sensor_service,
    });

    // Start server
    let addr = config.server.bind_address.as_str();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind sensor-series listener on {addr}"))?;
    tracing::info!(
        %addr,
        endpoint = %config.sparql.endpoint,
        timeout_secs = config.sparql.timeout_secs,
        "sensor-series listening"
    );

    axum::serve(listener, router(state)).await?;

    Ok(())
}
