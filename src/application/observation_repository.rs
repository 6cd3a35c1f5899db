// Repository trait for observation data access
use crate::domain::error::PipelineError;
use crate::domain::sensor::SensorId;
use async_trait::async_trait;

/// One `(resultTime, numericValue)` binding, fields as returned on the wire.
/// Either may be absent when the endpoint leaves a variable unbound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationRow {
    pub result_time: Option<String>,
    pub numeric_value: Option<String>,
}

impl ObservationRow {
    pub fn new(result_time: impl Into<String>, numeric_value: impl Into<String>) -> Self {
        Self {
            result_time: Some(result_time.into()),
            numeric_value: Some(numeric_value.into()),
        }
    }
}

/// Aggregated Watt total for one sensor, still keyed by full IRI
#[derive(Debug, Clone, PartialEq)]
pub struct SensorTotalRow {
    pub sensor_iri: String,
    pub total_consumption: f64,
}

#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Observations made by one sensor, ascending by result time
    async fn observation_rows(&self, sensor: &SensorId) -> Result<Vec<ObservationRow>, PipelineError>;

    /// IRIs of every distinct sensor
    async fn sensor_iris(&self) -> Result<Vec<String>, PipelineError>;

    /// Per-sensor sum of Watt readings, aggregated by the query service
    async fn sensor_totals(&self) -> Result<Vec<SensorTotalRow>, PipelineError>;
}
