// Sensor service - Use case for listing sensors and their totals
use crate::application::observation_repository::ObservationRepository;
use crate::domain::error::PipelineError;
use crate::domain::sensor::{local_name, SensorTotal};
use std::sync::Arc;

#[derive(Clone)]
pub struct SensorService {
    repository: Arc<dyn ObservationRepository>,
    sensor_namespace: String,
}

impl SensorService {
    pub fn new(repository: Arc<dyn ObservationRepository>, sensor_namespace: String) -> Self {
        Self {
            repository,
            sensor_namespace,
        }
    }

    pub async fn list_sensors(&self) -> Result<Vec<String>, PipelineError> {
        let iris = self.repository.sensor_iris().await?;
        Ok(iris
            .iter()
            .map(|iri| local_name(iri, &self.sensor_namespace).to_string())
            .collect())
    }

    pub async fn sensor_totals(&self) -> Result<Vec<SensorTotal>, PipelineError> {
        let rows = self.repository.sensor_totals().await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                SensorTotal::new(
                    local_name(&row.sensor_iri, &self.sensor_namespace).to_string(),
                    row.total_consumption,
                )
            })
            .collect())
    }
}
