// Series service - Use case for cleaned, cumulative sensor series
use crate::application::normalizer::normalize;
use crate::application::observation_repository::ObservationRepository;
use crate::domain::error::PipelineError;
use crate::domain::outliers::OutlierFilter;
use crate::domain::sensor::SensorId;
use crate::domain::series::CleanedSeries;
use std::sync::Arc;

#[derive(Clone)]
pub struct SeriesService {
    repository: Arc<dyn ObservationRepository>,
    filter: OutlierFilter,
    generation_sensor: SensorId,
}

impl SeriesService {
    pub fn new(
        repository: Arc<dyn ObservationRepository>,
        filter: OutlierFilter,
        generation_sensor: SensorId,
    ) -> Self {
        Self {
            repository,
            filter,
            generation_sensor,
        }
    }

    pub async fn cleaned_series(&self, sensor_name: &str) -> Result<CleanedSeries, PipelineError> {
        let sensor = SensorId::parse(sensor_name)?;
        self.series_for(&sensor).await
    }

    pub async fn generated_energy_series(&self) -> Result<CleanedSeries, PipelineError> {
        self.series_for(&self.generation_sensor).await
    }

    async fn series_for(&self, sensor: &SensorId) -> Result<CleanedSeries, PipelineError> {
        let rows = self.repository.observation_rows(sensor).await?;
        let series = normalize(&rows)?;
        let raw_len = series.len();

        let cleaned = self.filter.clean(series);
        tracing::debug!(
            sensor = %sensor,
            rows = raw_len,
            rejected = raw_len - cleaned.len(),
            z_threshold = self.filter.z_threshold(),
            "cleaned sensor series"
        );

        Ok(CleanedSeries::new(cleaned))
    }
}
