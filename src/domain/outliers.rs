// Z-score outlier rejection
use super::error::PipelineError;
use super::series::TimeSeries;

pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

/// Mean and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl SeriesStats {
    pub fn population(values: &[f64]) -> Result<Self, PipelineError> {
        if values.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        let variance = values
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / count;

        Ok(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// `None` when the spread is zero or not finite; no z-score is defined then.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        if self.std_dev == 0.0 || !self.std_dev.is_finite() {
            return None;
        }
        Some((value - self.mean).abs() / self.std_dev)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OutlierFilter {
    z_threshold: f64,
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self::new(DEFAULT_Z_THRESHOLD)
    }
}

impl OutlierFilter {
    pub fn new(z_threshold: f64) -> Self {
        Self { z_threshold }
    }

    pub fn z_threshold(&self) -> f64 {
        self.z_threshold
    }

    /// Positions of the values whose z-score stays below the threshold.
    /// A degenerate sample (empty, or zero spread) has no outliers.
    pub fn retained_indices(&self, values: &[f64]) -> Vec<usize> {
        let Ok(stats) = SeriesStats::population(values) else {
            return Vec::new();
        };

        values
            .iter()
            .enumerate()
            .filter(|(_, value)| match stats.z_score(**value) {
                Some(z) => z < self.z_threshold,
                None => true,
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn remove_outliers(&self, values: &[f64]) -> Vec<f64> {
        self.retained_indices(values)
            .into_iter()
            .map(|idx| values[idx])
            .collect()
    }

    /// Drop outlying points from a series, keeping each timestamp with its value.
    pub fn clean(&self, series: TimeSeries) -> TimeSeries {
        let keep = self.retained_indices(&series.values);
        if keep.len() == series.len() {
            return series;
        }
        series.select(&keep)
    }
}
