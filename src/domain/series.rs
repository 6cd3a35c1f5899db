// Time series domain models
use serde::Serialize;

/// Index-aligned timestamps and readings, ascending in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub timestamps: Vec<String>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, timestamp: String, value: f64) {
        self.timestamps.push(timestamp);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keep only the points at `indices` (ascending), timestamps and values
    /// together.
    pub fn select(self, indices: &[usize]) -> Self {
        let mut selected = Self::with_capacity(indices.len());
        let mut wanted = indices.iter().copied().peekable();
        for (idx, (timestamp, value)) in self
            .timestamps
            .into_iter()
            .zip(self.values)
            .enumerate()
        {
            if wanted.peek() == Some(&idx) {
                wanted.next();
                selected.push(timestamp, value);
            }
        }
        selected
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedSeries {
    pub timestamps: Vec<String>,
    pub values: Vec<f64>,
    pub cumulative_values: Vec<f64>,
}

impl CleanedSeries {
    pub fn new(series: TimeSeries) -> Self {
        let cumulative_values = cumulative_sum(&series.values);
        Self {
            timestamps: series.timestamps,
            values: series.values,
            cumulative_values,
        }
    }
}

/// Running total, accumulated strictly left to right.
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |total, value| {
            *total += value;
            Some(*total)
        })
        .collect()
}
