// Result normalizer - Observation rows to an aligned time series
use crate::application::observation_repository::ObservationRow;
use crate::domain::error::PipelineError;
use crate::domain::series::TimeSeries;
use chrono::DateTime;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert rows into formatted UTC timestamps and readings, in input order.
///
/// The upstream query sorts by `resultTime`; no reordering happens here.
/// Any absent or unparseable field fails the whole batch.
pub fn normalize(rows: &[ObservationRow]) -> Result<TimeSeries, PipelineError> {
    let mut series = TimeSeries::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let timestamp = format_result_time(idx, row.result_time.as_deref())?;
        let value = parse_numeric_value(idx, row.numeric_value.as_deref())?;
        series.push(timestamp, value);
    }

    Ok(series)
}

fn format_result_time(row: usize, raw: Option<&str>) -> Result<String, PipelineError> {
    let raw = raw.ok_or_else(|| PipelineError::malformed(row, "resultTime", "is missing"))?;
    let seconds: i64 = raw.trim().parse().map_err(|_| {
        PipelineError::malformed(row, "resultTime", format!("is not epoch seconds: {raw:?}"))
    })?;
    let time = DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        PipelineError::malformed(row, "resultTime", format!("is out of range: {seconds}"))
    })?;

    Ok(time.format(TIMESTAMP_FORMAT).to_string())
}

fn parse_numeric_value(row: usize, raw: Option<&str>) -> Result<f64, PipelineError> {
    let raw = raw.ok_or_else(|| PipelineError::malformed(row, "numericValue", "is missing"))?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PipelineError::malformed(
            row,
            "numericValue",
            format!("is not a finite number: {raw:?}"),
        )),
    }
}
