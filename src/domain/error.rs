// Pipeline error taxonomy
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Transport failure or non-2xx answer from the SPARQL endpoint
    #[error("query service unavailable: {0}")]
    QueryServiceUnavailable(String),

    #[error("query service did not answer in time")]
    Timeout,

    #[error("malformed result in row {row}: field `{field}` {reason}")]
    MalformedResult {
        row: usize,
        field: &'static str,
        reason: String,
    },

    #[error("statistics requested over zero observations")]
    EmptyInput,

    #[error("invalid sensor identifier {id:?}: {reason}")]
    InvalidSensorId { id: String, reason: &'static str },
}

impl PipelineError {
    pub fn malformed(row: usize, field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedResult {
            row,
            field,
            reason: reason.into(),
        }
    }
}
