// Mapping pipeline failures to HTTP responses
use crate::domain::error::PipelineError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Handler error. Only identifier rejections explain themselves to the
/// caller; every other failure collapses to a bare status line.
#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            PipelineError::InvalidSensorId { .. } => {
                tracing::warn!(error = %self.0, "rejected sensor identifier");
                (StatusCode::BAD_REQUEST, self.0.to_string()).into_response()
            }
            PipelineError::Timeout => {
                tracing::error!(error = %self.0, "SPARQL query timed out");
                (StatusCode::GATEWAY_TIMEOUT, "Gateway Timeout").into_response()
            }
            err => {
                tracing::error!(error = %err, "error executing SPARQL query");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: PipelineError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(PipelineError::InvalidSensorId {
                id: "a b".into(),
                reason: "bad"
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(PipelineError::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            status_of(PipelineError::QueryServiceUnavailable("500".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(PipelineError::malformed(0, "resultTime", "is missing")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(PipelineError::EmptyInput), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
