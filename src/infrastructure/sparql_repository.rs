// SPARQL repository implementation
use crate::application::observation_repository::{
    ObservationRepository, ObservationRow, SensorTotalRow,
};
use crate::domain::error::PipelineError;
use crate::domain::sensor::SensorId;
use crate::infrastructure::sparql_query::SparqlQueryBuilder;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const SPARQL_QUERY_MEDIA_TYPE: &str = "application/sparql-query";
const SPARQL_RESULTS_MEDIA_TYPE: &str = "application/sparql-results+json";

#[derive(Debug, Clone)]
pub struct SparqlRepository {
    client: reqwest::Client,
    endpoint: String,
    queries: SparqlQueryBuilder,
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<Binding>,
}

type Binding = HashMap<String, SparqlTerm>;

#[derive(Debug, Deserialize)]
struct SparqlTerm {
    value: String,
}

/// One client for the whole process, built with the request timeout.
pub fn build_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

impl SparqlRepository {
    pub fn new(client: reqwest::Client, endpoint: String, queries: SparqlQueryBuilder) -> Self {
        Self {
            client,
            endpoint,
            queries,
        }
    }

    async fn execute_select(&self, query: &str) -> Result<Vec<Binding>, PipelineError> {
        tracing::debug!(endpoint = %self.endpoint, "executing SPARQL query:\n{}", query);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SPARQL_QUERY_MEDIA_TYPE)
            .header(ACCEPT, SPARQL_RESULTS_MEDIA_TYPE)
            .body(query.to_string())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::QueryServiceUnavailable(format!(
                "SPARQL endpoint answered {status}: {body}"
            )));
        }

        let data = response.json::<SparqlResponse>().await.map_err(|e| {
            if e.is_decode() {
                PipelineError::malformed(0, "results", e.to_string())
            } else {
                transport_error(e)
            }
        })?;

        tracing::debug!(bindings = data.results.bindings.len(), "SPARQL query returned");
        Ok(data.results.bindings)
    }
}

fn transport_error(err: reqwest::Error) -> PipelineError {
    if err.is_timeout() {
        PipelineError::Timeout
    } else {
        PipelineError::QueryServiceUnavailable(err.to_string())
    }
}

fn optional_value(binding: &mut Binding, var: &str) -> Option<String> {
    binding.remove(var).map(|term| term.value)
}

fn required_value(
    binding: &mut Binding,
    row: usize,
    var: &'static str,
) -> Result<String, PipelineError> {
    optional_value(binding, var).ok_or_else(|| PipelineError::malformed(row, var, "is missing"))
}

#[async_trait]
impl ObservationRepository for SparqlRepository {
    async fn observation_rows(
        &self,
        sensor: &SensorId,
    ) -> Result<Vec<ObservationRow>, PipelineError> {
        let query = self.queries.observation_query(sensor);
        let bindings = self.execute_select(&query).await?;

        Ok(bindings
            .into_iter()
            .map(|mut binding| ObservationRow {
                result_time: optional_value(&mut binding, "resultTime"),
                numeric_value: optional_value(&mut binding, "numericValue"),
            })
            .collect())
    }

    async fn sensor_iris(&self) -> Result<Vec<String>, PipelineError> {
        let bindings = self.execute_select(&self.queries.sensor_list_query()).await?;

        bindings
            .into_iter()
            .enumerate()
            .map(|(row, mut binding)| required_value(&mut binding, row, "sensor"))
            .collect()
    }

    async fn sensor_totals(&self) -> Result<Vec<SensorTotalRow>, PipelineError> {
        let bindings = self.execute_select(&self.queries.sensor_totals_query()).await?;

        bindings
            .into_iter()
            .enumerate()
            .map(|(row, mut binding)| {
                let sensor_iri = required_value(&mut binding, row, "sensor")?;
                let raw_total = required_value(&mut binding, row, "totalConsumption")?;
                let total_consumption = raw_total
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|total| total.is_finite())
                    .ok_or_else(|| {
                        PipelineError::malformed(
                            row,
                            "totalConsumption",
                            format!("is not a finite number: {raw_total:?}"),
                        )
                    })?;

                Ok(SensorTotalRow {
                    sensor_iri,
                    total_consumption,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Captured {
        content_type: Option<String>,
        accept: Option<String>,
        query: Option<String>,
    }

    struct Stub {
        endpoint: String,
        captured: Arc<Mutex<Captured>>,
    }

    async fn spawn_stub(status: StatusCode, body: &'static str, delay: Duration) -> Stub {
        let captured = Arc::new(Mutex::new(Captured::default()));
        let sink = captured.clone();

        let app = Router::new().route(
            "/repositories/IoT",
            post(move |headers: HeaderMap, query: String| {
                let sink = sink.clone();
                async move {
                    let header = |name: &str| {
                        headers
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string)
                    };
                    {
                        let mut captured = sink.lock().unwrap();
                        captured.content_type = header("content-type");
                        captured.accept = header("accept");
                        captured.query = Some(query);
                    }
                    tokio::time::sleep(delay).await;
                    (
                        status,
                        [("content-type", SPARQL_RESULTS_MEDIA_TYPE)],
                        body,
                    )
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Stub {
            endpoint: format!("http://{addr}/repositories/IoT"),
            captured,
        }
    }

    fn repository(endpoint: String, timeout: Duration) -> SparqlRepository {
        SparqlRepository::new(
            build_http_client(timeout).unwrap(),
            endpoint,
            SparqlQueryBuilder::new("http://example.org/sensor/"),
        )
    }

    const OBSERVATIONS: &str = r#"{
        "head": { "vars": ["resultTime", "numericValue"] },
        "results": { "bindings": [
            { "resultTime": { "type": "literal", "value": "1000" },
              "numericValue": { "type": "literal", "value": "5" } },
            { "resultTime": { "type": "literal", "value": "1001" } }
        ] }
    }"#;

    #[tokio::test]
    async fn test_observation_rows_posts_query_and_tolerates_missing_vars() {
        let stub = spawn_stub(StatusCode::OK, OBSERVATIONS, Duration::ZERO).await;
        let repo = repository(stub.endpoint.clone(), Duration::from_secs(5));

        let sensor = SensorId::parse("gen_kW").unwrap();
        let rows = repo.observation_rows(&sensor).await.unwrap();
        assert_eq!(
            rows,
            vec![
                ObservationRow::new("1000", "5"),
                ObservationRow {
                    result_time: Some("1001".to_string()),
                    numeric_value: None,
                },
            ]
        );

        let captured = stub.captured.lock().unwrap();
        assert_eq!(captured.content_type.as_deref(), Some(SPARQL_QUERY_MEDIA_TYPE));
        assert_eq!(captured.accept.as_deref(), Some(SPARQL_RESULTS_MEDIA_TYPE));
        assert!(captured
            .query
            .as_deref()
            .unwrap()
            .contains("<http://example.org/sensor/gen_kW>"));
    }

    #[tokio::test]
    async fn test_empty_bindings() {
        let stub = spawn_stub(
            StatusCode::OK,
            r#"{ "head": { "vars": ["sensor"] }, "results": { "bindings": [] } }"#,
            Duration::ZERO,
        )
        .await;
        let repo = repository(stub.endpoint, Duration::from_secs(5));

        assert!(repo.sensor_iris().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sensor_iris() {
        let stub = spawn_stub(
            StatusCode::OK,
            r#"{ "results": { "bindings": [
                { "sensor": { "type": "uri", "value": "http://example.org/sensor/gen_kW" } },
                { "sensor": { "type": "uri", "value": "http://example.org/sensor/boiler" } }
            ] } }"#,
            Duration::ZERO,
        )
        .await;
        let repo = repository(stub.endpoint, Duration::from_secs(5));

        assert_eq!(
            repo.sensor_iris().await.unwrap(),
            vec![
                "http://example.org/sensor/gen_kW",
                "http://example.org/sensor/boiler"
            ]
        );
    }

    #[tokio::test]
    async fn test_sensor_totals_parse_and_validate() {
        let stub = spawn_stub(
            StatusCode::OK,
            r#"{ "results": { "bindings": [
                { "sensor": { "type": "uri", "value": "http://example.org/sensor/boiler" },
                  "totalConsumption": { "type": "literal", "value": "1520.5" } },
                { "sensor": { "type": "uri", "value": "http://example.org/sensor/pump" } }
            ] } }"#,
            Duration::ZERO,
        )
        .await;
        let repo = repository(stub.endpoint, Duration::from_secs(5));

        match repo.sensor_totals().await {
            Err(PipelineError::MalformedResult { row, field, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(field, "totalConsumption");
            }
            other => panic!("expected malformed total, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sensor_totals() {
        let stub = spawn_stub(
            StatusCode::OK,
            r#"{ "results": { "bindings": [
                { "sensor": { "type": "uri", "value": "http://example.org/sensor/boiler" },
                  "totalConsumption": { "type": "literal", "value": "1520.5" } }
            ] } }"#,
            Duration::ZERO,
        )
        .await;
        let repo = repository(stub.endpoint, Duration::from_secs(5));

        assert_eq!(
            repo.sensor_totals().await.unwrap(),
            vec![SensorTotalRow {
                sensor_iri: "http://example.org/sensor/boiler".to_string(),
                total_consumption: 1520.5,
            }]
        );
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let stub = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, "boom", Duration::ZERO).await;
        let repo = repository(stub.endpoint, Duration::from_secs(5));

        let err = repo.sensor_iris().await.unwrap_err();
        match err {
            PipelineError::QueryServiceUnavailable(message) => {
                assert!(message.contains("500"), "{message}");
            }
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbled_body_is_malformed() {
        let stub = spawn_stub(StatusCode::OK, "<html>not json</html>", Duration::ZERO).await;
        let repo = repository(stub.endpoint, Duration::from_secs(5));

        assert!(matches!(
            repo.sensor_iris().await,
            Err(PipelineError::MalformedResult { field: "results", .. })
        ));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let stub = spawn_stub(StatusCode::OK, OBSERVATIONS, Duration::from_secs(2)).await;
        let repo = repository(stub.endpoint, Duration::from_millis(100));

        assert!(matches!(
            repo.sensor_iris().await,
            Err(PipelineError::Timeout)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let repo = repository(format!("http://{addr}/repositories/IoT"), Duration::from_secs(5));
        assert!(matches!(
            repo.sensor_iris().await,
            Err(PipelineError::QueryServiceUnavailable(_))
        ));
    }
}
