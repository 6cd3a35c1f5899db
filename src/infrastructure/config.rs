use crate::domain::outliers::DEFAULT_Z_THRESHOLD;
use crate::domain::sensor::SensorId;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub sparql: SparqlSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SparqlSettings {
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_sensor_namespace")]
    pub sensor_namespace: String,
    #[serde(default = "default_generation_sensor")]
    pub generation_sensor: String,
}

impl SparqlSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineSettings {
    #[serde(default = "default_z_threshold")]
    pub z_threshold: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            z_threshold: default_z_threshold(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_sensor_namespace() -> String {
    "http://example.org/sensor/".to_string()
}

fn default_generation_sensor() -> String {
    "gen_kW".to_string()
}

fn default_z_threshold() -> f64 {
    DEFAULT_Z_THRESHOLD
}

impl ServiceConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.pipeline.z_threshold.is_finite() && self.pipeline.z_threshold > 0.0) {
            anyhow::bail!(
                "pipeline.z_threshold must be a positive number, got {}",
                self.pipeline.z_threshold
            );
        }
        if self.sparql.timeout_secs == 0 {
            anyhow::bail!("sparql.timeout_secs must be greater than zero");
        }
        validate_namespace(&self.sparql.sensor_namespace)?;
        SensorId::parse(&self.sparql.generation_sensor)?;
        Ok(())
    }
}

/// The namespace is spliced into `<...>`, so it must be an absolute http(s)
/// IRI without characters that terminate or escape an IRI reference.
fn validate_namespace(namespace: &str) -> anyhow::Result<()> {
    if !(namespace.starts_with("http://") || namespace.starts_with("https://")) {
        anyhow::bail!("sparql.sensor_namespace must be an http(s) IRI, got {namespace:?}");
    }
    if namespace
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || "<>\"{}|^`\\".contains(c))
    {
        anyhow::bail!("sparql.sensor_namespace contains characters not allowed in an IRI");
    }
    Ok(())
}

pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/service"))
        .add_source(
            config::Environment::with_prefix("SENSOR_SERIES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    parse_service_config(settings)
}

pub fn parse_service_config(settings: config::Config) -> anyhow::Result<ServiceConfig> {
    let config: ServiceConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
