// Sensor domain model
use serde::Serialize;
use std::fmt;

use super::error::PipelineError;

const MAX_SENSOR_ID_LEN: usize = 128;

/// A sensor name that is safe to splice into an IRI.
///
/// Only ASCII alphanumerics, `_`, `-` and `.` are accepted, so a value of
/// this type can never close the surrounding `<...>` or start new syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SensorId(String);

impl SensorId {
    pub fn parse(raw: &str) -> Result<Self, PipelineError> {
        let reject = |reason| PipelineError::InvalidSensorId {
            id: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(reject("must not be empty"));
        }
        if raw.len() > MAX_SENSOR_ID_LEN {
            return Err(reject("longer than 128 characters"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(reject("only ASCII letters, digits, '_', '-' and '.' are allowed"));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip the sensor namespace from an IRI. IRIs outside the namespace are
/// returned unchanged.
pub fn local_name<'a>(iri: &'a str, namespace: &str) -> &'a str {
    iri.strip_prefix(namespace).unwrap_or(iri)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorTotal {
    pub sensor: String,
    pub total_consumption: f64,
}

impl SensorTotal {
    pub fn new(sensor: String, total_consumption: f64) -> Self {
        Self {
            sensor,
            total_consumption,
        }
    }
}
