// SPARQL query text for the observation store
use crate::domain::sensor::SensorId;

const PREFIXES: &str = "PREFIX sosa: <http://www.w3.org/ns/sosa/>
PREFIX qudt: <http://qudt.org/schema/qudt/>
";

#[derive(Debug, Clone)]
pub struct SparqlQueryBuilder {
    sensor_namespace: String,
}

impl SparqlQueryBuilder {
    /// `sensor_namespace` is trusted configuration, validated at load time.
    pub fn new(sensor_namespace: impl Into<String>) -> Self {
        Self {
            sensor_namespace: sensor_namespace.into(),
        }
    }

    pub fn sensor_iri(&self, sensor: &SensorId) -> String {
        format!("<{}{}>", self.sensor_namespace, sensor.as_str())
    }

    pub fn observation_query(&self, sensor: &SensorId) -> String {
        format!(
            "{PREFIXES}
SELECT ?resultTime ?numericValue
WHERE {{
  ?observation a sosa:Observation ;
               sosa:resultTime ?resultTime ;
               sosa:madeBySensor {sensor} ;
               sosa:hasResult ?result .
  ?result qudt:numericValue ?numericValue .
}}
ORDER BY ?resultTime
",
            sensor = self.sensor_iri(sensor)
        )
    }

    pub fn sensor_list_query(&self) -> String {
        format!(
            "{PREFIXES}
SELECT DISTINCT ?sensor
WHERE {{
  ?sensor a sosa:Sensor .
}}
"
        )
    }

    pub fn sensor_totals_query(&self) -> String {
        format!(
            "{PREFIXES}
SELECT ?sensor (SUM(?numericValue) AS ?totalConsumption)
WHERE {{
  ?observation a sosa:Observation ;
               sosa:madeBySensor ?sensor ;
               sosa:hasResult ?result .
  ?result qudt:numericValue ?numericValue ;
          qudt:unit qudt:Watt .
}}
GROUP BY ?sensor
"
        )
    }
}
