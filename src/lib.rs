// Sensor series pipeline - SPARQL observations to cleaned, cumulative series
pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
