// Domain layer - Sensor series models and pure computations
pub mod error;
pub mod outliers;
pub mod sensor;
pub mod series;
