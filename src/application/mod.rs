// Application layer - Use cases and repository interfaces
pub mod normalizer;
pub mod observation_repository;
pub mod sensor_service;
pub mod series_service;
