// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod sparql_query;
pub mod sparql_repository;
