// Infrastructure layer - External dependencies and adapters
pub mod api_client;
pub mod config;
pub mod csv_normalizer;
pub mod file_repository;
pub mod http_repository;
pub mod schema;
