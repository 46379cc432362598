// Application layer - Use cases and repository interfaces
pub mod aggregator;
pub mod dashboard_service;
pub mod fleet_api;
pub mod health_service;
pub mod joiner;
pub mod loader;
pub mod operations_service;
pub mod prediction_service;
pub mod robots_service;
pub mod snapshot_repository;
pub mod synthesizer;
