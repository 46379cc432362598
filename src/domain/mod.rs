// Domain layer - Fleet records and view models
pub mod dashboard;
pub mod health;
pub mod logs;
pub mod metric;
pub mod prediction;
pub mod record;
pub mod robot;
pub mod telemetry;
