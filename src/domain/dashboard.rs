// Dashboard domain model
use super::metric::Metric;
use super::record::RobotId;
use serde::Serialize;

/// A robot row enriched with its latest health and update records.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRobotView {
    pub id: RobotId,
    pub name: String,
    pub status: String,
    pub battery_level: Metric,
    pub temperature: Metric,
    pub cycle_count: Metric,
    pub firmware_version: String,
    pub wifi: Metric,
    pub last_update: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetStats {
    pub online: usize,
    pub total: usize,
    pub avg_battery: Metric,
    pub avg_temperature: Metric,
    pub alerts: usize,
    pub pending_updates: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub stats: FleetStats,
    pub robots: Vec<EnrichedRobotView>,
}

impl Dashboard {
    pub fn new(title: String, stats: FleetStats, robots: Vec<EnrichedRobotView>) -> Self {
        Self {
            title,
            stats,
            robots,
        }
    }
}
