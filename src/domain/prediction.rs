// Maintenance prediction domain models
use super::logs::JointStatus;
use super::metric::Metric;
use super::record::RobotId;
use super::telemetry::SeriesData;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JointRisk {
    pub joint_id: Option<String>,
    pub name: Option<String>,
    pub group: Option<String>,
    pub risk: JointStatus,
    pub wear: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickInsights {
    pub system_health: Metric,
    pub battery_level: Metric,
    pub avg_wear: Metric,
    pub maintenance_joints: Vec<JointRisk>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureSummary {
    pub critical: usize,
    pub elevated: usize,
    pub normal: usize,
    /// Weighted share of joints at risk, in percent.
    pub risk_score: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryForecast {
    pub current_level: Metric,
    pub drain_per_hour: Metric,
    pub minutes_remaining: Option<i64>,
}

impl BatteryForecast {
    /// e.g. `17h 24m`
    pub fn time_remaining(&self) -> Option<String> {
        self.minutes_remaining
            .map(|m| format!("{}h {}m", m / 60, m % 60))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Measured,
    Configured,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageForecast {
    pub total_cycles: Metric,
    pub cycles_per_day: f64,
    pub rate_source: RateSource,
    pub next_milestone: Option<u64>,
    pub cycles_remaining: Option<u64>,
    pub days_to_milestone: Option<u64>,
    pub estimated_date: Option<NaiveDate>,
}

/// Which parts of a report were synthesized for lack of real records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyntheticParts {
    pub health: bool,
    pub joints: bool,
    pub paths: bool,
    pub updates: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub robot_id: RobotId,
    pub robot_label: String,
    pub insights: QuickInsights,
    pub failure: FailureSummary,
    pub battery: BatteryForecast,
    pub usage: UsageForecast,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
    pub last_update: Option<String>,
    pub charts: Vec<SeriesData>,
    pub synthetic: SyntheticParts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_remaining() {
        let forecast = BatteryForecast {
            current_level: Metric::Value(87.0),
            drain_per_hour: Metric::Value(5.0),
            minutes_remaining: Some(1044),
        };
        assert_eq!(forecast.time_remaining().as_deref(), Some("17h 24m"));
    }
}
