// Health monitoring domain models
use super::metric::Metric;
use super::record::RobotId;
use super::telemetry::SeriesData;
use chrono::Duration;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TimeWindow {
    #[serde(rename = "1h")]
    LastHour,
    #[default]
    #[serde(rename = "24h")]
    LastDay,
    #[serde(rename = "7d")]
    LastWeek,
    #[serde(rename = "30d")]
    LastMonth,
    #[serde(rename = "all")]
    All,
}

#[derive(Debug, Error)]
#[error("unknown time window {0:?} (expected 1h, 24h, 7d, 30d or all)")]
pub struct ParseWindowError(String);

impl FromStr for TimeWindow {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1h" => Ok(TimeWindow::LastHour),
            "24h" => Ok(TimeWindow::LastDay),
            "7d" => Ok(TimeWindow::LastWeek),
            "30d" => Ok(TimeWindow::LastMonth),
            "all" => Ok(TimeWindow::All),
            other => Err(ParseWindowError(other.to_string())),
        }
    }
}

impl TimeWindow {
    /// `None` for an unbounded window.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            TimeWindow::LastHour => Some(Duration::hours(1)),
            TimeWindow::LastDay => Some(Duration::hours(24)),
            TimeWindow::LastWeek => Some(Duration::days(7)),
            TimeWindow::LastMonth => Some(Duration::days(30)),
            TimeWindow::All => None,
        }
    }
}

/// Robot selection and time window for the health view.
#[derive(Debug, Clone, Default)]
pub struct HealthQuery {
    pub robot_id: Option<RobotId>,
    pub window: TimeWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryBand {
    Good,
    Warning,
    Critical,
    Unknown,
}

impl BatteryBand {
    pub fn classify(level: Option<f64>) -> Self {
        match level {
            Some(v) if v > 60.0 => BatteryBand::Good,
            Some(v) if v > 30.0 => BatteryBand::Warning,
            Some(_) => BatteryBand::Critical,
            None => BatteryBand::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    Normal,
    Warm,
    Hot,
    Unknown,
}

impl TemperatureBand {
    pub fn classify(temperature: Option<f64>) -> Self {
        match temperature {
            Some(v) if v > 60.0 => TemperatureBand::Hot,
            Some(v) if v > 45.0 => TemperatureBand::Warm,
            Some(_) => TemperatureBand::Normal,
            None => TemperatureBand::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Advisory,
}

impl AlertSeverity {
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("critical") || lower.contains("warning") {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Advisory
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthMetrics {
    pub avg_battery: Metric,
    pub avg_temperature: Metric,
    pub avg_cpu: Metric,
    pub total_alerts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleCount {
    pub robot_id: RobotId,
    pub name: String,
    pub cycles: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogRow {
    pub time: String,
    pub robot: String,
    pub battery: Metric,
    pub battery_band: BatteryBand,
    pub temperature: Metric,
    pub temperature_band: TemperatureBand,
    pub cpu: Metric,
    pub memory: Metric,
    pub cycles: Metric,
    pub alert_count: usize,
    pub alert_severity: Option<AlertSeverity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEntry {
    pub title: String,
    pub robot: String,
    pub time: String,
    pub severity: AlertSeverity,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub robot_id: Option<RobotId>,
    pub window: TimeWindow,
    pub metrics: HealthMetrics,
    pub charts: Vec<SeriesData>,
    pub cycle_counts: Vec<CycleCount>,
    pub recent_logs: Vec<LogRow>,
    pub alerts: Vec<AlertEntry>,
}

/// `2025-12-01T08:30:00` → `2025-12-01, 08:30`
pub fn format_log_time(timestamp: &str) -> String {
    let head = timestamp.get(..16).unwrap_or(timestamp);
    head.replacen('T', ", ", 1)
}

/// `2025-12-01T08:30:00` → `08:30`
pub fn clock_label(timestamp: &str) -> String {
    timestamp.get(11..16).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_parse() {
        assert_eq!("7d".parse::<TimeWindow>().unwrap(), TimeWindow::LastWeek);
        assert_eq!("all".parse::<TimeWindow>().unwrap(), TimeWindow::All);
        assert!("2w".parse::<TimeWindow>().is_err());
        assert_eq!(TimeWindow::All.duration(), None);
        assert_eq!(TimeWindow::LastHour.duration(), Some(Duration::hours(1)));
    }

    #[test]
    fn test_bands() {
        assert_eq!(BatteryBand::classify(Some(61.0)), BatteryBand::Good);
        assert_eq!(BatteryBand::classify(Some(60.0)), BatteryBand::Warning);
        assert_eq!(BatteryBand::classify(Some(30.0)), BatteryBand::Critical);
        assert_eq!(TemperatureBand::classify(Some(61.0)), TemperatureBand::Hot);
        assert_eq!(TemperatureBand::classify(Some(46.0)), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::classify(None), TemperatureBand::Unknown);
        assert_eq!(AlertSeverity::classify("Motor WARNING"), AlertSeverity::Critical);
        assert_eq!(AlertSeverity::classify("Low battery"), AlertSeverity::Advisory);
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_log_time("2025-12-01T08:30:00"), "2025-12-01, 08:30");
        assert_eq!(format_log_time("2025-12-01"), "2025-12-01");
        assert_eq!(clock_label("2025-12-01T08:30:00"), "08:30");
        assert_eq!(clock_label("bad"), "");
    }
}
