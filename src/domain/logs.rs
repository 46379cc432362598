// Per-robot log domain models
use super::record::{Record, RobotId};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// The snapshot kinds the dashboard loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogKind {
    Robot,
    HealthLog,
    JointData,
    PathLog,
    UpdateLog,
}

impl LogKind {
    /// Name used in export file names, e.g. `HealthLog` in `HealthLog_export.csv`.
    pub fn stem(&self) -> &'static str {
        match self {
            LogKind::Robot => "Robot",
            LogKind::HealthLog => "HealthLog",
            LogKind::JointData => "JointData",
            LogKind::PathLog => "PathLog",
            LogKind::UpdateLog => "UpdateLog",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// A log row that belongs to one robot.
///
/// Logs are expected in ascending time order; "latest" always means last
/// in iteration order.
pub trait RobotLog {
    fn robot_id(&self) -> Option<&str>;
    fn timestamp(&self) -> Option<&str>;
}

impl RobotLog for Record {
    fn robot_id(&self) -> Option<&str> {
        self.get("robot_id")
    }

    fn timestamp(&self) -> Option<&str> {
        self.get("timestamp")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthLog {
    pub robot_id: Option<RobotId>,
    pub timestamp: Option<String>,
    pub battery_level: Option<f64>,
    pub temperature: Option<f64>,
    pub cpu_usage: Option<f64>,
    pub memory_usage: Option<f64>,
    pub cycle_count: Option<f64>,
    pub motor_health: Option<f64>,
    pub alerts: Option<String>,
}

impl HealthLog {
    pub fn alerts(&self) -> Vec<String> {
        parse_alerts(self.alerts.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JointStatus {
    Normal,
    Warning,
    Error,
    Unknown,
}

impl JointStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" | "ok" => JointStatus::Normal,
            "warning" => JointStatus::Warning,
            "error" | "critical" => JointStatus::Error,
            _ => JointStatus::Unknown,
        }
    }

    pub fn needs_maintenance(&self) -> bool {
        matches!(self, JointStatus::Warning | JointStatus::Error)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointData {
    pub robot_id: Option<RobotId>,
    pub joint_id: Option<String>,
    pub joint_name: Option<String>,
    pub joint_group: Option<String>,
    pub status: Option<String>,
    pub wear_level: Option<f64>,
    pub current_angle: Option<f64>,
    pub timestamp: Option<String>,
}

impl JointData {
    pub fn status(&self) -> JointStatus {
        self.status
            .as_deref()
            .map(JointStatus::parse)
            .unwrap_or(JointStatus::Unknown)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathLog {
    pub robot_id: Option<RobotId>,
    pub start_time: Option<String>,
    pub total_distance: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateLog {
    pub robot_id: Option<RobotId>,
    pub update_type: Option<String>,
    pub version_from: Option<String>,
    pub version_to: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<String>,
}

impl UpdateLog {
    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some("completed")
    }

    /// e.g. `firmware 1.0→1.1`
    pub fn summary(&self) -> String {
        format!(
            "{} {}→{}",
            self.update_type.as_deref().unwrap_or_default(),
            self.version_from.as_deref().unwrap_or_default(),
            self.version_to.as_deref().unwrap_or_default()
        )
    }
}

macro_rules! impl_robot_log {
    ($($ty:ty),*) => {
        $(
            impl RobotLog for $ty {
                fn robot_id(&self) -> Option<&str> {
                    self.robot_id.as_deref()
                }

                fn timestamp(&self) -> Option<&str> {
                    self.timestamp.as_deref()
                }
            }
        )*
    };
}

impl_robot_log!(HealthLog, JointData, UpdateLog);

impl RobotLog for PathLog {
    fn robot_id(&self) -> Option<&str> {
        self.robot_id.as_deref()
    }

    // Path logs are ordered by their start time.
    fn timestamp(&self) -> Option<&str> {
        self.start_time.as_deref().or(self.timestamp.as_deref())
    }
}

/// Parse an `alerts` cell such as `['Low battery', 'Overheat']`.
///
/// Absent cells, blank cells and the `[]` marker yield no alerts; so does
/// anything that fails to parse as a list of strings.
pub fn parse_alerts(raw: Option<&str>) -> Vec<String> {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() && r != "[]" => r,
        _ => return Vec::new(),
    };

    match serde_json::from_str::<Vec<String>>(&raw.replace('\'', "\"")) {
        Ok(alerts) => alerts,
        Err(e) => {
            tracing::debug!("Ignoring unparseable alerts cell {:?}: {}", raw, e);
            Vec::new()
        }
    }
}

/// Parse the ISO-like timestamps found in exports (with or without seconds,
/// fractional seconds or an offset).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    const FORMATS: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
