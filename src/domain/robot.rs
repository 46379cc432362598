// Robot domain model
use super::metric::Metric;
use super::record::RobotId;
use serde::Serialize;

/// A row of the robot snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Robot {
    pub id: Option<RobotId>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub firmware_version: Option<String>,
    pub battery_level: Option<f64>,
    pub temperature: Option<f64>,
    pub cycle_count: Option<f64>,
    pub motor_health: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RobotStatus {
    Online,
    Maintenance,
    Offline,
    Error,
    #[serde(untagged)]
    Other(String),
}

impl RobotStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "online" => RobotStatus::Online,
            "maintenance" => RobotStatus::Maintenance,
            "offline" => RobotStatus::Offline,
            "error" => RobotStatus::Error,
            _ => RobotStatus::Other(raw.trim().to_string()),
        }
    }

    /// Capitalized label, e.g. `Online`.
    pub fn label(&self) -> String {
        match self {
            RobotStatus::Online => "Online".to_string(),
            RobotStatus::Maintenance => "Maintenance".to_string(),
            RobotStatus::Offline => "Offline".to_string(),
            RobotStatus::Error => "Error".to_string(),
            RobotStatus::Other(s) => capitalize(s),
        }
    }
}

impl Robot {
    pub fn status(&self) -> RobotStatus {
        self.status
            .as_deref()
            .map(RobotStatus::parse)
            .unwrap_or(RobotStatus::Offline)
    }
}

/// A robot as listed on the fleet overview.
#[derive(Debug, Clone, Serialize)]
pub struct RobotCard {
    pub id: Option<RobotId>,
    pub name: String,
    pub version: String,
    pub status: String,
    pub battery: Metric,
    pub temperature: Metric,
    pub steps: Metric,
    pub wifi: Metric,
}

impl RobotCard {
    pub fn from_robot(robot: &Robot, name: String) -> Self {
        let version = match robot.firmware_version.as_deref() {
            Some(fw) if !fw.is_empty() => format!("v{}", fw),
            _ => "v?".to_string(),
        };

        Self {
            id: robot.id.clone(),
            name,
            version,
            status: robot.status().label(),
            battery: Metric::from(robot.battery_level),
            temperature: Metric::from(robot.temperature),
            steps: Metric::from(robot.cycle_count),
            wifi: Metric::from(robot.motor_health),
        }
    }
}

/// Search and status filter for the robot list.
#[derive(Debug, Clone, Default)]
pub struct RobotFilter {
    pub search: String,
    pub status: Option<String>,
}

impl RobotFilter {
    pub fn matches(&self, card: &RobotCard) -> bool {
        let name_matches = card
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase());

        let status_matches = match self.status.as_deref() {
            None | Some("") => true,
            Some(wanted) => card.status.eq_ignore_ascii_case(wanted),
        };

        name_matches && status_matches
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
