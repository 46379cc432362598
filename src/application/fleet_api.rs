// Fleet management API - trait and wire types
use crate::domain::robot::Robot;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to fleet API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("fleet API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Ids arrive as numbers or strings depending on the endpoint.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Numeric ids are sent as numbers, anything else as a string.
fn serialize_id<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
    match id.parse::<i64>() {
        Ok(n) => serializer.serialize_i64(n),
        Err(_) => serializer.serialize_str(id),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiRobot {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub battery_level: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub cycle_count: Option<f64>,
    #[serde(default)]
    pub motor_health: Option<f64>,
}

impl From<ApiRobot> for Robot {
    fn from(robot: ApiRobot) -> Self {
        Robot {
            id: robot.id,
            name: robot.name,
            status: robot.status,
            firmware_version: robot.firmware_version,
            battery_level: robot.battery_level,
            temperature: robot.temperature,
            cycle_count: robot.cycle_count,
            motor_health: robot.motor_health,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRobot {
    pub name: String,
    pub firmware_version: String,
    pub status: String,
}

impl NewRobot {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidRequest("Robot name is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateJob {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub robot_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl UpdateJob {
    /// e.g. `Job #3 robot 1 — pending (v1.2.0)`
    pub fn describe(&self) -> String {
        format!(
            "Job #{} robot {} — {} ({})",
            self.id.as_deref().unwrap_or("?"),
            self.robot_id.as_deref().unwrap_or("?"),
            self.status.as_deref().unwrap_or("unknown"),
            self.version.as_deref().unwrap_or("?")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleUpdate {
    #[serde(serialize_with = "serialize_id")]
    pub robot_id: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEntry {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub robot_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiHealth {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandAction {
    Forward,
    Back,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandParams {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    #[serde(serialize_with = "serialize_id")]
    pub robot_id: String,
    pub action: CommandAction,
    pub params: CommandParams,
}

#[async_trait]
pub trait FleetApi: Send + Sync {
    async fn list_robots(&self) -> Result<Vec<ApiRobot>, ApiError>;

    async fn create_robot(&self, robot: &NewRobot) -> Result<ApiRobot, ApiError>;

    async fn list_telemetry(&self, limit: usize) -> Result<Vec<TelemetryEntry>, ApiError>;

    async fn list_update_jobs(&self, limit: usize) -> Result<Vec<UpdateJob>, ApiError>;

    async fn schedule_update(&self, request: &ScheduleUpdate) -> Result<UpdateJob, ApiError>;

    async fn health(&self) -> Result<ApiHealth, ApiError>;

    /// Tele-operation command; the response body is passed through untouched
    async fn send_command(&self, command: &Command) -> Result<serde_json::Value, ApiError>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every write and answers reads from canned data.
    #[derive(Debug, Default)]
    pub struct FakeFleetApi {
        pub robots: Vec<ApiRobot>,
        pub jobs: Mutex<Vec<UpdateJob>>,
        pub commands: Mutex<Vec<Command>>,
        pub created: Mutex<Vec<NewRobot>>,
        pub telemetry_limits: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl FleetApi for FakeFleetApi {
        async fn list_robots(&self) -> Result<Vec<ApiRobot>, ApiError> {
            Ok(self.robots.clone())
        }

        async fn create_robot(&self, robot: &NewRobot) -> Result<ApiRobot, ApiError> {
            self.created.lock().unwrap().push(robot.clone());
            Ok(ApiRobot {
                id: Some("new".to_string()),
                name: Some(robot.name.clone()),
                status: Some(robot.status.clone()),
                firmware_version: Some(robot.firmware_version.clone()),
                ..Default::default()
            })
        }

        async fn list_telemetry(&self, limit: usize) -> Result<Vec<TelemetryEntry>, ApiError> {
            self.telemetry_limits.lock().unwrap().push(limit);
            Ok(Vec::new())
        }

        async fn list_update_jobs(&self, limit: usize) -> Result<Vec<UpdateJob>, ApiError> {
            Ok(self.jobs.lock().unwrap().iter().take(limit).cloned().collect())
        }

        async fn schedule_update(&self, request: &ScheduleUpdate) -> Result<UpdateJob, ApiError> {
            let mut jobs = self.jobs.lock().unwrap();
            let job = UpdateJob {
                id: Some((jobs.len() + 1).to_string()),
                robot_id: Some(request.robot_id.clone()),
                status: Some("pending".to_string()),
                version: Some(request.version.clone()),
            };
            jobs.push(job.clone());
            Ok(job)
        }

        async fn health(&self) -> Result<ApiHealth, ApiError> {
            Ok(ApiHealth {
                status: Some("ok".to_string()),
                details: BTreeMap::new(),
            })
        }

        async fn send_command(&self, command: &Command) -> Result<serde_json::Value, ApiError> {
            self.commands.lock().unwrap().push(command.clone());
            Ok(serde_json::json!({ "accepted": true }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_accept_numbers_and_strings() {
        let jobs: Vec<UpdateJob> = serde_json::from_str(
            r#"[{"id": 3, "robot_id": 1, "status": "pending", "version": "v1.2.0"},
                {"id": "a7", "robot_id": "692bceb9", "status": "completed"}]"#,
        )
        .unwrap();

        assert_eq!(jobs[0].describe(), "Job #3 robot 1 — pending (v1.2.0)");
        assert_eq!(jobs[1].robot_id.as_deref(), Some("692bceb9"));
        assert_eq!(jobs[1].version, None);
    }

    #[test]
    fn test_command_wire_format() {
        let command = Command {
            robot_id: "1".to_string(),
            action: CommandAction::Forward,
            params: CommandParams { speed: 0.5 },
        };

        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            serde_json::json!({ "robot_id": 1, "action": "forward", "params": { "speed": 0.5 } })
        );
    }

    #[test]
    fn test_schedule_wire_format() {
        let request = ScheduleUpdate {
            robot_id: "692bceb9".to_string(),
            version: "v1.0.0".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "robot_id": "692bceb9", "version": "v1.0.0" })
        );
    }

    #[test]
    fn test_new_robot_requires_name() {
        let robot = NewRobot {
            name: "  ".to_string(),
            firmware_version: "1.0.0".to_string(),
            status: "Offline".to_string(),
        };

        assert!(matches!(robot.validate(), Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_telemetry_keeps_extra_fields() {
        let entry: TelemetryEntry =
            serde_json::from_str(r#"{"robot_id": 2, "battery_level": 71, "timestamp": "2025-12-01T08:00"}"#)
                .unwrap();

        assert_eq!(entry.robot_id.as_deref(), Some("2"));
        assert_eq!(entry.fields.get("battery_level"), Some(&serde_json::json!(71)));
    }
}
