// Fallback synthesizer - deterministic placeholder data for robots without records
use crate::domain::logs::{HealthLog, JointData, PathLog, UpdateLog};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

const PROFILES_TOML: &str = include_str!("synthetic_profiles.toml");

/// Points in every synthesized series.
pub const SERIES_LEN: usize = 7;

const JOINT_NAMES: [&str; 7] = ["Shoulder", "Elbow", "Knee", "Wrist", "Hip", "Ankle", "Torso"];

#[derive(Debug, Clone, Default, Deserialize)]
struct ProfileTable {
    #[serde(default)]
    robots: BTreeMap<String, Profile>,
}

#[derive(Debug, Clone, Deserialize)]
struct Profile {
    label: String,
    battery: Vec<f64>,
    distances: Vec<f64>,
    #[serde(default)]
    joints: Vec<ProfileJoint>,
    #[serde(default)]
    alert: Option<ProfileAlert>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProfileJoint {
    joint_id: String,
    joint_name: String,
    status: String,
    wear_level: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct ProfileAlert {
    index: usize,
    message: String,
}

/// Produces placeholder records for a robot id.
///
/// Ids found in the profile table get their listed series; any other id gets
/// a series derived from the SHA-256 digest of the id. Output depends only on
/// the id, and nothing produced here is ever written back.
#[derive(Debug, Clone)]
pub struct FallbackSynthesizer {
    table: ProfileTable,
}

impl Default for FallbackSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackSynthesizer {
    pub fn new() -> Self {
        match Self::from_toml(PROFILES_TOML) {
            Ok(synthesizer) => synthesizer,
            Err(e) => {
                tracing::error!("Invalid synthetic profile table: {}", e);
                Self {
                    table: ProfileTable::default(),
                }
            }
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        Ok(Self {
            table: toml::from_str(text)?,
        })
    }

    /// Display label for profiled ids, e.g. `Atlas-01`.
    pub fn label(&self, robot_id: &str) -> Option<&str> {
        self.table.robots.get(robot_id).map(|p| p.label.as_str())
    }

    pub fn health_series(&self, robot_id: &str) -> Vec<HealthLog> {
        let profile = self.profile(robot_id);

        profile
            .battery
            .iter()
            .take(SERIES_LEN)
            .enumerate()
            .map(|(i, &battery)| {
                let alerts = match &profile.alert {
                    Some(alert) if alert.index == i => format!("['{}']", alert.message),
                    _ => "[]".to_string(),
                };
                HealthLog {
                    robot_id: Some(robot_id.to_string()),
                    timestamp: Some(format!("2025-12-01T{:02}:00", i * 2)),
                    battery_level: Some(battery),
                    motor_health: Some(battery + 10.0),
                    alerts: Some(alerts),
                    ..Default::default()
                }
            })
            .collect()
    }

    pub fn joints(&self, robot_id: &str) -> Vec<JointData> {
        self.profile(robot_id)
            .joints
            .into_iter()
            .map(|j| JointData {
                robot_id: Some(robot_id.to_string()),
                joint_id: Some(j.joint_id),
                joint_name: Some(j.joint_name),
                status: Some(j.status),
                wear_level: Some(j.wear_level),
                ..Default::default()
            })
            .collect()
    }

    pub fn paths(&self, robot_id: &str) -> Vec<PathLog> {
        self.profile(robot_id)
            .distances
            .iter()
            .take(SERIES_LEN)
            .enumerate()
            .map(|(i, &distance)| PathLog {
                robot_id: Some(robot_id.to_string()),
                start_time: Some(format!("2025-12-{:02}T08:00", i + 1)),
                total_distance: Some(distance),
                ..Default::default()
            })
            .collect()
    }

    pub fn update(&self, robot_id: &str) -> UpdateLog {
        UpdateLog {
            robot_id: Some(robot_id.to_string()),
            update_type: Some("firmware".to_string()),
            version_from: Some("1.0".to_string()),
            version_to: Some("1.1".to_string()),
            ..Default::default()
        }
    }

    /// Placeholder temperature in °C, between 35 and 44.
    pub fn temperature(&self, robot_id: &str) -> f64 {
        35.0 + f64::from(digest(robot_id)[4] % 10)
    }

    /// Placeholder signal strength in percent, between 60 and 99.
    pub fn wifi(&self, robot_id: &str) -> f64 {
        60.0 + f64::from(digest(robot_id)[5] % 40)
    }

    fn profile(&self, robot_id: &str) -> Profile {
        match self.table.robots.get(robot_id) {
            Some(profile) => profile.clone(),
            None => derive_profile(robot_id),
        }
    }
}

fn digest(robot_id: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(robot_id.as_bytes()));
    out
}

fn derive_profile(robot_id: &str) -> Profile {
    let d = digest(robot_id);

    let start = 50.0 + f64::from(d[0] % 50);
    let battery = (0..SERIES_LEN).map(|i| start - 2.0 * i as f64).collect();

    let first_distance = 400.0 + 100.0 * f64::from(d[1] % 30);
    let distances = (0..SERIES_LEN)
        .map(|i| first_distance + 100.0 * i as f64)
        .collect();

    let wear = f64::from(d[2] % 80);
    let status = if wear >= 60.0 {
        "error"
    } else if wear >= 40.0 {
        "warning"
    } else {
        "normal"
    };
    let slot = usize::from(d[3]) % JOINT_NAMES.len();

    Profile {
        label: robot_id.to_string(),
        battery,
        distances,
        joints: vec![ProfileJoint {
            joint_id: format!("J{}", slot + 1),
            joint_name: JOINT_NAMES[slot].to_string(),
            status: status.to_string(),
            wear_level: wear,
        }],
        alert: None,
    }
}
