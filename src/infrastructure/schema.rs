// Typed log schemas decoded from normalized records
use crate::domain::logs::{HealthLog, JointData, LogKind, PathLog, UpdateLog};
use crate::domain::record::Record;
use crate::domain::robot::Robot;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("{kind} snapshot is missing required column(s): {}", missing.join(", "))]
    MissingColumns { kind: LogKind, missing: Vec<String> },
}

/// A log kind with a fixed set of columns.
pub trait FromRecord: Sized {
    const KIND: LogKind;

    /// Columns the views cannot do without.
    const REQUIRED: &'static [&'static str];

    fn from_record(record: &Record) -> Self;
}

pub fn validate_headers(kind: LogKind, headers: &[String], required: &[&str]) -> Result<(), SchemaError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h.as_str() == **col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns { kind, missing })
    }
}

/// Decode records into `T`.
///
/// A header lacking required columns is reported and the affected fields
/// decode as unset; rows are never dropped.
pub fn decode<T: FromRecord>(records: &[Record]) -> Vec<T> {
    if let Some(first) = records.first() {
        if let Err(e) = validate_headers(T::KIND, first.headers(), T::REQUIRED) {
            tracing::warn!("{}", e);
        }
    }

    records.iter().map(T::from_record).collect()
}

fn text(record: &Record, field: &str) -> Option<String> {
    record
        .get(field)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl FromRecord for Robot {
    const KIND: LogKind = LogKind::Robot;
    const REQUIRED: &'static [&'static str] = &["id", "name", "status"];

    fn from_record(record: &Record) -> Self {
        Self {
            id: text(record, "id"),
            name: text(record, "name"),
            status: text(record, "status"),
            firmware_version: text(record, "firmware_version"),
            battery_level: record.number("battery_level"),
            temperature: record.number("temperature"),
            cycle_count: record.number("cycle_count"),
            motor_health: record.number("motor_health"),
        }
    }
}

impl FromRecord for HealthLog {
    const KIND: LogKind = LogKind::HealthLog;
    const REQUIRED: &'static [&'static str] = &["robot_id", "timestamp", "battery_level"];

    fn from_record(record: &Record) -> Self {
        Self {
            robot_id: text(record, "robot_id"),
            timestamp: text(record, "timestamp"),
            battery_level: record.number("battery_level"),
            temperature: record.number("temperature"),
            cpu_usage: record.number("cpu_usage"),
            memory_usage: record.number("memory_usage"),
            cycle_count: record.number("cycle_count"),
            motor_health: record.number("motor_health"),
            alerts: text(record, "alerts"),
        }
    }
}

impl FromRecord for JointData {
    const KIND: LogKind = LogKind::JointData;
    const REQUIRED: &'static [&'static str] = &["robot_id", "joint_id", "wear_level"];

    fn from_record(record: &Record) -> Self {
        Self {
            robot_id: text(record, "robot_id"),
            joint_id: text(record, "joint_id"),
            joint_name: text(record, "joint_name"),
            joint_group: text(record, "joint_group"),
            status: text(record, "status"),
            wear_level: record.number("wear_level"),
            current_angle: record.number("current_angle"),
            timestamp: text(record, "timestamp"),
        }
    }
}

impl FromRecord for PathLog {
    const KIND: LogKind = LogKind::PathLog;
    const REQUIRED: &'static [&'static str] = &["robot_id", "total_distance"];

    fn from_record(record: &Record) -> Self {
        Self {
            robot_id: text(record, "robot_id"),
            start_time: text(record, "start_time"),
            total_distance: record.number("total_distance"),
            x: record.number("x"),
            y: record.number("y"),
            timestamp: text(record, "timestamp"),
        }
    }
}

impl FromRecord for UpdateLog {
    const KIND: LogKind = LogKind::UpdateLog;
    const REQUIRED: &'static [&'static str] = &["robot_id", "status"];

    fn from_record(record: &Record) -> Self {
        Self {
            robot_id: text(record, "robot_id"),
            update_type: text(record, "update_type"),
            version_from: text(record, "version_from"),
            version_to: text(record, "version_to"),
            status: text(record, "status"),
            timestamp: text(record, "timestamp"),
        }
    }
}
