// Record joiner - latest record per robot across independent logs
use crate::domain::logs::{HealthLog, JointData, PathLog, RobotLog, UpdateLog};

/// All records belonging to `robot_id`, in log order.
pub fn all_for<'a, T: RobotLog>(records: &'a [T], robot_id: &str) -> Vec<&'a T> {
    records
        .iter()
        .filter(|r| r.robot_id() == Some(robot_id))
        .collect()
}

/// The most recent record for `robot_id`, i.e. the last matching one in
/// iteration order.
///
/// Logs must already be sorted ascending by time; nothing is re-sorted here.
/// A matching timestamp that sorts before its predecessor is logged as a
/// warning since the answer is then likely wrong.
pub fn latest_for<'a, T: RobotLog>(records: &'a [T], robot_id: &str) -> Option<&'a T> {
    let mut latest: Option<&'a T> = None;
    let mut out_of_order = false;

    for record in records.iter().filter(|r| r.robot_id() == Some(robot_id)) {
        if let (Some(prev), Some(curr)) = (latest.and_then(|l| l.timestamp()), record.timestamp()) {
            if curr < prev {
                out_of_order = true;
            }
        }
        latest = Some(record);
    }

    if out_of_order {
        tracing::warn!(
            "Log for robot {} is not in ascending time order; latest record may be wrong",
            robot_id
        );
    }

    latest
}

/// Latest record of each log kind for one robot.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinedRobot<'a> {
    pub health: Option<&'a HealthLog>,
    pub joint: Option<&'a JointData>,
    pub path: Option<&'a PathLog>,
    pub update: Option<&'a UpdateLog>,
}

impl JoinedRobot<'_> {
    pub fn is_empty(&self) -> bool {
        self.health.is_none() && self.joint.is_none() && self.path.is_none() && self.update.is_none()
    }
}

pub fn join_latest<'a>(
    robot_id: &str,
    health: &'a [HealthLog],
    joints: &'a [JointData],
    paths: &'a [PathLog],
    updates: &'a [UpdateLog],
) -> JoinedRobot<'a> {
    JoinedRobot {
        health: latest_for(health, robot_id),
        joint: latest_for(joints, robot_id),
        path: latest_for(paths, robot_id),
        update: latest_for(updates, robot_id),
    }
}

/// Latest row per joint for one robot, keeping first-seen joint order.
pub fn latest_joints<'a>(joints: &'a [JointData], robot_id: &str) -> Vec<&'a JointData> {
    let mut latest: Vec<&'a JointData> = Vec::new();

    for joint in all_for(joints, robot_id) {
        match latest
            .iter_mut()
            .find(|seen| joint.joint_id.is_some() && seen.joint_id == joint.joint_id)
        {
            Some(slot) => *slot = joint,
            None => latest.push(joint),
        }
    }

    latest
}
