// Prediction service - Use case for maintenance and usage forecasting
use crate::application::aggregator::{count_where, mean_rounded};
use crate::application::joiner::{all_for, join_latest, latest_for, latest_joints};
use crate::application::loader::SnapshotLoader;
use crate::application::synthesizer::FallbackSynthesizer;
use crate::domain::health::clock_label;
use crate::domain::logs::{HealthLog, JointData, JointStatus, PathLog, UpdateLog, parse_timestamp};
use crate::domain::metric::Metric;
use crate::domain::prediction::{
    BatteryForecast, FailureSummary, JointRisk, PredictionReport, QuickInsights, RateSource,
    SyntheticParts, UsageForecast,
};
use crate::domain::robot::Robot;
use crate::domain::telemetry::{SeriesData, SeriesPoint};
use crate::infrastructure::config::PredictionSettings;
use chrono::{Days, NaiveDateTime};
use std::sync::Arc;

#[derive(Clone)]
pub struct PredictionService {
    loader: SnapshotLoader,
    synthesizer: Arc<FallbackSynthesizer>,
    settings: PredictionSettings,
}

/// One robot's records across every log kind, before synthesis.
#[derive(Debug, Clone, Default)]
pub struct RobotLogs {
    pub health: Vec<HealthLog>,
    pub joints: Vec<JointData>,
    pub paths: Vec<PathLog>,
    pub updates: Vec<UpdateLog>,
}

impl RobotLogs {
    pub fn collect(
        robot_id: &str,
        health: &[HealthLog],
        joints: &[JointData],
        paths: &[PathLog],
        updates: &[UpdateLog],
    ) -> Self {
        Self {
            health: all_for(health, robot_id).into_iter().cloned().collect(),
            joints: latest_joints(joints, robot_id).into_iter().cloned().collect(),
            paths: all_for(paths, robot_id).into_iter().cloned().collect(),
            updates: all_for(updates, robot_id).into_iter().cloned().collect(),
        }
    }

    /// Replace every log the join finds absent with synthesized records.
    fn fill_gaps(mut self, robot_id: &str, synthesizer: &FallbackSynthesizer) -> (Self, SyntheticParts) {
        let joined = join_latest(robot_id, &self.health, &self.joints, &self.paths, &self.updates);
        if joined.is_empty() {
            tracing::debug!("No records for robot {}; every log is synthesized", robot_id);
        }
        let synthetic = SyntheticParts {
            health: joined.health.is_none(),
            joints: joined.joint.is_none(),
            paths: joined.path.is_none(),
            updates: joined.update.is_none(),
        };

        if synthetic.health {
            self.health = synthesizer.health_series(robot_id);
        }
        if synthetic.joints {
            self.joints = synthesizer.joints(robot_id);
        }
        if synthetic.paths {
            self.paths = synthesizer.paths(robot_id);
        }
        if synthetic.updates {
            self.updates = vec![synthesizer.update(robot_id)];
        }

        if synthetic != SyntheticParts::default() {
            tracing::debug!("Synthesized {:?} for robot {}", synthetic, robot_id);
        }

        (self, synthetic)
    }
}

impl PredictionService {
    pub fn new(
        loader: SnapshotLoader,
        synthesizer: Arc<FallbackSynthesizer>,
        settings: PredictionSettings,
    ) -> Self {
        Self {
            loader,
            synthesizer,
            settings,
        }
    }

    pub async fn get_report(&self, robot_id: &str) -> anyhow::Result<PredictionReport> {
        let (robots, health, joints, paths, updates) = futures::join!(
            self.loader.load::<Robot>(),
            self.loader.load::<HealthLog>(),
            self.loader.load::<JointData>(),
            self.loader.load::<PathLog>(),
            self.loader.load::<UpdateLog>(),
        );

        let logs = RobotLogs::collect(robot_id, &health, &joints, &paths, &updates);
        let label = robot_label(robot_id, &robots, &self.synthesizer);

        Ok(build_prediction_report(
            robot_id,
            label,
            logs,
            &self.synthesizer,
            &self.settings,
        ))
    }
}

/// Display label: the robot snapshot's name, then the profile label, then the id.
pub fn robot_label(robot_id: &str, robots: &[Robot], synthesizer: &FallbackSynthesizer) -> String {
    robots
        .iter()
        .find(|r| r.id.as_deref() == Some(robot_id))
        .and_then(|r| r.name.clone())
        .or_else(|| synthesizer.label(robot_id).map(str::to_string))
        .unwrap_or_else(|| robot_id.to_string())
}

pub fn build_prediction_report(
    robot_id: &str,
    robot_label: String,
    logs: RobotLogs,
    synthesizer: &FallbackSynthesizer,
    settings: &PredictionSettings,
) -> PredictionReport {
    let (logs, synthetic) = logs.fill_gaps(robot_id, synthesizer);
    let latest_health = latest_for(&logs.health, robot_id);

    let insights = QuickInsights {
        system_health: tagged(latest_health.and_then(|h| h.motor_health), synthetic.health),
        battery_level: tagged(latest_health.and_then(|h| h.battery_level), synthetic.health),
        avg_wear: tag(
            mean_rounded(logs.joints.iter().map(|j| j.wear_level)),
            synthetic.joints,
        ),
        maintenance_joints: logs
            .joints
            .iter()
            .filter(|j| j.status().needs_maintenance())
            .map(joint_risk)
            .collect(),
    };

    let failure = failure_summary(&logs.joints);
    let battery = battery_forecast(&logs.health, synthetic.health);
    let usage = usage_forecast(&logs.health, settings);

    let alerts: Vec<String> = logs.health.iter().flat_map(HealthLog::alerts).collect();
    let recommendations = recommendations(insights.maintenance_joints.len(), &alerts);

    let charts = vec![
        SeriesData::new(
            "battery",
            "Battery Forecast",
            Some("%"),
            logs.health
                .iter()
                .map(|h| {
                    SeriesPoint::new(
                        clock_label(h.timestamp.as_deref().unwrap_or_default()),
                        tagged(h.battery_level, synthetic.health),
                    )
                })
                .collect(),
        )
        .synthetic(synthetic.health),
        SeriesData::new(
            "usage",
            "Usage Patterns",
            Some("m"),
            logs.paths
                .iter()
                .map(|p| {
                    let date = p
                        .start_time
                        .as_deref()
                        .and_then(|t| t.split('T').next())
                        .unwrap_or_default();
                    SeriesPoint::new(date, tagged(p.total_distance, synthetic.paths))
                })
                .collect(),
        )
        .synthetic(synthetic.paths),
    ];

    PredictionReport {
        robot_id: robot_id.to_string(),
        robot_label,
        insights,
        failure,
        battery,
        usage,
        alerts,
        recommendations,
        last_update: latest_for(&logs.updates, robot_id).map(UpdateLog::summary),
        charts,
        synthetic,
    }
}

fn tagged(value: Option<f64>, synthetic: bool) -> Metric {
    tag(Metric::from(value), synthetic)
}

fn tag(metric: Metric, synthetic: bool) -> Metric {
    match metric {
        Metric::Value(v) if synthetic => Metric::Synthetic(v),
        other => other,
    }
}

fn joint_risk(joint: &JointData) -> JointRisk {
    JointRisk {
        joint_id: joint.joint_id.clone(),
        name: joint.joint_name.clone(),
        group: joint.joint_group.clone(),
        risk: joint.status(),
        wear: Metric::from(joint.wear_level),
    }
}

fn failure_summary(joints: &[JointData]) -> FailureSummary {
    let critical = count_where(joints, |j| j.status() == JointStatus::Error);
    let elevated = count_where(joints, |j| j.status() == JointStatus::Warning);

    let risk_score = if joints.is_empty() {
        Metric::NoData
    } else {
        let weighted = critical as f64 + 0.5 * elevated as f64;
        Metric::Value((100.0 * weighted / joints.len() as f64).round())
    };

    FailureSummary {
        critical,
        elevated,
        normal: joints.len() - critical - elevated,
        risk_score,
    }
}

/// Readings of `value` paired with parseable timestamps, in log order.
fn timed<'a>(
    health: &'a [HealthLog],
    value: impl Fn(&HealthLog) -> Option<f64> + 'a,
) -> impl Iterator<Item = (NaiveDateTime, f64)> + 'a {
    health.iter().filter_map(move |h| {
        let at = h.timestamp.as_deref().and_then(parse_timestamp)?;
        Some((at, value(h)?))
    })
}

/// Rate of change per hour between the first and last timed readings.
fn hourly_rate(readings: &[(NaiveDateTime, f64)]) -> Option<f64> {
    let (first, last) = (readings.first()?, readings.last()?);
    let hours = (last.0 - first.0).num_seconds() as f64 / 3600.0;
    if hours <= 0.0 {
        return None;
    }
    Some((last.1 - first.1) / hours)
}

fn battery_forecast(health: &[HealthLog], synthetic: bool) -> BatteryForecast {
    let current = health.iter().rev().find_map(|h| h.battery_level);
    let readings: Vec<_> = timed(health, |h| h.battery_level).collect();

    let drain = hourly_rate(&readings).map(|r| -r).filter(|d| *d > 0.0);
    let minutes_remaining = match (current, drain) {
        (Some(level), Some(drain)) => Some((level / drain * 60.0).round() as i64),
        _ => None,
    };

    BatteryForecast {
        current_level: tagged(current, synthetic),
        drain_per_hour: tagged(drain.map(|d| (d * 10.0).round() / 10.0), synthetic),
        minutes_remaining,
    }
}

fn usage_forecast(health: &[HealthLog], settings: &PredictionSettings) -> UsageForecast {
    let total = health.iter().rev().find_map(|h| h.cycle_count);
    let readings: Vec<_> = timed(health, |h| h.cycle_count).collect();

    let measured = hourly_rate(&readings)
        .map(|per_hour| per_hour * 24.0)
        .filter(|per_day| *per_day > 0.0);
    let (cycles_per_day, rate_source) = match measured {
        Some(rate) => ((rate * 10.0).round() / 10.0, RateSource::Measured),
        None => (settings.cycles_per_day, RateSource::Configured),
    };

    let step = settings.milestone_step;
    // Out-of-range counts give no milestone rather than a wrapped one.
    let next_milestone = total
        .filter(|t| step > 0 && t.is_finite())
        .and_then(|t| {
            let reached = (t.max(0.0) / step as f64).floor() as u64;
            reached.checked_add(1)?.checked_mul(step)
        });
    let cycles_remaining = match (next_milestone, total) {
        (Some(m), Some(t)) => Some((m as f64 - t).ceil() as u64),
        _ => None,
    };
    let days_to_milestone = cycles_remaining
        .filter(|_| cycles_per_day > 0.0)
        .map(|r| (r as f64 / cycles_per_day).ceil() as u64);

    // Dates count from the newest reading so reports are reproducible.
    let anchor = timed(health, |_| Some(0.0)).map(|(at, _)| at).max();
    let estimated_date = match (anchor, days_to_milestone) {
        (Some(at), Some(days)) => at.date().checked_add_days(Days::new(days)),
        _ => None,
    };

    UsageForecast {
        total_cycles: Metric::from(total),
        cycles_per_day,
        rate_source,
        next_milestone,
        cycles_remaining,
        days_to_milestone,
        estimated_date,
    }
}

fn recommendations(maintenance_joints: usize, alerts: &[String]) -> Vec<String> {
    let mut out = Vec::new();

    if maintenance_joints > 0 {
        out.push(format!(
            "Schedule maintenance for {} high-wear joints soon to prevent failures.",
            maintenance_joints
        ));
    }
    if !alerts.is_empty() {
        out.push(format!("Check system alerts: {}", alerts.join(", ")));
    }
    if out.is_empty() {
        out.push("System is operating optimally. Continue current maintenance schedule.".to_string());
    }

    out
}
