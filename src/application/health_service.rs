// Health service - Use case for the health monitoring view
use crate::application::aggregator::{max_per_robot, mean_rounded};
use crate::application::loader::SnapshotLoader;
use crate::domain::health::{
    AlertEntry, AlertSeverity, BatteryBand, CycleCount, HealthMetrics, HealthQuery, HealthReport,
    LogRow, TemperatureBand, clock_label, format_log_time,
};
use crate::domain::logs::{HealthLog, parse_timestamp};
use crate::domain::metric::Metric;
use crate::domain::robot::Robot;
use crate::domain::telemetry::{SeriesData, SeriesPoint};
use std::collections::HashMap;

#[derive(Clone)]
pub struct HealthService {
    loader: SnapshotLoader,
    recent_logs: usize,
}

impl HealthService {
    pub fn new(loader: SnapshotLoader, recent_logs: usize) -> Self {
        Self {
            loader,
            recent_logs,
        }
    }

    pub async fn get_report(&self, query: &HealthQuery) -> anyhow::Result<HealthReport> {
        let (health, robots) = futures::join!(
            self.loader.load::<HealthLog>(),
            self.loader.load::<Robot>(),
        );

        Ok(build_health_report(&health, &robots, query, self.recent_logs))
    }
}

pub fn build_health_report(
    health: &[HealthLog],
    robots: &[Robot],
    query: &HealthQuery,
    recent_logs: usize,
) -> HealthReport {
    let names = display_names(robots);
    let name_of = |id: Option<&str>| -> String {
        let id = id.unwrap_or_default();
        names.get(id).cloned().unwrap_or_else(|| id.to_string())
    };

    let selected = select(health, query);
    tracing::debug!(
        "Health view: {} of {} logs selected for {:?}",
        selected.len(),
        health.len(),
        query
    );

    let metrics = HealthMetrics {
        avg_battery: mean_rounded(selected.iter().map(|h| h.battery_level)),
        avg_temperature: mean_rounded(selected.iter().map(|h| h.temperature)),
        avg_cpu: mean_rounded(selected.iter().map(|h| h.cpu_usage)),
        total_alerts: selected.iter().map(|h| h.alerts().len()).sum(),
    };

    let chart = |id: &str, title: &str, unit: &str, value: fn(&HealthLog) -> Option<f64>| {
        let points = selected
            .iter()
            .map(|h| {
                SeriesPoint::new(
                    clock_label(h.timestamp.as_deref().unwrap_or_default()),
                    Metric::from(value(h)),
                )
            })
            .collect();
        SeriesData::new(id, title, Some(unit), points)
    };
    let charts = vec![
        chart("battery", "Battery Level", "%", |h| h.battery_level),
        chart("temperature", "Temperature", "°C", |h| h.temperature),
        chart("cpu", "CPU Usage", "%", |h| h.cpu_usage),
        chart("memory", "Memory Usage", "%", |h| h.memory_usage),
    ];

    // Cycle counters always cover the whole log.
    let cycle_counts = max_per_robot(health, |h| h.cycle_count)
        .into_iter()
        .map(|(robot_id, cycles)| CycleCount {
            name: name_of(Some(robot_id.as_str())),
            robot_id,
            cycles,
        })
        .collect();

    let recent_logs = selected
        .iter()
        .rev()
        .take(recent_logs)
        .map(|h| {
            let alerts = h.alerts();
            LogRow {
                time: format_log_time(h.timestamp.as_deref().unwrap_or_default()),
                robot: name_of(h.robot_id.as_deref()),
                battery: Metric::from(h.battery_level),
                battery_band: BatteryBand::classify(h.battery_level),
                temperature: Metric::from(h.temperature),
                temperature_band: TemperatureBand::classify(h.temperature),
                cpu: Metric::from(h.cpu_usage),
                memory: Metric::from(h.memory_usage),
                cycles: Metric::from(h.cycle_count),
                alert_count: alerts.len(),
                alert_severity: alerts
                    .iter()
                    .map(|a| AlertSeverity::classify(a))
                    .min_by_key(|s| *s != AlertSeverity::Critical),
            }
        })
        .collect();

    let alerts = selected
        .iter()
        .rev()
        .flat_map(|h| {
            let robot = name_of(h.robot_id.as_deref());
            let time = format_log_time(h.timestamp.as_deref().unwrap_or_default());
            h.alerts().into_iter().map(move |title| AlertEntry {
                severity: AlertSeverity::classify(&title),
                title,
                robot: robot.clone(),
                time: time.clone(),
            })
        })
        .collect();

    HealthReport {
        robot_id: query.robot_id.clone(),
        window: query.window,
        metrics,
        charts,
        cycle_counts,
        recent_logs,
        alerts,
    }
}

/// Logs for the queried robot inside the queried window, in log order.
///
/// Bounded windows end at the newest parseable timestamp among the robot's
/// logs; logs without a parseable timestamp fall outside every bounded window.
fn select<'a>(health: &'a [HealthLog], query: &HealthQuery) -> Vec<&'a HealthLog> {
    let for_robot: Vec<&HealthLog> = health
        .iter()
        .filter(|h| match query.robot_id.as_deref() {
            Some(id) => h.robot_id.as_deref() == Some(id),
            None => true,
        })
        .collect();

    let Some(span) = query.window.duration() else {
        return for_robot;
    };

    let parsed = |h: &HealthLog| h.timestamp.as_deref().and_then(parse_timestamp);
    let Some(newest) = for_robot.iter().filter_map(|h| parsed(*h)).max() else {
        return Vec::new();
    };
    let cutoff = newest - span;

    for_robot
        .into_iter()
        .filter(|h| parsed(*h).is_some_and(|t| t >= cutoff))
        .collect()
}

fn display_names(robots: &[Robot]) -> HashMap<String, String> {
    robots
        .iter()
        .filter_map(|r| Some((r.id.clone()?, r.name.clone()?)))
        .collect()
}
