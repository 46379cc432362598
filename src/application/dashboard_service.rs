// Dashboard service - Use case for building the fleet overview
use crate::application::aggregator::{count_where, field_equals, mean_rounded, summarize};
use crate::application::joiner::join_latest;
use crate::application::loader::SnapshotLoader;
use crate::application::synthesizer::FallbackSynthesizer;
use crate::domain::dashboard::{Dashboard, EnrichedRobotView, FleetStats};
use crate::domain::logs::{HealthLog, UpdateLog};
use crate::domain::metric::Metric;
use crate::domain::robot::Robot;
use std::sync::Arc;

const TITLE: &str = "Fleet Overview";

#[derive(Clone)]
pub struct DashboardService {
    loader: SnapshotLoader,
    synthesizer: Arc<FallbackSynthesizer>,
}

impl DashboardService {
    pub fn new(loader: SnapshotLoader, synthesizer: Arc<FallbackSynthesizer>) -> Self {
        Self {
            loader,
            synthesizer,
        }
    }

    pub async fn get_dashboard(&self) -> anyhow::Result<Dashboard> {
        let (robots, health, updates) = futures::join!(
            self.loader.load::<Robot>(),
            self.loader.load::<HealthLog>(),
            self.loader.load::<UpdateLog>(),
        );

        tracing::debug!(
            "Building dashboard from {} robots, {} health logs, {} updates",
            robots.len(),
            health.len(),
            updates.len()
        );

        Ok(build_dashboard(&robots, &health, &updates, &self.synthesizer))
    }
}

pub fn build_dashboard(
    robots: &[Robot],
    health: &[HealthLog],
    updates: &[UpdateLog],
    synthesizer: &FallbackSynthesizer,
) -> Dashboard {
    let views: Vec<EnrichedRobotView> = robots
        .iter()
        .enumerate()
        .map(|(index, robot)| enrich(index, robot, health, updates, synthesizer))
        .collect();

    let stats = fleet_stats(&views, updates);

    Dashboard::new(TITLE.to_string(), stats, views)
}

/// Take readings from the robot's latest health log when it has one, else from
/// its snapshot row. Temperature and wifi with no source at all are
/// synthesized and flagged as such.
fn enrich(
    index: usize,
    robot: &Robot,
    health: &[HealthLog],
    updates: &[UpdateLog],
    synthesizer: &FallbackSynthesizer,
) -> EnrichedRobotView {
    let id = robot.id.clone().unwrap_or_else(|| index.to_string());
    let joined = join_latest(&id, health, &[], &[], updates);

    let (battery_level, temperature, cycle_count) = match joined.health {
        Some(h) => (h.battery_level, h.temperature, h.cycle_count),
        None => (robot.battery_level, robot.temperature, robot.cycle_count),
    };

    EnrichedRobotView {
        name: robot
            .name
            .clone()
            .unwrap_or_else(|| format!("Robot {}", index + 1)),
        status: robot.status.clone().unwrap_or_else(|| "offline".to_string()),
        firmware_version: robot
            .firmware_version
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        last_update: joined
            .update
            .map(UpdateLog::summary)
            .unwrap_or_else(|| "None".to_string()),
        battery_level: Metric::from(battery_level),
        temperature: Metric::from(temperature).or(Metric::Synthetic(synthesizer.temperature(&id))),
        cycle_count: Metric::from(cycle_count),
        wifi: Metric::from(robot.motor_health).or(Metric::Synthetic(synthesizer.wifi(&id))),
        id,
    }
}

fn status(view: &EnrichedRobotView) -> Option<&str> {
    Some(view.status.as_str())
}

/// Synthesized readings are shown on cards but never averaged.
fn fleet_stats(views: &[EnrichedRobotView], updates: &[UpdateLog]) -> FleetStats {
    let measured = |m: &Metric| if m.is_synthetic() { None } else { m.value() };

    let battery = summarize(views, |v| measured(&v.battery_level), field_equals(status, "online"));

    FleetStats {
        online: battery.matching,
        total: battery.count,
        avg_battery: battery.mean,
        avg_temperature: mean_rounded(views.iter().map(|v| measured(&v.temperature))),
        alerts: count_where(views, field_equals(status, "error")),
        pending_updates: count_where(updates, |u| !u.is_completed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::snapshot_repository::testing::StaticSnapshots;
    use crate::domain::logs::LogKind;

    fn robot(id: &str, name: &str, status: &str) -> Robot {
        Robot {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            status: Some(status.to_string()),
            firmware_version: Some("2.1.0".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_latest_health_overrides_robot_row() {
        let mut atlas = robot("r1", "Atlas-01", "online");
        atlas.battery_level = Some(20.0);
        atlas.motor_health = Some(77.0);
        let health = vec![
            HealthLog {
                robot_id: Some("r1".to_string()),
                timestamp: Some("2025-12-01T08:00".to_string()),
                battery_level: Some(90.0),
                temperature: Some(40.0),
                ..Default::default()
            },
            HealthLog {
                robot_id: Some("r1".to_string()),
                timestamp: Some("2025-12-01T09:00".to_string()),
                battery_level: Some(85.0),
                temperature: Some(42.0),
                motor_health: Some(55.0),
                ..Default::default()
            },
        ];

        let dashboard = build_dashboard(&[atlas], &health, &[], &FallbackSynthesizer::new());
        let view = &dashboard.robots[0];

        assert_eq!(view.battery_level, Metric::Value(85.0));
        assert_eq!(view.temperature, Metric::Value(42.0));
        assert_eq!(view.wifi, Metric::Value(77.0));
        assert_eq!(view.last_update, "None");
    }

    #[test]
    fn test_health_log_replaces_every_robot_reading() {
        let synth = FallbackSynthesizer::new();
        let mut atlas = robot("r1", "Atlas-01", "online");
        atlas.temperature = Some(39.0);
        atlas.cycle_count = Some(1200.0);
        let health = vec![HealthLog {
            robot_id: Some("r1".to_string()),
            timestamp: Some("2025-12-01T08:00".to_string()),
            battery_level: Some(64.0),
            ..Default::default()
        }];

        let dashboard = build_dashboard(&[atlas], &health, &[], &synth);
        let view = &dashboard.robots[0];

        assert_eq!(view.battery_level, Metric::Value(64.0));
        assert_eq!(view.temperature, Metric::Synthetic(synth.temperature("r1")));
        assert_eq!(view.cycle_count, Metric::NoData);
    }

    #[test]
    fn test_missing_readings_are_synthesized() {
        let synth = FallbackSynthesizer::new();
        let dashboard = build_dashboard(&[robot("r9", "Nova-03", "offline")], &[], &[], &synth);
        let view = &dashboard.robots[0];

        assert_eq!(view.battery_level, Metric::NoData);
        assert_eq!(view.temperature, Metric::Synthetic(synth.temperature("r9")));
        assert_eq!(view.wifi, Metric::Synthetic(synth.wifi("r9")));
        assert_eq!(dashboard.stats.avg_temperature, Metric::NoData);
    }

    #[test]
    fn test_defaults_for_blank_robot_row() {
        let dashboard = build_dashboard(
            &[robot("r1", "Atlas-01", "online"), Robot::default()],
            &[],
            &[],
            &FallbackSynthesizer::new(),
        );
        let view = &dashboard.robots[1];

        assert_eq!(view.id, "1");
        assert_eq!(view.name, "Robot 2");
        assert_eq!(view.status, "offline");
        assert_eq!(view.firmware_version, "Unknown");
    }

    #[test]
    fn test_fleet_stats_match_status_exactly() {
        let robots = vec![
            robot("r1", "Atlas-01", "Online"),
            robot("r2", "Titan-02", "ERROR"),
            robot("r3", "Nova-03", "online"),
        ];

        let dashboard = build_dashboard(&robots, &[], &[], &FallbackSynthesizer::new());

        assert_eq!(dashboard.stats.online, 1);
        assert_eq!(dashboard.stats.alerts, 0);
        assert_eq!(dashboard.stats.total, 3);
    }

    #[test]
    fn test_fleet_stats() {
        let mut robots = vec![
            robot("r1", "Atlas-01", "online"),
            robot("r2", "Titan-02", "error"),
            robot("r3", "Nova-03", "online"),
        ];
        robots[0].battery_level = Some(80.0);
        robots[1].battery_level = Some(61.0);
        robots[0].temperature = Some(40.0);
        let updates = vec![
            UpdateLog {
                robot_id: Some("r1".to_string()),
                update_type: Some("firmware".to_string()),
                version_from: Some("1.0".to_string()),
                version_to: Some("1.1".to_string()),
                status: Some("completed".to_string()),
                ..Default::default()
            },
            UpdateLog {
                robot_id: Some("r2".to_string()),
                status: Some("pending".to_string()),
                ..Default::default()
            },
        ];

        let dashboard = build_dashboard(&robots, &[], &updates, &FallbackSynthesizer::new());

        assert_eq!(
            dashboard.stats,
            FleetStats {
                online: 2,
                total: 3,
                avg_battery: Metric::Value(71.0),
                avg_temperature: Metric::Value(40.0),
                alerts: 1,
                pending_updates: 1,
            }
        );
        assert_eq!(dashboard.robots[0].last_update, "firmware 1.0→1.1");
    }

    #[tokio::test]
    async fn test_get_dashboard_survives_missing_logs() {
        let repo = StaticSnapshots::new().with(
            LogKind::Robot,
            "id,name,status,battery_level\nr1,Atlas-01,online,87\nr2,Titan-02,maintenance,",
        );
        let service = DashboardService::new(
            SnapshotLoader::new(Arc::new(repo)),
            Arc::new(FallbackSynthesizer::new()),
        );

        let dashboard = service.get_dashboard().await.unwrap();

        assert_eq!(dashboard.stats.total, 2);
        assert_eq!(dashboard.stats.online, 1);
        assert_eq!(dashboard.stats.avg_battery, Metric::Value(87.0));
        assert_eq!(dashboard.stats.pending_updates, 0);
    }
}
