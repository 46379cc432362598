// Robots service - Use case for listing and registering robots
use crate::application::fleet_api::{ApiRobot, FleetApi, NewRobot};
use crate::application::loader::SnapshotLoader;
use crate::domain::robot::{Robot, RobotCard, RobotFilter};
use anyhow::Context;
use std::sync::Arc;

pub const DEFAULT_FIRMWARE: &str = "1.0.0";
pub const DEFAULT_STATUS: &str = "Offline";

#[derive(Clone)]
pub struct RobotsService {
    loader: SnapshotLoader,
    api: Arc<dyn FleetApi>,
}

impl RobotsService {
    pub fn new(loader: SnapshotLoader, api: Arc<dyn FleetApi>) -> Self {
        Self { loader, api }
    }

    /// Cards for named robots matching `filter`, in snapshot order.
    pub async fn list_robots(&self, filter: &RobotFilter) -> anyhow::Result<Vec<RobotCard>> {
        let robots: Vec<Robot> = self.loader.load().await;
        Ok(robot_cards(&robots, filter))
    }

    /// Cards for named robots the fleet API knows about, matching `filter`.
    pub async fn list_remote_robots(&self, filter: &RobotFilter) -> anyhow::Result<Vec<RobotCard>> {
        let robots: Vec<Robot> = self
            .api
            .list_robots()
            .await
            .context("Failed to list robots from the fleet API")?
            .into_iter()
            .map(Robot::from)
            .collect();
        tracing::debug!("Fleet API listed {} robots", robots.len());

        Ok(robot_cards(&robots, filter))
    }

    pub async fn register_robot(
        &self,
        name: &str,
        firmware_version: Option<&str>,
        status: Option<&str>,
    ) -> anyhow::Result<ApiRobot> {
        let request = NewRobot {
            name: name.trim().to_string(),
            firmware_version: firmware_version.unwrap_or(DEFAULT_FIRMWARE).to_string(),
            status: status.unwrap_or(DEFAULT_STATUS).to_string(),
        };
        request.validate()?;

        tracing::info!("Registering robot {}", request.name);
        self.api
            .create_robot(&request)
            .await
            .with_context(|| format!("Failed to register robot {}", request.name))
    }
}

pub fn robot_cards(robots: &[Robot], filter: &RobotFilter) -> Vec<RobotCard> {
    robots
        .iter()
        .filter_map(|robot| {
            let name = robot.name.clone()?;
            Some(RobotCard::from_robot(robot, name))
        })
        .filter(|card| filter.matches(card))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fleet_api::testing::FakeFleetApi;
    use crate::application::snapshot_repository::testing::StaticSnapshots;
    use crate::domain::logs::LogKind;
    use crate::domain::metric::Metric;

    const ROBOTS: &str = "id,name,status,firmware_version,battery_level,temperature,cycle_count,motor_health\n\
                          r1,Atlas-01,online,2.1.0,87,41,15420,92\n\
                          r2\n\
                          r3,Titan-02,maintenance,2.0.3,45,39,8200\n\
                          r4,Atlas-07,error,3.0.0,12,58,30011,40";

    fn service(api: Arc<FakeFleetApi>) -> RobotsService {
        let repo = StaticSnapshots::new().with(LogKind::Robot, ROBOTS);
        RobotsService::new(SnapshotLoader::new(Arc::new(repo)), api)
    }

    #[tokio::test]
    async fn test_nameless_rows_hidden() {
        let cards = service(Arc::default())
            .list_robots(&RobotFilter::default())
            .await
            .unwrap();

        let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Atlas-01", "Titan-02", "Atlas-07"]);
        assert_eq!(cards[0].steps, Metric::Value(15420.0));
        assert_eq!(cards[1].wifi, Metric::NoData);
        assert_eq!(cards[2].version, "v3.0.0");
    }

    #[tokio::test]
    async fn test_search_and_status_filter() {
        let service = service(Arc::default());
        let filter = RobotFilter {
            search: "ATLAS".to_string(),
            status: Some("error".to_string()),
        };

        let cards = service.list_robots(&filter).await.unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Atlas-07");
        assert_eq!(cards[0].status, "Error");
    }

    #[tokio::test]
    async fn test_remote_robots_use_same_cards() {
        let api = FakeFleetApi {
            robots: vec![
                ApiRobot {
                    id: Some("7".to_string()),
                    name: Some("Phoenix-05".to_string()),
                    status: Some("online".to_string()),
                    firmware_version: Some("2.2.0".to_string()),
                    battery_level: Some(64.0),
                    motor_health: Some(88.0),
                    ..Default::default()
                },
                ApiRobot {
                    id: Some("8".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let cards = service(Arc::new(api))
            .list_remote_robots(&RobotFilter::default())
            .await
            .unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Phoenix-05");
        assert_eq!(cards[0].version, "v2.2.0");
        assert_eq!(cards[0].status, "Online");
        assert_eq!(cards[0].wifi, Metric::Value(88.0));
        assert_eq!(cards[0].steps, Metric::NoData);
    }

    #[tokio::test]
    async fn test_register_uses_defaults() {
        let api = Arc::new(FakeFleetApi::default());
        let robot = service(api.clone())
            .register_robot("  Orion-04 ", None, None)
            .await
            .unwrap();

        assert_eq!(robot.name.as_deref(), Some("Orion-04"));
        let created = api.created.lock().unwrap();
        assert_eq!(created[0].firmware_version, DEFAULT_FIRMWARE);
        assert_eq!(created[0].status, DEFAULT_STATUS);
    }

    #[tokio::test]
    async fn test_register_requires_name() {
        let api = Arc::new(FakeFleetApi::default());
        let err = service(api.clone())
            .register_robot("   ", None, None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Robot name is required"));
        assert!(api.created.lock().unwrap().is_empty());
    }
}
