// Operations service - Update jobs, tele-operation and API status
use crate::application::fleet_api::{
    ApiHealth, Command, CommandAction, CommandParams, FleetApi, ScheduleUpdate, TelemetryEntry,
    UpdateJob,
};
use crate::infrastructure::config::ApiSettings;
use anyhow::Context;
use std::sync::Arc;

pub const DEFAULT_SPEED: f64 = 0.5;

#[derive(Clone)]
pub struct OperationsService {
    api: Arc<dyn FleetApi>,
    telemetry_limit: usize,
    update_limit: usize,
}

impl OperationsService {
    pub fn new(api: Arc<dyn FleetApi>, settings: &ApiSettings) -> Self {
        Self {
            api,
            telemetry_limit: settings.telemetry_limit,
            update_limit: settings.update_limit,
        }
    }

    pub async fn list_update_jobs(&self) -> anyhow::Result<Vec<UpdateJob>> {
        self.api
            .list_update_jobs(self.update_limit)
            .await
            .context("Failed to list update jobs")
    }

    pub async fn schedule_update(&self, robot_id: &str, version: &str) -> anyhow::Result<UpdateJob> {
        let robot_id = robot_id.trim();
        let version = version.trim();
        if robot_id.is_empty() || version.is_empty() {
            anyhow::bail!("Robot and version are required to schedule an update");
        }

        let request = ScheduleUpdate {
            robot_id: robot_id.to_string(),
            version: version.to_string(),
        };
        tracing::info!("Scheduling {} for robot {}", request.version, request.robot_id);

        self.api
            .schedule_update(&request)
            .await
            .with_context(|| format!("Failed to schedule {} for robot {}", version, robot_id))
    }

    pub async fn send_command(
        &self,
        robot_id: &str,
        action: CommandAction,
        speed: f64,
    ) -> anyhow::Result<serde_json::Value> {
        if !speed.is_finite() {
            anyhow::bail!("Speed must be a number, got {}", speed);
        }

        let command = Command {
            robot_id: robot_id.to_string(),
            action,
            params: CommandParams { speed },
        };
        tracing::info!("Sending {:?} to robot {} at speed {}", action, robot_id, speed);

        self.api
            .send_command(&command)
            .await
            .with_context(|| format!("Failed to send command to robot {}", robot_id))
    }

    pub async fn api_health(&self) -> anyhow::Result<ApiHealth> {
        self.api.health().await.context("Fleet API health check failed")
    }

    /// Latest telemetry entries; `limit` overrides the configured count.
    pub async fn telemetry(&self, limit: Option<usize>) -> anyhow::Result<Vec<TelemetryEntry>> {
        self.api
            .list_telemetry(limit.unwrap_or(self.telemetry_limit))
            .await
            .context("Failed to list telemetry")
    }
}
