// Command handlers
use crate::domain::health::HealthQuery;
use crate::domain::robot::RobotFilter;
use crate::presentation::app_state::AppState;
use crate::presentation::cli::{Commands, OutputFormat};
use crate::presentation::output::render;

/// Run one command and render its result.
pub async fn handle(state: &AppState, command: Commands, format: OutputFormat) -> anyhow::Result<String> {
    match command {
        Commands::Dashboard => {
            let dashboard = state.dashboard_service.get_dashboard().await?;
            render(&dashboard, format)
        }
        Commands::Robots {
            search,
            status,
            remote,
        } => {
            let filter = RobotFilter { search, status };
            let cards = if remote {
                state.robots_service.list_remote_robots(&filter).await?
            } else {
                state.robots_service.list_robots(&filter).await?
            };
            render(&cards, format)
        }
        Commands::Health { robot, window } => {
            let query = HealthQuery {
                robot_id: robot,
                window,
            };
            let report = state.health_service.get_report(&query).await?;
            render(&report, format)
        }
        Commands::Predictions { robot_id } => {
            let report = state.prediction_service.get_report(&robot_id).await?;
            render(&report, format)
        }
        Commands::Updates => {
            let jobs = state.operations_service.list_update_jobs().await?;
            render(&jobs, format)
        }
        Commands::ScheduleUpdate { robot_id, version } => {
            let job = state
                .operations_service
                .schedule_update(&robot_id, &version)
                .await?;
            render(&job, format)
        }
        Commands::RegisterRobot {
            name,
            firmware,
            status,
        } => {
            let robot = state
                .robots_service
                .register_robot(&name, firmware.as_deref(), status.as_deref())
                .await?;
            render(&robot, format)
        }
        Commands::Teleop {
            robot_id,
            direction,
            speed,
        } => {
            let response = state
                .operations_service
                .send_command(&robot_id, direction.into(), speed)
                .await?;
            render(&response, format)
        }
        Commands::ApiHealth => {
            let health = state.operations_service.api_health().await?;
            render(&health, format)
        }
        Commands::Telemetry { limit } => {
            let entries = state.operations_service.telemetry(limit).await?;
            render(&entries, format)
        }
        // CSV regardless of the requested format
        Commands::Snapshot { kind } => Ok(state.loader.normalized(kind.into()).await),
    }
}
