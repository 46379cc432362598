// Command line interface definition
use crate::application::fleet_api::CommandAction;
use crate::application::operations_service::DEFAULT_SPEED;
use crate::domain::health::TimeWindow;
use crate::domain::logs::LogKind;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fleet-monitor")]
#[command(about = "Robot fleet monitor - log snapshot views and fleet API operations", long_about = None)]
pub struct Cli {
    /// Configuration file path without extension
    #[arg(long, default_value = "config/fleet")]
    pub config: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fleet overview with enriched robot cards
    Dashboard,
    /// List robots from the robot snapshot
    Robots {
        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        search: String,
        /// Only robots with this status
        #[arg(long)]
        status: Option<String>,
        /// List robots from the fleet API instead of the snapshot
        #[arg(long)]
        remote: bool,
    },
    /// Health metrics, charts, log history and alerts
    Health {
        /// Restrict to one robot id
        #[arg(long)]
        robot: Option<String>,
        /// Time window: 1h, 24h, 7d, 30d or all
        #[arg(long, default_value = "24h")]
        window: TimeWindow,
    },
    /// Maintenance and usage predictions for one robot
    Predictions {
        /// Robot id
        robot_id: String,
    },
    /// List update jobs from the fleet API
    Updates,
    /// Schedule a firmware update
    ScheduleUpdate {
        /// Robot id
        robot_id: String,
        /// Target version, e.g. v1.2.0
        version: String,
    },
    /// Register a new robot with the fleet API
    RegisterRobot {
        /// Robot name
        name: String,
        /// Firmware version (defaults to 1.0.0)
        #[arg(long)]
        firmware: Option<String>,
        /// Initial status (defaults to Offline)
        #[arg(long)]
        status: Option<String>,
    },
    /// Send a tele-operation command
    Teleop {
        /// Robot id
        robot_id: String,
        /// Movement direction
        #[arg(value_enum)]
        direction: Direction,
        /// Speed parameter sent with the command
        #[arg(long, default_value_t = DEFAULT_SPEED)]
        speed: f64,
    },
    /// Fleet API health status
    ApiHealth,
    /// Latest telemetry entries from the fleet API
    Telemetry {
        /// Number of entries (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print one log export, normalized, as CSV
    Snapshot {
        #[arg(value_enum)]
        kind: SnapshotKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotKind {
    Robots,
    Health,
    Joints,
    Paths,
    Updates,
}

impl From<SnapshotKind> for LogKind {
    fn from(kind: SnapshotKind) -> Self {
        match kind {
            SnapshotKind::Robots => LogKind::Robot,
            SnapshotKind::Health => LogKind::HealthLog,
            SnapshotKind::Joints => LogKind::JointData,
            SnapshotKind::Paths => LogKind::PathLog,
            SnapshotKind::Updates => LogKind::UpdateLog,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl From<Direction> for CommandAction {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => CommandAction::Forward,
            Direction::Back => CommandAction::Back,
            Direction::Left => CommandAction::Left,
            Direction::Right => CommandAction::Right,
        }
    }
}
