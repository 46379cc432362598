// Output rendering - JSON for machines, plain text for terminals
use crate::application::fleet_api::{ApiHealth, ApiRobot, TelemetryEntry, UpdateJob};
use crate::domain::dashboard::Dashboard;
use crate::domain::health::HealthReport;
use crate::domain::metric::{Metric, NO_DATA};
use crate::domain::prediction::PredictionReport;
use crate::domain::robot::RobotCard;
use crate::presentation::cli::OutputFormat;
use serde::Serialize;
use std::fmt::Write;

/// Plain-text view of a result.
pub trait Render {
    fn render_text(&self) -> String;
}

pub fn render<T: Serialize + Render>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(value.render_text()),
    }
}

/// A reading with its unit; synthesized readings are marked `(est.)`.
fn reading(metric: &Metric, unit: &str) -> String {
    if metric.is_synthetic() {
        format!("{} (est.)", metric.with_unit(unit))
    } else {
        metric.with_unit(unit)
    }
}

impl Render for Dashboard {
    fn render_text(&self) -> String {
        let mut out = String::new();
        let stats = &self.stats;
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(
            out,
            "Online {}/{} | Avg battery {} | Avg temp {} | Alerts {} | Pending updates {}",
            stats.online,
            stats.total,
            reading(&stats.avg_battery, "%"),
            reading(&stats.avg_temperature, "°C"),
            stats.alerts,
            stats.pending_updates
        );

        for robot in &self.robots {
            let _ = writeln!(
                out,
                "  {} [{}] battery {} temp {} cycles {} wifi {} fw {} last update: {}",
                robot.name,
                robot.status,
                reading(&robot.battery_level, "%"),
                reading(&robot.temperature, "°C"),
                reading(&robot.cycle_count, ""),
                reading(&robot.wifi, "%"),
                robot.firmware_version,
                robot.last_update
            );
        }
        out
    }
}

impl Render for Vec<RobotCard> {
    fn render_text(&self) -> String {
        if self.is_empty() {
            return "No robots found\n".to_string();
        }

        let mut out = String::new();
        for card in self {
            let _ = writeln!(
                out,
                "{} {} [{}] battery {} temp {} steps {} wifi {}",
                card.name,
                card.version,
                card.status,
                reading(&card.battery, "%"),
                reading(&card.temperature, "°C"),
                reading(&card.steps, ""),
                reading(&card.wifi, "%")
            );
        }
        out
    }
}

impl Render for HealthReport {
    fn render_text(&self) -> String {
        let mut out = String::new();
        let m = &self.metrics;
        let _ = writeln!(
            out,
            "Robot {} | window {}",
            self.robot_id.as_deref().unwrap_or("all"),
            serde_json::to_value(self.window)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default()
        );
        let _ = writeln!(
            out,
            "Avg battery {} | Avg temp {} | Avg CPU {} | Alerts {}",
            reading(&m.avg_battery, "%"),
            reading(&m.avg_temperature, "°C"),
            reading(&m.avg_cpu, "%"),
            m.total_alerts
        );

        let _ = writeln!(out, "Cycle counts:");
        for count in &self.cycle_counts {
            let _ = writeln!(out, "  {}: {}", count.name, Metric::Value(count.cycles));
        }

        let _ = writeln!(out, "Recent logs:");
        for row in &self.recent_logs {
            let _ = writeln!(
                out,
                "  {} {} battery {} temp {} cpu {} mem {} alerts {}",
                row.time,
                row.robot,
                reading(&row.battery, "%"),
                reading(&row.temperature, "°C"),
                reading(&row.cpu, "%"),
                reading(&row.memory, "%"),
                row.alert_count
            );
        }

        if !self.alerts.is_empty() {
            let _ = writeln!(out, "Alerts:");
            for alert in &self.alerts {
                let _ = writeln!(out, "  [{:?}] {} - {} ({})", alert.severity, alert.title, alert.robot, alert.time);
            }
        }
        out
    }
}

impl Render for PredictionReport {
    fn render_text(&self) -> String {
        let mut out = String::new();
        let insights = &self.insights;
        let _ = writeln!(out, "{} ({})", self.robot_label, self.robot_id);
        let _ = writeln!(
            out,
            "System health {} | Battery {} | Avg wear {} | Joints needing maintenance {}",
            reading(&insights.system_health, "%"),
            reading(&insights.battery_level, "%"),
            reading(&insights.avg_wear, "%"),
            insights.maintenance_joints.len()
        );
        let _ = writeln!(
            out,
            "Failure risk {} | critical {} elevated {} normal {}",
            reading(&self.failure.risk_score, "%"),
            self.failure.critical,
            self.failure.elevated,
            self.failure.normal
        );
        let _ = writeln!(
            out,
            "Battery drain {} per hour | time remaining {}",
            reading(&self.battery.drain_per_hour, "%"),
            self.battery.time_remaining().as_deref().unwrap_or(NO_DATA)
        );

        let usage = &self.usage;
        let milestone = match (usage.next_milestone, usage.days_to_milestone) {
            (Some(m), Some(days)) => format!("{} cycles in {} days", m, days),
            _ => NO_DATA.to_string(),
        };
        let _ = writeln!(
            out,
            "Cycles {} at {} per day | next milestone {}",
            reading(&usage.total_cycles, ""),
            usage.cycles_per_day,
            milestone
        );

        if let Some(update) = &self.last_update {
            let _ = writeln!(out, "Last update: {}", update);
        }
        let _ = writeln!(out, "Recommendations:");
        for recommendation in &self.recommendations {
            let _ = writeln!(out, "  - {}", recommendation);
        }
        out
    }
}

impl Render for Vec<UpdateJob> {
    fn render_text(&self) -> String {
        if self.is_empty() {
            return "No update jobs\n".to_string();
        }
        self.iter().map(|job| format!("{}\n", job.describe())).collect()
    }
}

impl Render for UpdateJob {
    fn render_text(&self) -> String {
        format!("Scheduled {}\n", self.describe())
    }
}

impl Render for ApiRobot {
    fn render_text(&self) -> String {
        format!(
            "Registered {} (id {})\n",
            self.name.as_deref().unwrap_or("robot"),
            self.id.as_deref().unwrap_or("?")
        )
    }
}

impl Render for ApiHealth {
    fn render_text(&self) -> String {
        format!("API status: {}\n", self.status.as_deref().unwrap_or("unknown"))
    }
}

impl Render for Vec<TelemetryEntry> {
    fn render_text(&self) -> String {
        let mut out = String::new();
        for entry in self {
            let fields: Vec<String> = entry
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            let _ = writeln!(
                out,
                "{} robot {} {}",
                entry.timestamp.as_deref().unwrap_or("-"),
                entry.robot_id.as_deref().unwrap_or("?"),
                fields.join(" ")
            );
        }
        out
    }
}

impl Render for serde_json::Value {
    fn render_text(&self) -> String {
        format!("{}\n", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{EnrichedRobotView, FleetStats};

    fn dashboard() -> Dashboard {
        Dashboard::new(
            "Fleet Overview".to_string(),
            FleetStats {
                online: 1,
                total: 1,
                avg_battery: Metric::Value(87.0),
                avg_temperature: Metric::NoData,
                alerts: 0,
                pending_updates: 0,
            },
            vec![EnrichedRobotView {
                id: "r1".to_string(),
                name: "Atlas-01".to_string(),
                status: "online".to_string(),
                battery_level: Metric::Value(87.0),
                temperature: Metric::Synthetic(41.0),
                cycle_count: Metric::NoData,
                firmware_version: "2.1.0".to_string(),
                wifi: Metric::Synthetic(72.0),
                last_update: "None".to_string(),
            }],
        )
    }

    #[test]
    fn test_text_marks_estimates() {
        let text = render(&dashboard(), OutputFormat::Text).unwrap();

        assert!(text.starts_with("Fleet Overview\n"));
        assert!(text.contains("Avg temp N/A"));
        assert!(text.contains("temp 41°C (est.)"));
        assert!(text.contains("cycles N/A"));
    }

    #[test]
    fn test_json_output() {
        let json: serde_json::Value =
            serde_json::from_str(&render(&dashboard(), OutputFormat::Json).unwrap()).unwrap();

        assert_eq!(json["stats"]["avg_battery"], serde_json::json!(87.0));
        assert_eq!(json["stats"]["avg_temperature"], serde_json::json!("N/A"));
        assert_eq!(json["robots"][0]["wifi"]["synthetic"], serde_json::json!(true));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(Vec::<RobotCard>::new().render_text(), "No robots found\n");
        assert_eq!(Vec::<UpdateJob>::new().render_text(), "No update jobs\n");
    }
}
