use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub health: HealthSettings,
    #[serde(default)]
    pub predictions: PredictionSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Files,
    Http,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub directory: String,
    pub base_url: String,
    pub file_template: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Files,
            directory: "data".to_string(),
            base_url: "http://localhost:5173/src/data".to_string(),
            file_template: "${kind}_export.csv".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub telemetry_limit: usize,
    pub update_limit: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
            telemetry_limit: 10,
            update_limit: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HealthSettings {
    pub recent_logs: usize,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self { recent_logs: 10 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PredictionSettings {
    pub cycles_per_day: f64,
    pub milestone_step: u64,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            cycles_per_day: 50.0,
            milestone_step: 25_000,
        }
    }
}

/// Load `{path}.toml` (optional) overlaid with `FLEET__*` environment
/// variables, e.g. `FLEET__SOURCE__KIND=http`.
pub fn load_app_config(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("FLEET")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace template variables in a file name or URL
pub fn prepare_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
