// Chart series domain models
use super::metric::Metric;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Metric,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: Metric) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    /// Set when the points were synthesized rather than loaded.
    pub synthetic: bool,
    pub points: Vec<SeriesPoint>,
}

impl SeriesData {
    pub fn new(id: &str, title: &str, unit: Option<&str>, points: Vec<SeriesPoint>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.map(str::to_string),
            synthetic: false,
            points,
        }
    }

    pub fn synthetic(mut self, synthetic: bool) -> Self {
        self.synthetic = synthetic;
        self
    }
}
