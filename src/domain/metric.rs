// Display-ready numeric values with a single "no data" convention
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

pub const NO_DATA: &str = "N/A";

/// A value shown on a card or chart.
///
/// `Synthetic` values come from the fallback synthesizer and are never
/// backed by a snapshot row. `NoData` is the only sentinel used for missing
/// or unaggregatable input and always renders as `N/A`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Metric {
    Value(f64),
    Synthetic(f64),
    #[default]
    NoData,
}

impl Metric {
    pub fn from_option(value: Option<f64>) -> Self {
        value.map(Metric::Value).unwrap_or(Metric::NoData)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) | Metric::Synthetic(v) => Some(*v),
            Metric::NoData => None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Metric::Synthetic(_))
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Metric::NoData)
    }

    /// Keep this value, or fall back to `other` when there is no data.
    pub fn or(self, other: Metric) -> Metric {
        if self.is_no_data() { other } else { self }
    }

    pub fn rounded(self) -> Metric {
        match self {
            Metric::Value(v) => Metric::Value(v.round()),
            Metric::Synthetic(v) => Metric::Synthetic(v.round()),
            Metric::NoData => Metric::NoData,
        }
    }

    /// Render with a unit suffix, e.g. `87%`; `N/A` carries no unit.
    pub fn with_unit(&self, unit: &str) -> String {
        match self.value() {
            Some(v) => format!("{}{}", format_number(v), unit),
            None => NO_DATA.to_string(),
        }
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        Metric::from_option(value)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => f.write_str(&format_number(v)),
            None => f.write_str(NO_DATA),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Value(v) => serializer.serialize_f64(*v),
            Metric::Synthetic(v) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("value", v)?;
                map.serialize_entry("synthetic", &true)?;
                map.end()
            }
            Metric::NoData => serializer.serialize_str(NO_DATA),
        }
    }
}

/// Whole numbers print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
