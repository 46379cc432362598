// Normalized CSV row
use std::sync::Arc;

/// Opaque key shared by the robot snapshot and every per-robot log.
pub type RobotId = String;

/// One CSV row: the header's field names paired with the row's raw values.
///
/// Values are kept as unparsed strings. A field whose token was absent from
/// the row is unset (`None`), never an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<Option<String>>,
}

impl Record {
    /// Pair `values` with `headers` positionally. Surplus values are dropped
    /// and missing ones are left unset.
    pub fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        let mut values: Vec<Option<String>> = values.into_iter().map(Some).collect();
        values.resize(headers.len(), None);
        Self { headers, values }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == field)?;
        self.values[idx].as_deref()
    }

    /// Coerce a field to a number on demand. Blank or non-numeric values
    /// are unavailable.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(parse_number)
    }

    /// Field names with their values, in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.headers
            .iter()
            .zip(self.values.iter())
            .map(|(h, v)| (h.as_str(), v.as_deref()))
    }
}

pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Arc<[String]> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_row_leaves_fields_unset() {
        let record = Record::new(headers(&["id", "name", "status"]), vec!["1".into()]);

        assert_eq!(record.get("id"), Some("1"));
        assert_eq!(record.get("name"), None);
        assert_eq!(record.get("status"), None);
        assert_eq!(record.get("missing_column"), None);
    }

    #[test]
    fn test_number_coercion() {
        let record = Record::new(
            headers(&["a", "b", "c", "d"]),
            vec!["42.5".into(), "bad".into(), " 7 ".into(), "".into()],
        );

        assert_eq!(record.number("a"), Some(42.5));
        assert_eq!(record.number("b"), None);
        assert_eq!(record.number("c"), Some(7.0));
        assert_eq!(record.number("d"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
