// Aggregator - counts, means and per-robot maxima over loaded records
use crate::domain::logs::RobotLog;
use crate::domain::metric::Metric;
use serde::Serialize;

/// Mean of the available values. Missing values are left out of both the
/// sum and the count; no values at all gives `NoData`.
pub fn mean<I>(values: I) -> Metric
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        Metric::NoData
    } else {
        Metric::Value(sum / count as f64)
    }
}

/// [`mean`] rounded to the nearest integer for display.
pub fn mean_rounded<I>(values: I) -> Metric
where
    I: IntoIterator<Item = Option<f64>>,
{
    mean(values).rounded()
}

pub fn count_where<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| predicate(item)).count()
}

/// Count, rounded mean of a numeric field, and predicate matches over one
/// filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: Metric,
    pub matching: usize,
}

pub fn summarize<T>(
    items: &[T],
    value: impl Fn(&T) -> Option<f64>,
    predicate: impl Fn(&T) -> bool,
) -> SummaryStats {
    SummaryStats {
        count: items.len(),
        mean: mean_rounded(items.iter().map(value)),
        matching: count_where(items, predicate),
    }
}

/// Items whose `field` equals `expected` exactly; an absent field never matches.
pub fn field_equals<T, F>(field: F, expected: &str) -> impl Fn(&T) -> bool
where
    F: Fn(&T) -> Option<&str>,
{
    move |item| field(item) == Some(expected)
}

/// Highest value per robot, in first-seen robot order. Missing values
/// count as zero.
pub fn max_per_robot<T: RobotLog>(records: &[T], value: impl Fn(&T) -> Option<f64>) -> Vec<(String, f64)> {
    let mut maxima: Vec<(String, f64)> = Vec::new();

    for record in records {
        let Some(robot_id) = record.robot_id() else {
            continue;
        };
        let v = value(record).unwrap_or(0.0);
        match maxima.iter_mut().find(|(id, _)| id == robot_id) {
            Some((_, best)) => *best = best.max(v),
            None => maxima.push((robot_id.to_string(), v)),
        }
    }

    maxima
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logs::HealthLog;
    use crate::domain::record::Record;
    use crate::domain::record::parse_number;
    use crate::infrastructure::csv_normalizer::parse;

    #[test]
    fn test_mean_skips_non_numeric() {
        let raw = ["10", "bad", "30"];
        let result = mean_rounded(raw.iter().map(|v| parse_number(v)));

        assert_eq!(result, Metric::Value(20.0));
    }

    #[test]
    fn test_mean_of_nothing_is_no_data() {
        assert_eq!(mean(Vec::<Option<f64>>::new()), Metric::NoData);
        assert_eq!(mean(vec![None, None]), Metric::NoData);
        assert_eq!(mean_rounded(vec![None]).to_string(), "N/A");
    }

    #[test]
    fn test_zero_is_a_value() {
        assert_eq!(mean(vec![Some(0.0), Some(10.0)]), Metric::Value(5.0));
    }

    fn status(record: &Record) -> Option<&str> {
        record.get("status")
    }

    fn robot_id(log: &HealthLog) -> Option<&str> {
        log.robot_id.as_deref()
    }

    #[test]
    fn test_summarize_raw_records() {
        let records = parse(
            "id,status,battery_level\n1,online,80\n2,error,\n3,online,61",
        );
        let stats = summarize(
            &records,
            |r| r.number("battery_level"),
            field_equals(status, "online"),
        );

        assert_eq!(
            stats,
            SummaryStats {
                count: 3,
                mean: Metric::Value(71.0),
                matching: 2,
            }
        );
    }

    #[test]
    fn test_field_equals_is_exact() {
        let logs = vec![
            HealthLog {
                robot_id: Some("r1".to_string()),
                ..Default::default()
            },
            HealthLog {
                robot_id: Some("R1".to_string()),
                ..Default::default()
            },
            HealthLog::default(),
        ];

        assert_eq!(count_where(&logs, field_equals(robot_id, "r1")), 1);
        assert_eq!(count_where(&logs, field_equals(robot_id, "")), 0);
    }

    #[test]
    fn test_max_per_robot() {
        let log = |id: &str, cycles: Option<f64>| HealthLog {
            robot_id: Some(id.to_string()),
            cycle_count: cycles,
            ..Default::default()
        };
        let logs = vec![
            log("r1", Some(100.0)),
            log("r2", None),
            log("r1", Some(150.0)),
            log("r1", Some(120.0)),
        ];

        let maxima = max_per_robot(&logs, |h| h.cycle_count);
        assert_eq!(maxima, vec![("r1".to_string(), 150.0), ("r2".to_string(), 0.0)]);
    }
}
