//! Current value and range of each raw sensor variable

use cropfuse_core::sensor::SensorSeries;
use cropfuse_core::{Error, Result};

/// Latest observed value and observed range of one sensor column
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSummary {
    pub column: String,
    /// Last observed value in series order
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize every column of a series, ignoring missing values.
///
/// Meant for the raw series, before standardization.
///
/// # Errors
/// - If the series has no readings
/// - If a column has no observed value
pub fn summarize_sensors(series: &SensorSeries) -> Result<Vec<SensorSummary>> {
    if series.is_empty() {
        return Err(Error::EmptySeries);
    }

    series
        .columns()
        .iter()
        .map(|name| {
            let observed: Vec<f64> = series.column(name)?.into_iter().flatten().collect();
            let current = *observed.last().ok_or_else(|| {
                Error::validation(format!("column '{}'", name), "no observed values")
            })?;
            let (min, max) = observed
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            Ok(SensorSummary {
                column: name.clone(),
                current,
                min,
                max,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use cropfuse_core::sensor::SensorReading;

    fn series(rows: Vec<Vec<Option<f64>>>) -> SensorSeries {
        let t0 = NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let readings = rows
            .into_iter()
            .enumerate()
            .map(|(i, v)| SensorReading::new(t0 + Duration::hours(i as i64), v))
            .collect();
        SensorSeries::new(vec!["air_temp".into(), "humidity".into()], readings).unwrap()
    }

    #[test]
    fn test_current_min_max() {
        let s = series(vec![
            vec![Some(21.0), Some(60.0)],
            vec![Some(27.5), Some(48.0)],
            vec![Some(24.0), None],
        ]);
        let summary = summarize_sensors(&s).unwrap();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].column, "air_temp");
        assert_eq!(summary[0].current, 24.0);
        assert_eq!(summary[0].min, 21.0);
        assert_eq!(summary[0].max, 27.5);
        // humidity's last reading is missing: current is the last observed one
        assert_eq!(summary[1].current, 48.0);
        assert_eq!(summary[1].min, 48.0);
        assert_eq!(summary[1].max, 60.0);
    }

    #[test]
    fn test_empty_series() {
        let s = series(vec![]);
        assert!(matches!(summarize_sensors(&s), Err(Error::EmptySeries)));
    }

    #[test]
    fn test_unobserved_column() {
        let s = series(vec![vec![Some(20.0), None], vec![Some(21.0), None]]);
        assert!(matches!(summarize_sensors(&s), Err(Error::Validation { .. })));
    }
}
