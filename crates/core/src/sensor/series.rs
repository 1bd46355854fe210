//! Sensor series: named numeric columns tagged with a timestamp per row

use crate::error::{Error, Result};
use chrono::NaiveDateTime;

/// Name of the timestamp column in tabular sources
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// One row of scalar measurements.
///
/// `None` marks a missing measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub timestamp: NaiveDateTime,
    pub values: Vec<Option<f64>>,
}

impl SensorReading {
    pub fn new(timestamp: NaiveDateTime, values: Vec<Option<f64>>) -> Self {
        Self { timestamp, values }
    }

    /// Reading with every value present
    pub fn complete(timestamp: NaiveDateTime, values: &[f64]) -> Self {
        Self {
            timestamp,
            values: values.iter().copied().map(Some).collect(),
        }
    }
}

/// An ordered collection of readings, one value per named column.
///
/// Readings keep the order they were supplied in; they are not required to
/// be sorted by timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorSeries {
    columns: Vec<String>,
    readings: Vec<SensorReading>,
}

impl SensorSeries {
    /// Create a series, checking every reading has one value per column.
    ///
    /// `Some(NaN)` is stored as missing. Infinite values are rejected.
    pub fn new(columns: Vec<String>, mut readings: Vec<SensorReading>) -> Result<Self> {
        if let Some(dup) = columns
            .iter()
            .enumerate()
            .find(|(i, c)| columns[..*i].contains(*c))
            .map(|(_, c)| c)
        {
            return Err(Error::validation(
                "columns",
                format!("duplicate column '{}'", dup),
            ));
        }

        if let Some((row, reading)) = readings
            .iter()
            .enumerate()
            .find(|(_, r)| r.values.len() != columns.len())
        {
            return Err(Error::validation(
                format!("reading {}", row),
                format!(
                    "expected {} values, found {}",
                    columns.len(),
                    reading.values.len()
                ),
            ));
        }

        for (row, reading) in readings.iter_mut().enumerate() {
            for (value, name) in reading.values.iter_mut().zip(&columns) {
                match *value {
                    Some(v) if v.is_nan() => *value = None,
                    Some(v) if v.is_infinite() => {
                        return Err(Error::validation(
                            format!("column '{}'", name),
                            format!("infinite value at reading {}", row),
                        ));
                    }
                    _ => {}
                }
            }
        }

        Ok(Self { columns, readings })
    }

    /// Variable names in column order (timestamp excluded)
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Number of measured variables
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column in series order
    pub fn column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| Error::validation(name, "no such column"))?;
        Ok(self.readings.iter().map(|r| r.values[idx]).collect())
    }

    /// Timestamps in series order
    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.readings.iter().map(|r| r.timestamp)
    }

    /// Number of missing values across all columns
    pub fn missing_count(&self) -> usize {
        self.readings
            .iter()
            .map(|r| r.values.iter().filter(|v| v.is_none()).count())
            .sum()
    }

    /// New series with only the named columns, in the order given
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let indices = names
            .iter()
            .map(|n| {
                self.column_index(n.as_ref())
                    .ok_or_else(|| Error::validation(n.as_ref(), "no such column"))
            })
            .collect::<Result<Vec<_>>>()?;

        let readings = self
            .readings
            .iter()
            .map(|r| SensorReading {
                timestamp: r.timestamp,
                values: indices.iter().map(|&i| r.values[i]).collect(),
            })
            .collect();

        Self::new(
            names.iter().map(|n| n.as_ref().to_string()).collect(),
            readings,
        )
    }

    /// Rebuild a series from per-column values, keeping this series' timestamps
    pub fn with_columns(&self, columns: Vec<Vec<Option<f64>>>) -> Result<Self> {
        if columns.len() != self.columns.len() {
            return Err(Error::validation(
                "columns",
                format!(
                    "expected {} columns, found {}",
                    self.columns.len(),
                    columns.len()
                ),
            ));
        }

        let readings = self
            .readings
            .iter()
            .enumerate()
            .map(|(row, r)| SensorReading {
                timestamp: r.timestamp,
                values: columns
                    .iter()
                    .map(|col| col.get(row).copied().flatten())
                    .collect(),
            })
            .collect();

        Self::new(self.columns.clone(), readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn sample() -> SensorSeries {
        SensorSeries::new(
            vec!["soil_moisture".into(), "air_temp".into()],
            vec![
                SensorReading::new(ts(1), vec![Some(40.0), None]),
                SensorReading::new(ts(2), vec![Some(42.0), Some(21.5)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_series_basic() {
        let series = sample();
        assert_eq!(series.len(), 2);
        assert_eq!(series.n_columns(), 2);
        assert_eq!(series.missing_count(), 1);
        assert_eq!(series.column("air_temp").unwrap(), vec![None, Some(21.5)]);
    }

    #[test]
    fn test_ragged_reading_rejected() {
        let result = SensorSeries::new(
            vec!["a".into(), "b".into()],
            vec![SensorReading::complete(ts(1), &[1.0])],
        );
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = SensorSeries::new(vec!["a".into(), "a".into()], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_nan_stored_as_missing() {
        let series = SensorSeries::new(
            vec!["x".into()],
            vec![
                SensorReading::complete(ts(1), &[1.0]),
                SensorReading::complete(ts(2), &[f64::NAN]),
            ],
        )
        .unwrap();
        assert_eq!(series.column("x").unwrap(), vec![Some(1.0), None]);
        assert_eq!(series.missing_count(), 1);
    }

    #[test]
    fn test_infinite_value_rejected() {
        let result = SensorSeries::new(
            vec!["x".into()],
            vec![SensorReading::complete(ts(1), &[f64::NEG_INFINITY])],
        );
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_select_reorders() {
        let series = sample().select(&["air_temp", "soil_moisture"]).unwrap();
        assert_eq!(series.columns(), &["air_temp".to_string(), "soil_moisture".to_string()]);
        assert_eq!(series.readings()[1].values, vec![Some(21.5), Some(42.0)]);
        assert!(sample().select(&["humidity"]).is_err());
    }
}
