//! CSV sensor telemetry reader
//!
//! Expects a header row with a `timestamp` column; every other column is
//! read as a numeric sensor variable. Empty cells and `NaN`/`NA`/`null`
//! markers become missing values.

use crate::error::{Error, Result};
use crate::sensor::{SensorReading, SensorSeries, TIMESTAMP_COLUMN};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";
const MISSING_MARKERS: [&str; 5] = ["nan", "na", "n/a", "null", "none"];

/// Read a sensor CSV file into a series
pub fn read_sensor_csv<P: AsRef<Path>>(path: P) -> Result<SensorSeries> {
    let file = std::fs::File::open(path.as_ref())?;
    let series = read_sensor_series(file)?;
    debug!(
        "Read {} readings x {} columns from {}",
        series.len(),
        series.n_columns(),
        path.as_ref().display()
    );
    Ok(series)
}

/// Read sensor CSV text from an in-memory buffer
///
/// Same as `read_sensor_csv` but operates on a byte slice instead of a file path.
pub fn read_sensor_csv_from_buffer(data: &[u8]) -> Result<SensorSeries> {
    read_sensor_series(data)
}

/// Parse a timestamp cell, accepting date-times with optional fractional
/// seconds or bare dates (midnight)
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Internal: decode a series from any `Read` source
fn read_sensor_series<R: Read>(source: R) -> Result<SensorSeries> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);

    let headers = rdr.headers()?.clone();
    let ts_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(TIMESTAMP_COLUMN))
        .ok_or_else(|| Error::validation("header", "missing 'timestamp' column"))?;

    let value_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != ts_idx)
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let mut readings = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;

        let raw_ts = record.get(ts_idx).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| Error::Timestamp {
            value: raw_ts.to_string(),
            row,
        })?;

        let values = value_cols
            .iter()
            .map(|(i, name)| parse_value(record.get(*i).unwrap_or_default(), name, row))
            .collect::<Result<Vec<_>>>()?;

        readings.push(SensorReading::new(timestamp, values));
    }

    SensorSeries::new(
        value_cols.into_iter().map(|(_, name)| name).collect(),
        readings,
    )
}

fn parse_value(cell: &str, column: &str, row: usize) -> Result<Option<f64>> {
    if cell.is_empty() || MISSING_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(_) => Err(Error::validation(
            format!("column '{}' row {}", column, row),
            format!("'{}' is not a finite number", cell),
        )),
        Err(_) => Err(Error::validation(
            format!("column '{}' row {}", column, row),
            format!("'{}' is not numeric", cell),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
timestamp,soil_moisture,air_temp,humidity,leaf_wetness
2025-01-01,41.2,18.5,66.0,2.1
2025-01-02 06:30:00,,19.0,NaN,2.4
2025-01-03T12:00:00.250,39.8,21.25,70.5,
";

    #[test]
    fn test_read_sample() {
        let series = read_sensor_csv_from_buffer(SAMPLE.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.columns(),
            &["soil_moisture", "air_temp", "humidity", "leaf_wetness"]
        );
        assert_eq!(series.readings()[0].values[0], Some(41.2));
        assert_eq!(series.readings()[1].values[0], None);
        assert_eq!(series.readings()[1].values[2], None);
        assert_eq!(series.readings()[2].values[3], None);
        assert_eq!(series.missing_count(), 3);
    }

    #[test]
    fn test_read_from_file() {
        let path = std::env::temp_dir().join(format!("cropfuse_sensors_{}.csv", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();

        let from_file = read_sensor_csv(&path);
        std::fs::remove_file(&path).unwrap();

        let from_file = from_file.unwrap();
        assert_eq!(from_file, read_sensor_csv_from_buffer(SAMPLE.as_bytes()).unwrap());
        assert_eq!(from_file.len(), 3);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_sensor_csv("/nonexistent/cropfuse/sensors.csv").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_timestamp_formats() {
        let midnight = parse_timestamp("2025-01-01").unwrap();
        assert_eq!(midnight.to_string(), "2025-01-01 00:00:00");
        let t = parse_timestamp("2025-01-02 06:30:00").unwrap();
        assert_eq!(t.to_string(), "2025-01-02 06:30:00");
        assert!(parse_timestamp("2025-01-03T12:00:00.250").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_missing_timestamp_column() {
        let err = read_sensor_csv_from_buffer(b"time,a\n2025-01-01,1\n").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_bad_timestamp() {
        let err = read_sensor_csv_from_buffer(b"timestamp,a\nsoon,1\n").unwrap_err();
        assert!(matches!(err, Error::Timestamp { row: 0, .. }));
    }

    #[test]
    fn test_infinite_value_rejected() {
        let err = read_sensor_csv_from_buffer(b"timestamp,x\n2025-01-01,1\n2025-01-02,inf\n")
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("column 'x' row 1"));

        let err = read_sensor_csv_from_buffer(b"timestamp,x\n2025-01-01,-Infinity\n").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_non_numeric_value() {
        let err = read_sensor_csv_from_buffer(b"timestamp,a\n2025-01-01,wet\n").unwrap_err();
        assert!(err.to_string().contains("column 'a' row 0"));
    }
}
