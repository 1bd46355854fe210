//! Nearest-timestamp alignment of sensor readings

use chrono::NaiveDateTime;
use cropfuse_core::sensor::SensorSeries;
use cropfuse_core::{Algorithm, Error, Result};
use tracing::debug;

/// The reading closest in time to a query, without its timestamp column
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedVector {
    /// Position of the matched reading in the series
    pub index: usize,
    /// Timestamp of the matched reading
    pub timestamp: NaiveDateTime,
    /// Values in series column order
    pub values: Vec<f64>,
}

impl AlignedVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Alignment algorithm
#[derive(Debug, Clone, Default)]
pub struct AlignSensors;

impl Algorithm for AlignSensors {
    type Input = (SensorSeries, NaiveDateTime);
    type Output = AlignedVector;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "AlignSensors"
    }

    fn description(&self) -> &'static str {
        "Select the sensor reading closest in time to a query timestamp"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        align(&input.0, input.1)
    }
}

/// Find the reading with the smallest absolute time difference to `query`.
///
/// Ties go to the reading that appears first in the series, regardless of
/// which side of the query it lies on. The series does not need to be sorted.
///
/// # Errors
/// - If the series has no readings
/// - If the matched reading has a missing value
pub fn align(series: &SensorSeries, query: NaiveDateTime) -> Result<AlignedVector> {
    let (index, reading) = series
        .readings()
        .iter()
        .enumerate()
        .min_by_key(|(_, r)| (r.timestamp - query).abs())
        .ok_or(Error::EmptySeries)?;

    let values = reading
        .values
        .iter()
        .zip(series.columns())
        .map(|(v, name)| {
            v.ok_or_else(|| {
                Error::validation(
                    format!("column '{}'", name),
                    format!("missing value in aligned reading {}", index),
                )
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    debug!(
        "Aligned {} to reading {} at {}",
        query, index, reading.timestamp
    );

    Ok(AlignedVector {
        index,
        timestamp: reading.timestamp,
        values,
    })
}

/// Align each query independently
pub fn align_many(series: &SensorSeries, queries: &[NaiveDateTime]) -> Result<Vec<AlignedVector>> {
    queries.iter().map(|&q| align(series, q)).collect()
}
