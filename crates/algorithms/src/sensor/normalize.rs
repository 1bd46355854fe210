//! Sensor series gap filling and standardization
//!
//! Statistics are computed over the whole series passed in and recomputed
//! on every call. No fitted scaler is kept between calls.

use cropfuse_core::sensor::SensorSeries;
use cropfuse_core::{Algorithm, Error, Result};
use tracing::{debug, warn};

/// Sensor normalization algorithm
#[derive(Debug, Clone, Default)]
pub struct NormalizeSensors;

impl Algorithm for NormalizeSensors {
    type Input = SensorSeries;
    type Output = SensorSeries;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "NormalizeSensors"
    }

    fn description(&self) -> &'static str {
        "Fill missing sensor values and standardize each column to zero mean, unit variance"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        normalize_series(&input)
    }
}

/// Replace each missing value with the last preceding present value.
///
/// Non-finite values count as missing. Leading gaps have nothing to copy
/// from and stay missing.
pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|v| {
            if let Some(x) = v.filter(|x| x.is_finite()) {
                last = Some(x);
            }
            last
        })
        .collect()
}

/// Forward-fill every column, then back-fill leading gaps from the first
/// observed value.
///
/// # Errors
/// - If a column has no observed value at all
pub fn fill_missing(series: &SensorSeries) -> Result<SensorSeries> {
    let mut columns = Vec::with_capacity(series.n_columns());

    for name in series.columns() {
        let mut filled = forward_fill(&series.column(name)?);

        let first = filled.iter().position(Option::is_some).ok_or_else(|| {
            Error::validation(format!("column '{}'", name), "no observed values to fill from")
        })?;
        if first > 0 {
            warn!(
                "Column '{}' starts with {} missing readings, back-filling from reading {}",
                name, first, first
            );
            let seed = filled[first];
            filled[..first].iter_mut().for_each(|v| *v = seed);
        }

        columns.push(filled);
    }

    series.with_columns(columns)
}

/// Standardize every column to zero mean and unit (population) variance.
///
/// A column with no spread maps to all zeros.
///
/// # Errors
/// - If any value is missing (fill first) or not finite
pub fn standardize(series: &SensorSeries) -> Result<SensorSeries> {
    let mut columns = Vec::with_capacity(series.n_columns());

    for name in series.columns() {
        let values = series
            .column(name)?
            .into_iter()
            .enumerate()
            .map(|(row, v)| match v {
                Some(x) if x.is_finite() => Ok(x),
                Some(x) => Err(Error::validation(
                    format!("column '{}'", name),
                    format!("non-finite value {} at reading {}", x, row),
                )),
                None => Err(Error::validation(
                    format!("column '{}'", name),
                    format!("missing value at reading {}", row),
                )),
            })
            .collect::<Result<Vec<f64>>>()?;

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        let scale = if std <= 10.0 * f64::EPSILON * mean.abs().max(1.0) {
            1.0
        } else {
            std
        };

        debug!("Column '{}': mean {:.4}, std {:.4}", name, mean, std);
        columns.push(values.iter().map(|v| Some((v - mean) / scale)).collect());
    }

    series.with_columns(columns)
}

/// Fill then standardize a series.
///
/// # Errors
/// - If the series has no readings or no columns
/// - If a column has no observed value
pub fn normalize_series(series: &SensorSeries) -> Result<SensorSeries> {
    if series.is_empty() {
        return Err(Error::validation("sensor series", "series has no readings"));
    }
    if series.n_columns() == 0 {
        return Err(Error::validation("sensor series", "series has no numeric columns"));
    }

    let filled = fill_missing(series)?;
    standardize(&filled)
}
