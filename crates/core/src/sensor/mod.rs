//! Timestamped environmental sensor readings

mod series;

pub use series::{SensorReading, SensorSeries, TIMESTAMP_COLUMN};
