//! Decoding of tabular sensor telemetry
//!
//! Acquisition of telemetry happens elsewhere; this module only turns CSV
//! text into a [`SensorSeries`](crate::sensor::SensorSeries).

mod sensor_csv;

pub use sensor_csv::{parse_timestamp, read_sensor_csv, read_sensor_csv_from_buffer};
