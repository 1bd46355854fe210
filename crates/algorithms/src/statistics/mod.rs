//! Statistical summaries, crop-stress labels and field alerts

pub mod alerts;
pub mod labels;
pub mod sensor;
pub mod summary;

pub use alerts::{generate_alerts, Alert, AlertKind, Severity};
pub use labels::{label_stress, StressLabels};
pub use sensor::{summarize_sensors, SensorSummary};
pub use summary::{summarize, IndexSummary};
