//! Field-level alerts from mean NDVI and mean SoilIndex

use crate::imagery::SpectralIndex;
use crate::statistics::labels::StressLabels;
use crate::statistics::summary::IndexSummary;
use cropfuse_core::{AlertConfig, Error, Result};
use std::fmt;
use tracing::warn;

/// What an alert reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// Mean NDVI below the low threshold
    LowNdvi,
    /// Mean SoilIndex above the high threshold
    HighSoilIndex,
    /// Neither condition holds
    Healthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        })
    }
}

/// One field alert with a suggested action
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub action: &'static str,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.severity, self.message, self.action)
    }
}

/// Build the alert list for a scene.
///
/// A low-NDVI alert fires when mean NDVI is below
/// `ndvi_low_threshold`, a high-soil alert when mean SoilIndex is above
/// `soil_index_high_threshold`. When neither fires the list holds a single
/// healthy alert. A NaN mean never fires.
///
/// # Errors
/// - If `summaries` has no NDVI or no SoilIndex entry
pub fn generate_alerts(
    summaries: &[(SpectralIndex, IndexSummary)],
    labels: &StressLabels,
    thresholds: &AlertConfig,
) -> Result<Vec<Alert>> {
    let ndvi_mean = mean_of(summaries, SpectralIndex::NDVI, "NDVI summary")?;
    let soil_mean = mean_of(summaries, SpectralIndex::SoilIndex, "SoilIndex summary")?;

    let mut alerts = Vec::new();

    if ndvi_mean < thresholds.ndvi_low_threshold {
        alerts.push(Alert {
            kind: AlertKind::LowNdvi,
            severity: Severity::Medium,
            message: format!(
                "Low NDVI detected in {:.1}% of field areas, possible crop stress",
                labels.stressed_percent()
            ),
            action: "Consider irrigation or fertilization",
        });
    }

    if soil_mean > thresholds.soil_index_high_threshold {
        alerts.push(Alert {
            kind: AlertKind::HighSoilIndex,
            severity: Severity::High,
            message: "High soil index detected, monitor soil conditions".to_string(),
            action: "Soil analysis recommended",
        });
    }

    for alert in &alerts {
        warn!("{}", alert);
    }

    if alerts.is_empty() {
        alerts.push(Alert {
            kind: AlertKind::Healthy,
            severity: Severity::Low,
            message: format!(
                "Field conditions are generally healthy with {:.1}% showing good indicators",
                labels.healthy_percent()
            ),
            action: "Continue regular monitoring",
        });
    }

    Ok(alerts)
}

fn mean_of(
    summaries: &[(SpectralIndex, IndexSummary)],
    index: SpectralIndex,
    what: &'static str,
) -> Result<f64> {
    summaries
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, s)| s.mean)
        .ok_or(Error::MissingInput(what))
}
