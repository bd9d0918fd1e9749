use serde::Serialize;

use crate::aggregator::counts::StatusCounts;
use crate::snapshot::ComponentStatus;

/// Weight of one location in the health score. Maintenance is planned
/// work and does not count against health; unknown displays as operational.
pub fn status_weight(status: ComponentStatus) -> u64 {
    match status {
        ComponentStatus::Operational => 100,
        ComponentStatus::UnderMaintenance => 100,
        ComponentStatus::DegradedPerformance => 75,
        ComponentStatus::PartialOutage => 50,
        ComponentStatus::MajorOutage => 0,
        ComponentStatus::Unknown => 100,
    }
}

/// Weighted health over location entities, 0..=100.
///
/// No locations at all is vacuously healthy and yields 100.
pub fn compute_health_percentage(location_counts: &StatusCounts) -> u8 {
    let total = location_counts.total();
    if total == 0 {
        return 100;
    }

    let weighted: u64 = location_counts
        .iter()
        .map(|(status, count)| status_weight(status) * count as u64)
        .sum();

    (weighted as f64 / total as f64).round() as u8
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Healthy,
    Degraded,
    Critical,
}

impl HealthBand {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90..=u8::MAX => HealthBand::Healthy,
            70..=89 => HealthBand::Degraded,
            _ => HealthBand::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthBand::Healthy => "healthy",
            HealthBand::Degraded => "degraded",
            HealthBand::Critical => "critical",
        }
    }
}
