pub mod classify;
pub mod counts;
pub mod health;
pub mod overall;

pub use classify::{classify_entities, Classification};
pub use counts::{count_by_status, StatusCounts};
pub use health::{compute_health_percentage, HealthBand};
pub use overall::{derive_overall_status, OverallStatus};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::snapshot::{Indicator, Snapshot};

/// Display-ready summary derived from one snapshot
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HealthSummary {
    pub page_name: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub overall: OverallStatus,
    pub upstream: OverallStatus,
    pub health_percentage: u8,
    pub health_band: HealthBand,
    pub location_total: usize,
    pub locations: StatusCounts,
    pub service_total: usize,
    pub services: StatusCounts,
    pub active_incidents: usize,
    pub active_maintenance: usize,
}

/// Classify, count, score and derive the headline for a snapshot.
///
/// Pure: the same snapshot always produces the same summary.
pub fn aggregate(snapshot: &Snapshot) -> HealthSummary {
    let classification = classify_entities(&snapshot.entities);
    let locations = count_by_status(classification.locations.iter().copied());
    let services = count_by_status(classification.services.iter().copied());

    let active_incidents = snapshot.active_incidents().count();
    let active_maintenance = snapshot.active_maintenance().count();

    let overall = derive_overall_status(
        &services,
        &locations,
        active_maintenance,
        snapshot.overall_indicator,
        &snapshot.overall_description,
    );
    let health_percentage = compute_health_percentage(&locations);

    debug!(
        locations = locations.total(),
        services = services.total(),
        health = health_percentage,
        "Aggregated snapshot"
    );

    HealthSummary {
        page_name: snapshot.page_name.clone(),
        updated_at: snapshot.updated_at,
        overall,
        upstream: OverallStatus {
            text: snapshot.overall_description.clone(),
            indicator: snapshot.overall_indicator,
        },
        health_percentage,
        health_band: HealthBand::from_percentage(health_percentage),
        location_total: locations.total(),
        locations,
        service_total: services.total(),
        services,
        active_incidents,
        active_maintenance,
    }
}
