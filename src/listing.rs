//! Filtered and sorted views over a snapshot: data centers, services,
//! active incidents and active maintenance.

use clap::ValueEnum;
use serde::Serialize;
use std::cmp::Ordering;

use crate::aggregator::classify_entities;
use crate::locations::{
    component_coordinates, extract_airport_code, location_display_name, Coordinates,
};
use crate::snapshot::{
    ComponentStatus, IncidentRecord, MaintenanceWindow, MonitoredEntity, Snapshot,
};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DataCenterRow {
    pub id: String,
    pub code: String,
    pub display_name: String,
    pub status: ComponentStatus,
    pub coordinates: Option<Coordinates>,
}

impl DataCenterRow {
    fn from_entity(entity: &MonitoredEntity) -> Self {
        Self {
            id: entity.id.clone(),
            code: extract_airport_code(&entity.name).unwrap_or_default().to_string(),
            display_name: location_display_name(&entity.name).to_string(),
            status: entity.status,
            coordinates: component_coordinates(&entity.name),
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.display_name.to_lowercase().contains(needle) || self.code.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortField {
    /// Most severe first
    #[default]
    Status,
    Name,
    Code,
}

#[derive(Debug, Clone, Default)]
pub struct DataCenterQuery {
    pub search: Option<String>,
    pub status: Option<ComponentStatus>,
    pub sort: SortField,
    pub descending: bool,
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

fn compare_rows(a: &DataCenterRow, b: &DataCenterRow, field: SortField) -> Ordering {
    match field {
        SortField::Status => a.status.severity_rank().cmp(&b.status.severity_rank()),
        SortField::Name => compare_names(&a.display_name, &b.display_name),
        SortField::Code => a.code.cmp(&b.code),
    }
}

/// Every location entity, in snapshot order.
pub fn data_centers(snapshot: &Snapshot) -> Vec<DataCenterRow> {
    classify_entities(&snapshot.entities)
        .locations
        .into_iter()
        .map(DataCenterRow::from_entity)
        .collect()
}

pub fn query_data_centers(snapshot: &Snapshot, query: &DataCenterQuery) -> Vec<DataCenterRow> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<DataCenterRow> = data_centers(snapshot)
        .into_iter()
        .filter(|row| needle.as_deref().map_or(true, |n| row.matches_search(n)))
        .filter(|row| query.status.map_or(true, |status| row.status == status))
        .collect();

    rows.sort_by(|a, b| {
        let ordering = compare_rows(a, b, query.sort);
        if query.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    rows
}

/// Core services, most severe first, then by name.
pub fn services(snapshot: &Snapshot) -> Vec<&MonitoredEntity> {
    let mut services = classify_entities(&snapshot.entities).services;
    services.sort_by(|a, b| {
        a.status
            .severity_rank()
            .cmp(&b.status.severity_rank())
            .then_with(|| compare_names(&a.name, &b.name))
    });
    services
}

/// Active incidents in upstream order.
pub fn active_incidents(snapshot: &Snapshot) -> Vec<&IncidentRecord> {
    snapshot.active_incidents().collect()
}

/// Active maintenance: in progress, then verifying, then scheduled.
pub fn active_maintenance(snapshot: &Snapshot) -> Vec<&MaintenanceWindow> {
    let mut windows: Vec<&MaintenanceWindow> = snapshot.active_maintenance().collect();
    windows.sort_by_key(|w| w.lifecycle_status.display_priority());
    windows
}
