//! Domain view of one status snapshot.
//!
//! A [`Snapshot`] is built fresh from every API response and never mutated
//! afterwards. The status enums here are shared with the wire models so an
//! unrecognized upstream value degrades to `Unknown` instead of failing the
//! whole payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::statuspage::models::{
    Component, Incident, IncidentUpdate as WireIncidentUpdate, ScheduledMaintenance,
    SummaryResponse,
};

/// Status of a single monitored component.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Operational,
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
    UnderMaintenance,
    #[serde(other)]
    Unknown,
}

impl ComponentStatus {
    /// Every status, most severe first.
    pub const ALL: [ComponentStatus; 6] = [
        ComponentStatus::MajorOutage,
        ComponentStatus::PartialOutage,
        ComponentStatus::DegradedPerformance,
        ComponentStatus::UnderMaintenance,
        ComponentStatus::Operational,
        ComponentStatus::Unknown,
    ];

    /// Sort key, lower is more severe. Unknown values sort last.
    pub fn severity_rank(&self) -> u8 {
        match self {
            ComponentStatus::MajorOutage => 0,
            ComponentStatus::PartialOutage => 1,
            ComponentStatus::DegradedPerformance => 2,
            ComponentStatus::UnderMaintenance => 3,
            ComponentStatus::Operational => 4,
            ComponentStatus::Unknown => 5,
        }
    }

    /// Degraded, partial or major outage. Maintenance is planned and does not count.
    pub fn is_issue(&self) -> bool {
        matches!(
            self,
            ComponentStatus::DegradedPerformance
                | ComponentStatus::PartialOutage
                | ComponentStatus::MajorOutage
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentStatus::Operational => "operational",
            ComponentStatus::DegradedPerformance => "degraded_performance",
            ComponentStatus::PartialOutage => "partial_outage",
            ComponentStatus::MajorOutage => "major_outage",
            ComponentStatus::UnderMaintenance => "under_maintenance",
            ComponentStatus::Unknown => "unknown",
        }
    }

    /// Short human label
    pub fn label(&self) -> &'static str {
        match self {
            ComponentStatus::Operational => "Operational",
            ComponentStatus::DegradedPerformance => "Degraded",
            ComponentStatus::PartialOutage => "Partial Outage",
            ComponentStatus::MajorOutage => "Major Outage",
            ComponentStatus::UnderMaintenance => "Maintenance",
            ComponentStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "operational" => Ok(ComponentStatus::Operational),
            "degraded_performance" | "degraded" => Ok(ComponentStatus::DegradedPerformance),
            "partial_outage" | "partial" => Ok(ComponentStatus::PartialOutage),
            "major_outage" | "major" => Ok(ComponentStatus::MajorOutage),
            "under_maintenance" | "maintenance" => Ok(ComponentStatus::UnderMaintenance),
            other => Err(format!("unknown component status '{}'", other)),
        }
    }
}

/// Coarse overall severity reported by the page or derived locally.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    #[default]
    None,
    Minor,
    Major,
    Critical,
    #[serde(other)]
    Unknown,
}

impl Indicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::None => "none",
            Indicator::Minor => "minor",
            Indicator::Major => "major",
            Indicator::Critical => "critical",
            Indicator::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Indicator::None => "All Systems Operational",
            Indicator::Minor => "Minor Issues",
            Indicator::Major => "Major Issues",
            Indicator::Critical => "Critical",
            Indicator::Unknown => "Unknown",
        }
    }

    /// Major or critical: the upstream wording is trusted for these.
    pub fn is_severe(&self) -> bool {
        matches!(self, Indicator::Major | Indicator::Critical)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Investigating,
    Identified,
    Monitoring,
    Resolved,
    Postmortem,
    #[serde(other)]
    Unknown,
}

impl IncidentStatus {
    /// Investigating, identified or monitoring.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            IncidentStatus::Investigating | IncidentStatus::Identified | IncidentStatus::Monitoring
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            IncidentStatus::Investigating => "Investigating",
            IncidentStatus::Identified => "Identified",
            IncidentStatus::Monitoring => "Monitoring",
            IncidentStatus::Resolved => "Resolved",
            IncidentStatus::Postmortem => "Postmortem",
            IncidentStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Verifying,
    Completed,
    #[serde(other)]
    Unknown,
}

impl MaintenanceStatus {
    /// Scheduled, in progress or verifying.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            MaintenanceStatus::Scheduled | MaintenanceStatus::InProgress | MaintenanceStatus::Verifying
        )
    }

    /// Display order for active windows: running work first.
    pub fn display_priority(&self) -> u8 {
        match self {
            MaintenanceStatus::InProgress => 0,
            MaintenanceStatus::Verifying => 1,
            MaintenanceStatus::Scheduled => 2,
            _ => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceStatus::Scheduled => "Scheduled",
            MaintenanceStatus::InProgress => "In Progress",
            MaintenanceStatus::Verifying => "Verifying",
            MaintenanceStatus::Completed => "Completed",
            MaintenanceStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MonitoredEntity {
    pub id: String,
    pub name: String,
    pub status: ComponentStatus,
    pub is_group: bool,
    pub parent_group_id: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct IncidentUpdate {
    pub status: String,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct IncidentRecord {
    pub id: String,
    pub name: String,
    pub lifecycle_status: IncidentStatus,
    pub impact: Indicator,
    pub created_at: Option<DateTime<Utc>>,
    pub shortlink: Option<String>,
    pub affected_entities: Vec<MonitoredEntity>,
    /// Newest first.
    pub updates: Vec<IncidentUpdate>,
}

impl IncidentRecord {
    pub fn is_active(&self) -> bool {
        self.lifecycle_status.is_active()
    }

    pub fn latest_update(&self) -> Option<&IncidentUpdate> {
        self.updates.first()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MaintenanceWindow {
    pub id: String,
    pub name: String,
    pub lifecycle_status: MaintenanceStatus,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub affected_entities: Vec<MonitoredEntity>,
}

impl MaintenanceWindow {
    pub fn is_active(&self) -> bool {
        self.lifecycle_status.is_active()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Snapshot {
    pub page_name: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub entities: Vec<MonitoredEntity>,
    pub incidents: Vec<IncidentRecord>,
    pub maintenance_windows: Vec<MaintenanceWindow>,
    pub overall_indicator: Indicator,
    pub overall_description: String,
}

impl Snapshot {
    pub fn active_incidents(&self) -> impl Iterator<Item = &IncidentRecord> {
        self.incidents.iter().filter(|i| i.is_active())
    }

    pub fn active_maintenance(&self) -> impl Iterator<Item = &MaintenanceWindow> {
        self.maintenance_windows.iter().filter(|m| m.is_active())
    }
}

impl From<Component> for MonitoredEntity {
    fn from(component: Component) -> Self {
        Self {
            id: component.id,
            name: component.name,
            status: component.status,
            is_group: component.group,
            parent_group_id: component.group_id,
        }
    }
}

impl From<WireIncidentUpdate> for IncidentUpdate {
    fn from(update: WireIncidentUpdate) -> Self {
        Self {
            status: update.status,
            body: update.body,
            created_at: update.display_at.or(update.created_at),
        }
    }
}

impl From<Incident> for IncidentRecord {
    fn from(incident: Incident) -> Self {
        Self {
            id: incident.id,
            name: incident.name,
            lifecycle_status: incident.status,
            impact: incident.impact,
            created_at: incident.created_at,
            shortlink: incident.shortlink,
            affected_entities: incident.components.into_iter().map(Into::into).collect(),
            updates: incident.incident_updates.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ScheduledMaintenance> for MaintenanceWindow {
    fn from(maintenance: ScheduledMaintenance) -> Self {
        Self {
            id: maintenance.id,
            name: maintenance.name,
            lifecycle_status: maintenance.status,
            scheduled_start: maintenance.scheduled_for,
            scheduled_end: maintenance.scheduled_until,
            affected_entities: maintenance.components.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<SummaryResponse> for Snapshot {
    fn from(summary: SummaryResponse) -> Self {
        Self {
            page_name: summary.page.name,
            updated_at: summary.page.updated_at,
            entities: summary.components.into_iter().map(Into::into).collect(),
            incidents: summary.incidents.into_iter().map(Into::into).collect(),
            maintenance_windows: summary
                .scheduled_maintenances
                .into_iter()
                .map(Into::into)
                .collect(),
            overall_indicator: summary.status.indicator,
            overall_description: summary.status.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_component_status_deserializes() {
        let status: ComponentStatus = serde_json::from_str("\"on_fire\"").unwrap();
        assert_eq!(status, ComponentStatus::Unknown);
        assert_eq!(status.severity_rank(), 5);
        assert!(!status.is_issue());
    }

    #[test]
    fn test_missing_indicator_defaults_to_none() {
        #[derive(Deserialize)]
        struct Status {
            #[serde(default)]
            indicator: Indicator,
        }

        let status: Status = serde_json::from_str("{}").unwrap();
        assert_eq!(status.indicator, Indicator::None);
        assert_eq!(Indicator::default().as_str(), "none");
    }

    #[test]
    fn test_severity_order_most_severe_first() {
        let ranks: Vec<u8> = ComponentStatus::ALL.iter().map(|s| s.severity_rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_component_status_from_str_accepts_short_forms() {
        assert_eq!("partial".parse::<ComponentStatus>(), Ok(ComponentStatus::PartialOutage));
        assert_eq!(
            "Under_Maintenance".parse::<ComponentStatus>(),
            Ok(ComponentStatus::UnderMaintenance)
        );
        assert!("sideways".parse::<ComponentStatus>().is_err());
    }

    #[test]
    fn test_incident_activity() {
        assert!(IncidentStatus::Investigating.is_active());
        assert!(IncidentStatus::Identified.is_active());
        assert!(IncidentStatus::Monitoring.is_active());
        assert!(!IncidentStatus::Resolved.is_active());
        assert!(!IncidentStatus::Postmortem.is_active());
    }

    #[test]
    fn test_maintenance_activity_and_priority() {
        assert!(MaintenanceStatus::Scheduled.is_active());
        assert!(MaintenanceStatus::Verifying.is_active());
        assert!(!MaintenanceStatus::Completed.is_active());
        assert!(
            MaintenanceStatus::InProgress.display_priority()
                < MaintenanceStatus::Verifying.display_priority()
        );
        assert!(
            MaintenanceStatus::Verifying.display_priority()
                < MaintenanceStatus::Scheduled.display_priority()
        );
    }

    #[test]
    fn test_indicator_severity() {
        assert!(Indicator::Major.is_severe());
        assert!(Indicator::Critical.is_severe());
        assert!(!Indicator::Minor.is_severe());
        assert_eq!(Indicator::None.to_string(), "none");
    }
}
