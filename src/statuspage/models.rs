use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::{ComponentStatus, IncidentStatus, Indicator, MaintenanceStatus};

/// Body of `/summary.json`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SummaryResponse {
    pub page: Page,
    pub status: PageStatus,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub scheduled_maintenances: Vec<ScheduledMaintenance>,
}

/// Body of `/status.json`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatusResponse {
    pub page: Page,
    pub status: PageStatus,
}

/// Body of `/components.json`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ComponentsResponse {
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Body of `/incidents.json`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IncidentsResponse {
    #[serde(default)]
    pub incidents: Vec<Incident>,
}

/// Body of `/scheduled-maintenances.json`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MaintenancesResponse {
    #[serde(default)]
    pub scheduled_maintenances: Vec<ScheduledMaintenance>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub url: String,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PageStatus {
    #[serde(default)]
    pub indicator: Indicator,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub status: ComponentStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub position: i64,
    pub description: Option<String>,
    #[serde(default)]
    pub showcase: bool,
    pub group_id: Option<String>,
    #[serde(default)]
    pub group: bool,
    #[serde(default)]
    pub only_show_if_degraded: bool,
    /// Child ids, present on group containers only
    pub components: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Incident {
    pub id: String,
    pub name: String,
    pub status: IncidentStatus,
    #[serde(default)]
    pub impact: Indicator,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub monitoring_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub shortlink: Option<String>,
    #[serde(default)]
    pub incident_updates: Vec<IncidentUpdate>,
    #[serde(default)]
    pub components: Vec<Component>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IncidentUpdate {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub display_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduledMaintenance {
    pub id: String,
    pub name: String,
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub impact: Indicator,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub scheduled_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub incident_updates: Vec<IncidentUpdate>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl SummaryResponse {
    /// Assemble a summary from the four split endpoints.
    pub fn from_parts(
        status: StatusResponse,
        components: ComponentsResponse,
        incidents: IncidentsResponse,
        maintenances: MaintenancesResponse,
    ) -> Self {
        Self {
            page: status.page,
            status: status.status,
            components: components.components,
            incidents: incidents.incidents,
            scheduled_maintenances: maintenances.scheduled_maintenances,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = r#"{
        "page": {
            "id": "yh6f0r4529hb",
            "name": "Cloudflare",
            "url": "https://www.cloudflarestatus.com",
            "updated_at": "2026-10-19T09:12:44.000Z"
        },
        "status": { "indicator": "minor", "description": "Minor Service Outage" },
        "components": [
            {
                "id": "grp1",
                "name": "Europe",
                "status": "operational",
                "group": true,
                "group_id": null,
                "components": ["c1"]
            },
            {
                "id": "c1",
                "name": "Amsterdam, Netherlands - (AMS)",
                "status": "partial_outage",
                "group": false,
                "group_id": "grp1",
                "position": 1
            },
            { "id": "c2", "name": "Workers", "status": "brand_new_status" }
        ],
        "incidents": [
            {
                "id": "inc1",
                "name": "Elevated errors in AMS",
                "status": "identified",
                "impact": "minor",
                "created_at": "2026-10-19T08:00:00.000-04:00",
                "incident_updates": [
                    { "id": "u2", "status": "identified", "body": "Fix in progress" },
                    { "id": "u1", "status": "investigating", "body": "Looking into it" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_summary_with_missing_fields() {
        let summary: SummaryResponse = serde_json::from_str(SUMMARY).unwrap();

        assert_eq!(summary.page.name, "Cloudflare");
        assert_eq!(summary.status.indicator, Indicator::Minor);
        assert_eq!(summary.components.len(), 3);
        assert!(summary.components[0].group);
        assert!(!summary.components[2].group);
        assert_eq!(summary.components[2].status, ComponentStatus::Unknown);
        assert!(summary.scheduled_maintenances.is_empty());
        assert_eq!(summary.incidents[0].incident_updates[0].body, "Fix in progress");
    }

    #[test]
    fn test_offset_timestamps_normalize_to_utc() {
        let summary: SummaryResponse = serde_json::from_str(SUMMARY).unwrap();
        let created = summary.incidents[0].created_at.unwrap();
        assert_eq!(created.to_rfc3339(), "2026-10-19T12:00:00+00:00");
    }

    #[test]
    fn test_from_parts_keeps_page_status() {
        let summary: SummaryResponse = serde_json::from_str(SUMMARY).unwrap();
        let rebuilt = SummaryResponse::from_parts(
            StatusResponse {
                page: summary.page.clone(),
                status: summary.status.clone(),
            },
            ComponentsResponse {
                components: summary.components.clone(),
            },
            IncidentsResponse {
                incidents: vec![],
            },
            MaintenancesResponse {
                scheduled_maintenances: vec![],
            },
        );

        assert_eq!(rebuilt.status.description, "Minor Service Outage");
        assert_eq!(rebuilt.components.len(), 3);
        assert!(rebuilt.incidents.is_empty());
    }
}
