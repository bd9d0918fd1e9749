//! Terminal and JSON presentation of summaries and listings.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::aggregator::{HealthSummary, StatusCounts};
use crate::error::Result;
use crate::listing::DataCenterRow;
use crate::snapshot::{IncidentRecord, MaintenanceWindow, MonitoredEntity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `{"error": "..."}` for JSON output that could not be rendered
pub fn error_json(error: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": error.to_string() }).to_string()
}

/// "Just now", "12m ago", "3h ago", "2d ago"
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        format!("{}d ago", days)
    }
}

/// "Oct 19, 09:12 UTC"
pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %H:%M UTC").to_string()
}

fn format_optional(at: Option<DateTime<Utc>>) -> String {
    at.map(format_datetime).unwrap_or_else(|| "unknown".to_string())
}

fn data_center_label(counts: &StatusCounts) -> String {
    if counts.issues() == 0 && counts.under_maintenance == 0 {
        return "All Operational".to_string();
    }

    let mut parts = Vec::new();
    if counts.major_outage > 0 {
        parts.push(format!("{} outage", counts.major_outage));
    }
    if counts.partial_outage > 0 {
        parts.push(format!("{} partial", counts.partial_outage));
    }
    if counts.degraded_performance > 0 {
        parts.push(format!("{} degraded", counts.degraded_performance));
    }
    if counts.under_maintenance > 0 {
        parts.push(format!("{} maintenance", counts.under_maintenance));
    }
    parts.join(", ")
}

fn service_label(counts: &StatusCounts) -> String {
    match counts.not_operational() {
        0 => "All Operational".to_string(),
        1 => "1 issue".to_string(),
        n => format!("{} issues", n),
    }
}

pub fn render_summary(summary: &HealthSummary, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("{} status", summary.page_name),
        format!(
            "  Status:       {} [{}]",
            summary.overall.text,
            summary.overall.indicator.label()
        ),
    ];

    if summary.upstream != summary.overall {
        lines.push(format!(
            "  Upstream:     {} [{}]",
            summary.upstream.text,
            summary.upstream.indicator.label()
        ));
    }

    lines.push(format!(
        "  Health:       {}% {}",
        summary.health_percentage,
        summary.health_band.label()
    ));
    lines.push(format!(
        "  Data centers: {}/{} operational • {}",
        summary.locations.operational,
        summary.location_total,
        data_center_label(&summary.locations)
    ));
    lines.push(format!(
        "  Services:     {}/{} operational • {}",
        summary.services.operational,
        summary.service_total,
        service_label(&summary.services)
    ));
    lines.push(format!(
        "  Incidents:    {}",
        match summary.active_incidents {
            0 => "No Incidents".to_string(),
            n => format!("{} active", n),
        }
    ));
    lines.push(format!(
        "  Maintenance:  {}",
        match summary.active_maintenance {
            0 => "None".to_string(),
            n => format!("{} active", n),
        }
    ));

    if let Some(updated_at) = summary.updated_at {
        lines.push(format!("  Updated:      {}", relative_time(updated_at, now)));
    }

    lines.join("\n")
}

pub fn render_data_centers(rows: &[DataCenterRow]) -> String {
    if rows.is_empty() {
        return "No data centers match".to_string();
    }

    let mut lines = vec![format!("{} data centers", rows.len())];
    for row in rows {
        let position = row
            .coordinates
            .map(|c| format!("{:>9.4}, {:>8.4}", c.longitude, c.latitude))
            .unwrap_or_default();
        lines.push(format!(
            "  {:<4} {:<16} {:<40} {}",
            row.code,
            row.status.label(),
            row.display_name,
            position
        ));
    }
    lines.join("\n")
}

pub fn render_services(services: &[&MonitoredEntity]) -> String {
    if services.is_empty() {
        return "No services".to_string();
    }

    let mut lines = vec![format!("{} services", services.len())];
    for service in services {
        lines.push(format!("  {:<16} {}", service.status.label(), service.name));
    }
    lines.join("\n")
}

pub fn render_incidents(incidents: &[&IncidentRecord], now: DateTime<Utc>) -> String {
    if incidents.is_empty() {
        return "No active incidents".to_string();
    }

    let mut lines = vec![format!("{} active incidents", incidents.len())];
    for incident in incidents {
        let started = incident
            .created_at
            .map(|at| format!("{} ({})", format_datetime(at), relative_time(at, now)))
            .unwrap_or_else(|| "unknown".to_string());

        lines.push(String::new());
        lines.push(format!("  [{}] {}", incident.lifecycle_status.label(), incident.name));
        lines.push(format!("    Started: {}", started));

        if let Some(update) = incident.latest_update() {
            lines.push(format!("    Latest:  {}", update.body.trim()));
        }
        if !incident.affected_entities.is_empty() {
            let names: Vec<&str> = incident.affected_entities.iter().map(|e| e.name.as_str()).collect();
            lines.push(format!("    Affects: {}", names.join(", ")));
        }
        if let Some(link) = &incident.shortlink {
            lines.push(format!("    Link:    {}", link));
        }
    }
    lines.join("\n")
}

pub fn render_maintenance(windows: &[&MaintenanceWindow]) -> String {
    if windows.is_empty() {
        return "No scheduled maintenance".to_string();
    }

    let mut lines = vec![format!("{} scheduled maintenance", windows.len())];
    for window in windows {
        lines.push(String::new());
        lines.push(format!("  [{}] {}", window.lifecycle_status.label(), window.name));
        lines.push(format!(
            "    Window:  {} - {}",
            format_optional(window.scheduled_start),
            format_optional(window.scheduled_end)
        ));
        if !window.affected_entities.is_empty() {
            let names: Vec<&str> = window.affected_entities.iter().map(|e| e.name.as_str()).collect();
            lines.push(format!("    Affects: {}", names.join(", ")));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{HealthBand, OverallStatus};
    use crate::snapshot::{Indicator, MaintenanceStatus};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn summary() -> HealthSummary {
        HealthSummary {
            page_name: "Cloudflare".to_string(),
            updated_at: Some(now() - Duration::minutes(7)),
            overall: OverallStatus {
                text: "Data Center Outages (3 major, 2 partial)".to_string(),
                indicator: Indicator::Major,
            },
            upstream: OverallStatus {
                text: "Partial System Outage".to_string(),
                indicator: Indicator::Major,
            },
            health_percentage: 99,
            health_band: HealthBand::Healthy,
            location_total: 330,
            locations: StatusCounts {
                operational: 325,
                major_outage: 3,
                partial_outage: 2,
                ..Default::default()
            },
            service_total: 12,
            services: StatusCounts {
                operational: 12,
                ..Default::default()
            },
            active_incidents: 1,
            active_maintenance: 0,
        }
    }

    #[test]
    fn test_relative_time_buckets() {
        assert_eq!(relative_time(now() - Duration::seconds(30), now()), "Just now");
        assert_eq!(relative_time(now() - Duration::minutes(12), now()), "12m ago");
        assert_eq!(relative_time(now() - Duration::minutes(185), now()), "3h ago");
        assert_eq!(relative_time(now() - Duration::hours(49), now()), "2d ago");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(now()), "Oct 19, 12:00 UTC");
    }

    #[test]
    fn test_render_summary_text() {
        let text = render_summary(&summary(), now());

        assert!(text.contains("Status:       Data Center Outages (3 major, 2 partial) [Major Issues]"));
        assert!(text.contains("Upstream:     Partial System Outage [Major Issues]"));
        assert!(text.contains("Health:       99% healthy"));
        assert!(text.contains("325/330 operational • 3 outage, 2 partial"));
        assert!(text.contains("12/12 operational • All Operational"));
        assert!(text.contains("Incidents:    1 active"));
        assert!(text.contains("Updated:      7m ago"));
    }

    #[test]
    fn test_render_summary_hides_matching_upstream() {
        let mut summary = summary();
        summary.upstream = summary.overall.clone();
        assert!(!render_summary(&summary, now()).contains("Upstream:"));
    }

    #[test]
    fn test_summary_json_has_every_status_slot() {
        let json = to_json(&summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["health_percentage"], 99);
        assert_eq!(value["overall"]["indicator"], "major");
        assert_eq!(value["locations"]["degraded_performance"], 0);
        assert_eq!(value["services"]["unknown"], 0);
    }

    #[test]
    fn test_error_json_escapes_message() {
        let json = error_json(&r#"key "page" must be a map"#);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"], r#"key "page" must be a map"#);
    }

    #[test]
    fn test_service_label_plural() {
        let counts = StatusCounts {
            operational: 3,
            partial_outage: 1,
            ..Default::default()
        };
        assert_eq!(service_label(&counts), "1 issue");

        let counts = StatusCounts {
            major_outage: 2,
            ..Default::default()
        };
        assert_eq!(service_label(&counts), "2 issues");
    }

    #[test]
    fn test_empty_listings() {
        assert_eq!(render_data_centers(&[]), "No data centers match");
        assert_eq!(render_incidents(&[], now()), "No active incidents");
        assert_eq!(render_maintenance(&[]), "No scheduled maintenance");
    }

    #[test]
    fn test_render_maintenance_window() {
        let window = MaintenanceWindow {
            id: "m1".to_string(),
            name: "LHR network upgrade".to_string(),
            lifecycle_status: MaintenanceStatus::InProgress,
            scheduled_start: Some(now()),
            scheduled_end: None,
            affected_entities: vec![],
        };

        let text = render_maintenance(&[&window]);
        assert!(text.contains("[In Progress] LHR network upgrade"));
        assert!(text.contains("Window:  Oct 19, 12:00 UTC - unknown"));
    }
}
