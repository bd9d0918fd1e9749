//! Headline derivation.
//!
//! The page's own indicator is coarse: one remote location can push it to
//! `major` while every core service is healthy. The headline is therefore
//! re-derived from per-entity counts by an ordered rule table, deferring to
//! the upstream wording only when core services themselves are impacted.

use serde::Serialize;
use tracing::debug;

use crate::aggregator::counts::StatusCounts;
use crate::snapshot::Indicator;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct OverallStatus {
    pub text: String,
    pub indicator: Indicator,
}

impl OverallStatus {
    fn new(text: impl Into<String>, indicator: Indicator) -> Self {
        Self {
            text: text.into(),
            indicator,
        }
    }
}

/// Everything the rules look at
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub services: &'a StatusCounts,
    pub locations: &'a StatusCounts,
    pub active_maintenance: usize,
    pub upstream_indicator: Indicator,
    pub upstream_description: &'a str,
}

impl RuleInput<'_> {
    /// Locations flagged `under_maintenance`, or the active window count
    /// when no location carries the flag.
    fn maintenance_count(&self) -> usize {
        if self.locations.under_maintenance > 0 {
            self.locations.under_maintenance
        } else {
            self.active_maintenance
        }
    }

    fn everything_healthy(&self) -> bool {
        self.services.all_operational() && self.locations.issues() == 0
    }

    fn upstream(&self) -> OverallStatus {
        OverallStatus::new(self.upstream_description, self.upstream_indicator)
    }
}

pub struct Rule {
    pub name: &'static str,
    evaluate: fn(&RuleInput<'_>) -> Option<OverallStatus>,
}

/// Evaluated top to bottom, first match wins.
pub const RULES: &[Rule] = &[
    Rule {
        name: "all_operational",
        evaluate: all_operational,
    },
    Rule {
        name: "scheduled_maintenance",
        evaluate: scheduled_maintenance,
    },
    Rule {
        name: "service_impact",
        evaluate: service_impact,
    },
    Rule {
        name: "location_impact",
        evaluate: location_impact,
    },
];

fn all_operational(input: &RuleInput<'_>) -> Option<OverallStatus> {
    (input.everything_healthy() && input.maintenance_count() == 0)
        .then(|| OverallStatus::new("All Systems Operational", Indicator::None))
}

fn scheduled_maintenance(input: &RuleInput<'_>) -> Option<OverallStatus> {
    let maintenance = input.maintenance_count();
    (input.everything_healthy() && maintenance > 0).then(|| {
        OverallStatus::new(
            format!("Scheduled Maintenance ({} locations)", maintenance),
            Indicator::None,
        )
    })
}

fn service_impact(input: &RuleInput<'_>) -> Option<OverallStatus> {
    if input.services.all_operational() {
        return None;
    }

    if input.upstream_indicator.is_severe() {
        return Some(input.upstream());
    }

    Some(OverallStatus::new(
        format!("Service Degradation ({} affected)", input.services.not_operational()),
        Indicator::Major,
    ))
}

fn location_impact(input: &RuleInput<'_>) -> Option<OverallStatus> {
    let locations = input.locations;

    if locations.major_outage > 0 {
        return Some(OverallStatus::new(
            format!(
                "Data Center Outages ({} major, {} partial)",
                locations.major_outage, locations.partial_outage
            ),
            Indicator::Major,
        ));
    }

    if locations.partial_outage > 0 {
        let maintenance = if locations.under_maintenance > 0 {
            format!("+ {} maintenance", locations.under_maintenance)
        } else {
            String::new()
        };
        return Some(OverallStatus::new(
            format!("Partial DC Outages ({} affected{})", locations.partial_outage, maintenance),
            Indicator::Minor,
        ));
    }

    if locations.degraded_performance > 0 {
        return Some(OverallStatus::new(
            format!("DC Performance Degraded ({} affected)", locations.degraded_performance),
            Indicator::Minor,
        ));
    }

    None
}

/// Run the rule table; falls back to the upstream description and indicator.
pub fn evaluate(input: &RuleInput<'_>) -> OverallStatus {
    RULES
        .iter()
        .find_map(|rule| {
            (rule.evaluate)(input).map(|status| {
                debug!(rule = rule.name, text = %status.text, "Overall status rule matched");
                status
            })
        })
        .unwrap_or_else(|| {
            debug!("No rule matched, using upstream status");
            input.upstream()
        })
}

pub fn derive_overall_status(
    service_counts: &StatusCounts,
    location_counts: &StatusCounts,
    active_maintenance: usize,
    upstream_indicator: Indicator,
    upstream_description: &str,
) -> OverallStatus {
    evaluate(&RuleInput {
        services: service_counts,
        locations: location_counts,
        active_maintenance,
        upstream_indicator,
        upstream_description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services_ok() -> StatusCounts {
        StatusCounts {
            operational: 12,
            ..Default::default()
        }
    }

    fn locations(operational: usize) -> StatusCounts {
        StatusCounts {
            operational,
            ..Default::default()
        }
    }

    fn input<'a>(services: &'a StatusCounts, locations: &'a StatusCounts) -> RuleInput<'a> {
        RuleInput {
            services,
            locations,
            active_maintenance: 0,
            upstream_indicator: Indicator::Minor,
            upstream_description: "Minor Service Outage",
        }
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["all_operational", "scheduled_maintenance", "service_impact", "location_impact"]
        );
    }

    #[test]
    fn test_all_operational_rule() {
        let services = services_ok();
        let locs = locations(330);
        let status = all_operational(&input(&services, &locs)).unwrap();
        assert_eq!(status, OverallStatus::new("All Systems Operational", Indicator::None));
    }

    #[test]
    fn test_all_operational_rule_ignores_upstream_alarm() {
        let services = services_ok();
        let locs = locations(330);
        let mut rule_input = input(&services, &locs);
        rule_input.upstream_indicator = Indicator::Critical;
        rule_input.upstream_description = "Major System Outage";

        assert_eq!(evaluate(&rule_input).text, "All Systems Operational");
    }

    #[test]
    fn test_maintenance_windows_without_flagged_locations() {
        let services = services_ok();
        let locs = locations(330);
        let mut rule_input = input(&services, &locs);
        rule_input.active_maintenance = 2;

        assert!(all_operational(&rule_input).is_none());
        assert_eq!(
            scheduled_maintenance(&rule_input).unwrap(),
            OverallStatus::new("Scheduled Maintenance (2 locations)", Indicator::None)
        );
    }

    #[test]
    fn test_flagged_locations_take_precedence_over_window_count() {
        let services = services_ok();
        let locs = StatusCounts {
            operational: 325,
            under_maintenance: 5,
            ..Default::default()
        };
        let mut rule_input = input(&services, &locs);
        rule_input.active_maintenance = 1;

        assert_eq!(evaluate(&rule_input).text, "Scheduled Maintenance (5 locations)");
    }

    #[test]
    fn test_service_impact_defers_to_severe_upstream() {
        let services = StatusCounts {
            operational: 11,
            major_outage: 1,
            ..Default::default()
        };
        let locs = locations(330);
        let mut rule_input = input(&services, &locs);
        rule_input.upstream_indicator = Indicator::Critical;
        rule_input.upstream_description = "Major System Outage";

        assert_eq!(
            service_impact(&rule_input).unwrap(),
            OverallStatus::new("Major System Outage", Indicator::Critical)
        );
    }

    #[test]
    fn test_service_impact_synthesized_for_mild_upstream() {
        let services = StatusCounts {
            operational: 10,
            degraded_performance: 1,
            unknown: 1,
            ..Default::default()
        };
        let locs = locations(330);

        assert_eq!(
            evaluate(&input(&services, &locs)),
            OverallStatus::new("Service Degradation (2 affected)", Indicator::Major)
        );
    }

    #[test]
    fn test_service_impact_beats_location_impact() {
        let services = StatusCounts {
            operational: 11,
            partial_outage: 1,
            ..Default::default()
        };
        let locs = StatusCounts {
            operational: 300,
            major_outage: 30,
            ..Default::default()
        };

        assert_eq!(evaluate(&input(&services, &locs)).text, "Service Degradation (1 affected)");
    }

    #[test]
    fn test_location_major_outages() {
        let services = services_ok();
        let locs = StatusCounts {
            operational: 325,
            major_outage: 3,
            partial_outage: 2,
            ..Default::default()
        };

        assert_eq!(
            location_impact(&input(&services, &locs)).unwrap(),
            OverallStatus::new("Data Center Outages (3 major, 2 partial)", Indicator::Major)
        );
    }

    #[test]
    fn test_location_partial_outages_without_maintenance() {
        let services = services_ok();
        let locs = StatusCounts {
            operational: 326,
            partial_outage: 4,
            ..Default::default()
        };

        assert_eq!(
            evaluate(&input(&services, &locs)),
            OverallStatus::new("Partial DC Outages (4 affected)", Indicator::Minor)
        );
    }

    #[test]
    fn test_location_partial_outages_with_maintenance() {
        let services = services_ok();
        let locs = StatusCounts {
            operational: 324,
            partial_outage: 4,
            under_maintenance: 2,
            ..Default::default()
        };

        assert_eq!(
            evaluate(&input(&services, &locs)),
            OverallStatus::new("Partial DC Outages (4 affected+ 2 maintenance)", Indicator::Minor)
        );
    }

    #[test]
    fn test_location_degraded_only() {
        let services = services_ok();
        let locs = StatusCounts {
            operational: 329,
            degraded_performance: 1,
            ..Default::default()
        };

        assert_eq!(
            evaluate(&input(&services, &locs)),
            OverallStatus::new("DC Performance Degraded (1 affected)", Indicator::Minor)
        );
    }

    #[test]
    fn test_location_impact_declines_when_locations_healthy() {
        let services = services_ok();
        let locs = locations(10);
        assert!(location_impact(&input(&services, &locs)).is_none());
    }

    #[test]
    fn test_empty_snapshot_is_operational() {
        let services = StatusCounts::default();
        let locs = StatusCounts::default();
        assert_eq!(evaluate(&input(&services, &locs)).text, "All Systems Operational");
    }
}
