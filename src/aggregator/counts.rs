use serde::Serialize;

use crate::snapshot::{ComponentStatus, MonitoredEntity};

/// Per-status tally. Every status has a slot, zero or not.
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub operational: usize,
    pub degraded_performance: usize,
    pub partial_outage: usize,
    pub major_outage: usize,
    pub under_maintenance: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn get(&self, status: ComponentStatus) -> usize {
        match status {
            ComponentStatus::Operational => self.operational,
            ComponentStatus::DegradedPerformance => self.degraded_performance,
            ComponentStatus::PartialOutage => self.partial_outage,
            ComponentStatus::MajorOutage => self.major_outage,
            ComponentStatus::UnderMaintenance => self.under_maintenance,
            ComponentStatus::Unknown => self.unknown,
        }
    }

    fn slot_mut(&mut self, status: ComponentStatus) -> &mut usize {
        match status {
            ComponentStatus::Operational => &mut self.operational,
            ComponentStatus::DegradedPerformance => &mut self.degraded_performance,
            ComponentStatus::PartialOutage => &mut self.partial_outage,
            ComponentStatus::MajorOutage => &mut self.major_outage,
            ComponentStatus::UnderMaintenance => &mut self.under_maintenance,
            ComponentStatus::Unknown => &mut self.unknown,
        }
    }

    pub fn record(&mut self, status: ComponentStatus) {
        *self.slot_mut(status) += 1;
    }

    /// All statuses with their counts, most severe first.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentStatus, usize)> + '_ {
        ComponentStatus::ALL.iter().map(move |&status| (status, self.get(status)))
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, count)| count).sum()
    }

    /// Degraded, partial and major outages combined.
    pub fn issues(&self) -> usize {
        self.iter()
            .filter(|(status, _)| status.is_issue())
            .map(|(_, count)| count)
            .sum()
    }

    /// Anything not exactly `operational`, unknown included.
    pub fn not_operational(&self) -> usize {
        self.total() - self.operational
    }

    pub fn all_operational(&self) -> bool {
        self.not_operational() == 0
    }
}

pub fn count_by_status<'a, I>(entities: I) -> StatusCounts
where
    I: IntoIterator<Item = &'a MonitoredEntity>,
{
    let mut counts = StatusCounts::default();
    for entity in entities {
        counts.record(entity.status);
    }
    counts
}
