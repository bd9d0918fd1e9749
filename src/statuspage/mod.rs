pub mod client;
pub mod models;
pub mod source;

pub use client::{load_snapshot_file, StatusPageClient};
pub use models::{Component, Incident, ScheduledMaintenance, SummaryResponse};
pub use source::SnapshotSource;
