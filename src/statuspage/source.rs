use std::path::{Path, PathBuf};
use crate::config::Settings;
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::statuspage::client::{load_snapshot_file, StatusPageClient};

/// Where snapshots come from: the live API or a saved `summary.json`.
pub enum SnapshotSource {
    Api(StatusPageClient),
    File(PathBuf),
}

impl SnapshotSource {
    pub fn from_settings(settings: &Settings, input: Option<&Path>) -> Result<Self> {
        match input {
            Some(path) => Ok(SnapshotSource::File(path.to_path_buf())),
            None => Ok(SnapshotSource::Api(StatusPageClient::new(settings)?)),
        }
    }

    pub async fn fetch(&self) -> Result<Snapshot> {
        match self {
            SnapshotSource::Api(client) => client.fetch_snapshot().await,
            SnapshotSource::File(path) => load_snapshot_file(path).await,
        }
    }

    /// Get a description for display/logging
    pub fn describe(&self) -> String {
        match self {
            SnapshotSource::Api(client) => client.base_url().to_string(),
            SnapshotSource::File(path) => path.display().to_string(),
        }
    }
}
