use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use crate::config::{Settings, SourceMode};
use crate::error::{Result, StatusError};
use crate::snapshot::Snapshot;
use crate::statuspage::models::{
    ComponentsResponse, IncidentsResponse, MaintenancesResponse, StatusResponse, SummaryResponse,
};
use tracing::{debug, info, warn};

pub struct StatusPageClient {
    client: Client,
    settings: Settings,
}

impl StatusPageClient {
    /// Create a new status page client
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.statuspage.timeout_seconds))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            settings: settings.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.settings.endpoint_url(endpoint);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Status API returned error ({}) for {}: {}", status, endpoint, error_text);
            return Err(StatusError::UpstreamStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetch the combined `/summary.json` document
    pub async fn fetch_summary(&self) -> Result<SummaryResponse> {
        let summary: SummaryResponse = self.get_json("summary.json").await?;

        info!(
            "Fetched summary: {} components, {} incidents, {} maintenances",
            summary.components.len(),
            summary.incidents.len(),
            summary.scheduled_maintenances.len()
        );

        Ok(summary)
    }

    /// Fetch the four split endpoints concurrently and join them
    pub async fn fetch_split(&self) -> Result<SummaryResponse> {
        let (status, components, incidents, maintenances) = futures::try_join!(
            self.get_json::<StatusResponse>("status.json"),
            self.get_json::<ComponentsResponse>("components.json"),
            self.get_json::<IncidentsResponse>("incidents.json"),
            self.get_json::<MaintenancesResponse>("scheduled-maintenances.json"),
        )?;

        info!(
            "Fetched split endpoints: {} components, {} incidents, {} maintenances",
            components.components.len(),
            incidents.incidents.len(),
            maintenances.scheduled_maintenances.len()
        );

        Ok(SummaryResponse::from_parts(status, components, incidents, maintenances))
    }

    /// Fetch one snapshot using the configured source mode
    pub async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let summary = match self.settings.statuspage.source {
            SourceMode::Summary => self.fetch_summary().await?,
            SourceMode::Split => self.fetch_split().await?,
        };

        Ok(summary.into())
    }

    /// Test connectivity to the status API
    pub async fn test_connection(&self) -> Result<String> {
        info!("Testing status API connectivity...");

        let response: StatusResponse = self.get_json("status.json").await?;

        info!(
            "✓ Connected to '{}' ({}): {}",
            response.page.name, response.page.url, response.status.description
        );

        Ok(response.page.name)
    }

    /// Get the base URL for display/logging
    pub fn base_url(&self) -> &str {
        &self.settings.statuspage.base_url
    }
}

/// Read a saved `summary.json` document from disk
pub async fn load_snapshot_file(path: &Path) -> Result<Snapshot> {
    let content = tokio::fs::read_to_string(path).await?;

    let summary: SummaryResponse = serde_json::from_str(&content)?;
    debug!("Loaded snapshot from {}", path.display());

    Ok(summary.into())
}
