use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use crate::error::{Result, StatusError};

pub const DEFAULT_BASE_URL: &str = "https://www.cloudflarestatus.com/api/v2";

/// Upper bound on the polling interval (one day)
const MAX_INTERVAL_SECONDS: u64 = 86_400;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub statuspage: StatusPageConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which endpoints make up one snapshot
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Single `/summary.json` request
    #[default]
    Summary,
    /// `/status.json`, `/components.json`, `/incidents.json` and
    /// `/scheduled-maintenances.json` fetched concurrently
    Split,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatusPageConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub source: SourceMode,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for StatusPageConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            source: SourceMode::default(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingConfig {
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
    /// Refreshes closer together than this reuse the last snapshot
    #[serde(default = "default_dedupe_seconds")]
    pub dedupe_seconds: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            dedupe_seconds: default_dedupe_seconds(),
            retry_attempts: default_retry_attempts(),
        }
    }
}

fn default_interval_seconds() -> u64 {
    30 * 60
}

fn default_dedupe_seconds() -> u64 {
    5
}

fn default_retry_attempts() -> u32 {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Err(StatusError::Config(format!(
                "Configuration file not found: {}\n\nCreate one from config.yaml.example or run without --config to use the defaults.",
                config_path.display()
            )));
        }

        let config_content = std::fs::read_to_string(config_path)
            .map_err(|e| StatusError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            )))?;

        let settings = Self::from_yaml(&config_content)?;

        Ok(settings)
    }

    /// Use the file when one is given, otherwise the built-in defaults
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load(path),
            None => {
                let mut settings = Settings::default();
                settings.apply_env_overrides();
                settings.validate()?;
                Ok(settings)
            }
        }
    }

    /// Parse, apply environment overrides and validate
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut settings: Settings = serde_yaml::from_str(content)?;
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    fn apply_env_overrides(&mut self) {
        dotenv::dotenv().ok();

        if let Ok(base_url) = std::env::var("CFSA_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.statuspage.base_url = base_url;
            }
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let base_url = &self.statuspage.base_url;

        if base_url.is_empty() {
            return Err(StatusError::Validation(
                "statuspage.base_url cannot be empty".to_string(),
            ));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(StatusError::Validation(format!(
                "statuspage.base_url must start with http:// or https:// (got '{}')",
                base_url
            )));
        }

        if self.statuspage.timeout_seconds == 0 {
            return Err(StatusError::Validation(
                "statuspage.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.polling.interval_seconds == 0 || self.polling.interval_seconds > MAX_INTERVAL_SECONDS {
            return Err(StatusError::Validation(format!(
                "polling.interval_seconds must be between 1 and {}",
                MAX_INTERVAL_SECONDS
            )));
        }

        if self.polling.retry_attempts == 0 {
            return Err(StatusError::Validation(
                "polling.retry_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Full URL of an endpoint under the API base, e.g. `summary.json`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.statuspage.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.polling.interval_seconds)
    }

    pub fn dedupe_window(&self) -> Duration {
        Duration::from_secs(self.polling.dedupe_seconds)
    }
}
