pub mod settings;

pub use settings::{LoggingConfig, PollingConfig, Settings, SourceMode, StatusPageConfig};
