pub mod engine;
pub mod retry;

pub use engine::{stdin_refresh_requests, Refresh, RefreshGate, RefreshTrigger, StatusMonitor};
pub use retry::{retry_with_backoff, RetryPolicy};
