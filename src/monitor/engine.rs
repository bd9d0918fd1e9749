use std::future::Future;
use std::io::BufRead;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use crate::aggregator::{aggregate, HealthSummary};
use crate::config::Settings;
use crate::error::{Result, StatusError};
use crate::monitor::retry::{retry_with_backoff, RetryPolicy};
use crate::snapshot::Snapshot;
use crate::statuspage::SnapshotSource;
use tracing::{debug, error, info};

/// What asked for a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Timer,
    Manual,
}

/// Collapses refreshes that arrive within `window` of the last fetch.
#[derive(Debug)]
pub struct RefreshGate {
    window: Duration,
    last_fetch: Option<Instant>,
}

impl RefreshGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fetch: None,
        }
    }

    pub fn should_fetch(&self, now: Instant) -> bool {
        match self.last_fetch {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.window,
        }
    }

    pub fn record_fetch(&mut self, now: Instant) {
        self.last_fetch = Some(now);
    }
}

/// Result of one refresh cycle
#[derive(Debug, Clone)]
pub struct Refresh {
    pub trigger: RefreshTrigger,
    pub summary: HealthSummary,
    pub snapshot: Arc<Snapshot>,
    /// Served from the last snapshot instead of a new fetch
    pub deduplicated: bool,
}

pub struct StatusMonitor {
    settings: Arc<Settings>,
    source: Arc<SnapshotSource>,
    retry_policy: RetryPolicy,
    gate: RefreshGate,
    latest: Option<Arc<Snapshot>>,
}

impl StatusMonitor {
    /// Create a new monitor
    pub fn new(settings: Settings, source: SnapshotSource) -> Self {
        let retry_policy = RetryPolicy::new(settings.polling.retry_attempts);
        let gate = RefreshGate::new(settings.dedupe_window());

        Self {
            settings: Arc::new(settings),
            source: Arc::new(source),
            retry_policy,
            gate,
            latest: None,
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Fetch (or reuse) a snapshot and aggregate it
    pub async fn refresh(&mut self, trigger: RefreshTrigger) -> Result<Refresh> {
        let now = Instant::now();

        if let Some(snapshot) = self.latest.as_ref().filter(|_| !self.gate.should_fetch(now)) {
            debug!("{:?} refresh within dedupe window, reusing last snapshot", trigger);
            return Ok(Refresh {
                trigger,
                summary: aggregate(snapshot),
                snapshot: Arc::clone(snapshot),
                deduplicated: true,
            });
        }

        info!("{:?} refresh from {}", trigger, self.source.describe());

        let source = Arc::clone(&self.source);
        let snapshot = retry_with_backoff("fetch status snapshot", self.retry_policy, move || {
            let source = Arc::clone(&source);
            Box::pin(async move { source.fetch().await })
        })
        .await?;

        self.gate.record_fetch(Instant::now());

        let snapshot = Arc::new(snapshot);
        let summary = aggregate(&snapshot);
        self.latest = Some(Arc::clone(&snapshot));

        info!(
            "Refresh complete: {} ({}%, {} incidents, {} maintenance)",
            summary.overall.text,
            summary.health_percentage,
            summary.active_incidents,
            summary.active_maintenance
        );

        Ok(Refresh {
            trigger,
            summary,
            snapshot,
            deduplicated: false,
        })
    }

    /// Poll until `shutdown` resolves.
    ///
    /// Each timer tick or manual request runs one refresh; `report` sees the
    /// outcome. A failed fetch does not stop the loop.
    pub async fn run<F, R>(
        mut self,
        mut manual: mpsc::Receiver<()>,
        shutdown: F,
        mut report: R,
    ) -> Result<()>
    where
        F: Future<Output = ()>,
        R: FnMut(std::result::Result<&Refresh, &StatusError>),
    {
        info!("Starting status monitor...");
        info!("Polling interval: {}s", self.settings.polling.interval_seconds);
        info!("Source: {}", self.source.describe());

        let mut ticker = tokio::time::interval(self.settings.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            let trigger = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping monitor");
                    break;
                }
                _ = ticker.tick() => RefreshTrigger::Timer,
                Some(()) = manual.recv() => RefreshTrigger::Manual,
            };

            match self.refresh(trigger).await {
                Ok(refresh) => report(Ok(&refresh)),
                Err(e) => {
                    error!("Unable to fetch status data: {}", e);
                    report(Err(&e));
                }
            }
        }

        Ok(())
    }

}

/// Each line read from stdin becomes a manual refresh request.
pub fn stdin_refresh_requests() -> mpsc::Receiver<()> {
    line_refresh_requests(std::io::BufReader::new(std::io::stdin()))
}

/// Each line from `reader` becomes a manual refresh request.
///
/// Reads on a detached OS thread. A read that never returns does not keep
/// the runtime alive at shutdown.
fn line_refresh_requests<R>(reader: R) -> mpsc::Receiver<()>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    std::thread::spawn(move || {
        for line in reader.lines() {
            if line.is_err() {
                break;
            }
            // A refresh is already queued when the channel is full.
            if let Err(mpsc::error::TrySendError::Closed(_)) = tx.try_send(()) {
                break;
            }
        }
        debug!("Stopped reading refresh requests");
    });

    rx
}
