use dnswatch_application::use_cases::RefreshBlinksUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Fast tick that drives the blink clock.
pub struct BlinkJob {
    refresh: Arc<RefreshBlinksUseCase>,
    interval_ms: u64,
    shutdown: CancellationToken,
}

impl BlinkJob {
    pub fn new(refresh: Arc<RefreshBlinksUseCase>) -> Self {
        Self {
            refresh,
            interval_ms: 500,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval_ms(mut self, ms: u64) -> Self {
        self.interval_ms = ms;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_ms = self.interval_ms, "Starting blink job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(self.interval_ms));
            // The first tick completes immediately; the clock starts at zero.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("BlinkJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.refresh.execute();
                    }
                }
            }
        });
    }
}
