use dnswatch_application::services::MonitorState;
use dnswatch_application::use_cases::RunCollectionPassUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Runs a collection pass at startup, then every `interval_secs`, and
/// whenever the front end asks for one.
pub struct CollectionJob {
    run_pass: Arc<RunCollectionPassUseCase>,
    state: Arc<MonitorState>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CollectionJob {
    pub fn new(run_pass: Arc<RunCollectionPassUseCase>, state: Arc<MonitorState>) -> Self {
        Self {
            run_pass,
            state,
            interval_secs: 30,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            domains = self.run_pass.domains().len(),
            "Starting collection job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CollectionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.run_pass.execute().await;
                    }
                    _ = self.state.refresh_requested() => {
                        debug!("Manual refresh requested");
                        self.run_pass.execute().await;
                        interval.reset();
                    }
                }
            }
        });
    }
}
