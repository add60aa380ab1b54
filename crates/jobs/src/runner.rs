use crate::{BlinkJob, CollectionJob};
use std::sync::Arc;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// JobRunner::new()
///     .with_collection(CollectionJob::new(run_pass, state.clone()).with_interval(30))
///     .with_blink(BlinkJob::new(refresh_blinks).with_interval_ms(500))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    collection: Option<CollectionJob>,
    blink: Option<BlinkJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            collection: None,
            blink: None,
        }
    }

    pub fn with_collection(mut self, job: CollectionJob) -> Self {
        self.collection = Some(job);
        self
    }

    pub fn with_blink(mut self, job: BlinkJob) -> Self {
        self.blink = Some(job);
        self
    }

    /// Start all registered background jobs.
    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.collection {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.blink {
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
