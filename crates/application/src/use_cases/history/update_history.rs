use crate::ports::HistoryRepository;
use chrono::{DateTime, Utc};
use dnswatch_domain::{CollectedRecords, DomainError, DomainHistory, RecordKind};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

/// Use case: feed a finished pass into the slot histories and persist them.
///
/// Owns the in-memory history of every domain. Histories are loaded lazily
/// on first sight of a domain and saved once per pass per domain.
pub struct UpdateHistoryUseCase {
    repository: Arc<dyn HistoryRepository>,
    histories: Mutex<HashMap<String, DomainHistory>>,
}

impl UpdateHistoryUseCase {
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self {
            repository,
            histories: Mutex::new(HashMap::new()),
        }
    }

    /// Loads the persisted history of each domain not yet in memory.
    /// Unreadable or corrupt history starts the domain from scratch.
    #[instrument(skip(self, domains), fields(domains = domains.len()))]
    pub async fn load(&self, domains: &[String]) {
        let mut histories = self.histories.lock().await;
        for domain in domains {
            if histories.contains_key(domain) {
                continue;
            }
            let history = self.load_one(domain).await;
            histories.insert(domain.clone(), history);
        }
    }

    async fn load_one(&self, domain: &str) -> DomainHistory {
        match self.repository.load(domain).await {
            Ok(Some(history)) => {
                debug!(domain = %domain, entries = history.total_entries(), "History loaded");
                history
            }
            Ok(None) => DomainHistory::new(),
            Err(e @ DomainError::CorruptHistory { .. }) => {
                warn!(domain = %domain, error = %e, "Ignoring malformed history");
                DomainHistory::new()
            }
            Err(e) => {
                error!(domain = %domain, error = %e, "Failed to load history");
                DomainHistory::new()
            }
        }
    }

    /// Records every slot of the pass at `now`, then saves each domain.
    /// Returns a copy of the updated histories for rendering.
    #[instrument(skip(self, collected))]
    pub async fn execute(
        &self,
        collected: &CollectedRecords,
        now: DateTime<Utc>,
    ) -> HashMap<String, DomainHistory> {
        self.load(collected.domains()).await;

        let mut histories = self.histories.lock().await;
        let mut changed = 0;

        for domain in collected.domains() {
            let Some(records) = collected.records(domain) else {
                continue;
            };
            let history = histories.entry(domain.clone()).or_default();

            let mut appended = 0;
            for kind in RecordKind::all() {
                appended += history.record_pass(*kind, records.values(*kind), now);
            }
            if appended > 0 {
                info!(domain = %domain, appended, "Records changed");
                changed += appended;
            }

            if let Err(e) = self.repository.save(domain, history).await {
                error!(domain = %domain, error = %e, "Failed to save history");
            }
        }

        debug!(changed, "History updated");
        histories.clone()
    }
}
