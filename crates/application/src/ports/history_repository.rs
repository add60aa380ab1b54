use async_trait::async_trait;
use dnswatch_domain::{DomainError, DomainHistory};

/// Key-value persistence of history, keyed by domain name.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Loads the stored history of `domain`.
    ///
    /// * `Ok(None)` - nothing stored yet
    /// * `Err(DomainError::CorruptHistory)` - stored data could not be decoded
    async fn load(&self, domain: &str) -> Result<Option<DomainHistory>, DomainError>;

    /// Replaces the stored history of `domain`. A reader never observes a
    /// partially written history.
    async fn save(&self, domain: &str, history: &DomainHistory) -> Result<(), DomainError>;
}
