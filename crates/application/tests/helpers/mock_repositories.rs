#![allow(dead_code)]
#![allow(unused_imports)]

use async_trait::async_trait;
use dnswatch_application::ports::{DnsQuerier, HistoryRepository};
use dnswatch_domain::{DnsQuery, DomainError, DomainHistory, RecordType};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

type QueryKey = (RecordType, String, Option<String>);

fn key_of(query: &DnsQuery) -> QueryKey {
    (
        query.record_type,
        query.target.to_string(),
        query.nameserver.as_ref().map(|ns| ns.to_string()),
    )
}

// ============================================================================
// Mock DnsQuerier
// ============================================================================

#[derive(Clone)]
pub struct MockDnsQuerier {
    responses: Arc<RwLock<HashMap<QueryKey, Vec<String>>>>,
    failing: Arc<RwLock<HashMap<QueryKey, bool>>>,
    should_fail: Arc<RwLock<bool>>,
    call_count: Arc<AtomicU64>,
}

impl MockDnsQuerier {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(RwLock::new(false)),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Answers for a query sent to the default upstream.
    pub async fn set_response(&self, record_type: RecordType, target: &str, lines: &[&str]) {
        self.responses.write().await.insert(
            (record_type, target.to_string(), None),
            lines.iter().map(|l| l.to_string()).collect(),
        );
    }

    /// Answers for a query sent to `nameserver`.
    pub async fn set_response_at(
        &self,
        record_type: RecordType,
        target: &str,
        nameserver: &str,
        lines: &[&str],
    ) {
        self.responses.write().await.insert(
            (record_type, target.to_string(), Some(nameserver.to_string())),
            lines.iter().map(|l| l.to_string()).collect(),
        );
    }

    /// Makes one query fail with a timeout.
    pub async fn fail_query(&self, record_type: RecordType, target: &str) {
        self.failing
            .write()
            .await
            .insert((record_type, target.to_string(), None), true);
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn clear(&self) {
        self.responses.write().await.clear();
        self.failing.write().await.clear();
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Default for MockDnsQuerier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsQuerier for MockDnsQuerier {
    async fn query(&self, query: &DnsQuery) -> Result<Vec<String>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if *self.should_fail.read().await {
            return Err(DomainError::QueryFailed("Mock querier failed".to_string()));
        }

        let key = key_of(query);
        if self.failing.read().await.contains_key(&key) {
            return Err(DomainError::QueryTimeout);
        }

        Ok(self
            .responses
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Mock HistoryRepository
// ============================================================================

#[derive(Clone)]
pub struct MockHistoryRepository {
    stored: Arc<RwLock<HashMap<String, DomainHistory>>>,
    corrupt: Arc<RwLock<Vec<String>>>,
    fail_saves: Arc<RwLock<bool>>,
    save_count: Arc<AtomicU64>,
}

impl MockHistoryRepository {
    pub fn new() -> Self {
        Self {
            stored: Arc::new(RwLock::new(HashMap::new())),
            corrupt: Arc::new(RwLock::new(Vec::new())),
            fail_saves: Arc::new(RwLock::new(false)),
            save_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn with_history(domain: &str, history: DomainHistory) -> Self {
        let repo = Self::new();
        repo.stored.write().await.insert(domain.to_string(), history);
        repo
    }

    pub async fn mark_corrupt(&self, domain: &str) {
        self.corrupt.write().await.push(domain.to_string());
    }

    pub async fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.write().await = fail;
    }

    pub async fn stored(&self, domain: &str) -> Option<DomainHistory> {
        self.stored.read().await.get(domain).cloned()
    }

    pub fn save_count(&self) -> u64 {
        self.save_count.load(Ordering::Relaxed)
    }
}

impl Default for MockHistoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRepository for MockHistoryRepository {
    async fn load(&self, domain: &str) -> Result<Option<DomainHistory>, DomainError> {
        if self.corrupt.read().await.iter().any(|d| d == domain) {
            return Err(DomainError::CorruptHistory {
                domain: domain.to_string(),
                reason: "expected value at line 1 column 1".to_string(),
            });
        }
        Ok(self.stored.read().await.get(domain).cloned())
    }

    async fn save(&self, domain: &str, history: &DomainHistory) -> Result<(), DomainError> {
        self.save_count.fetch_add(1, Ordering::Relaxed);
        if *self.fail_saves.read().await {
            return Err(DomainError::HistorySaveFailed {
                domain: domain.to_string(),
                reason: "disk full".to_string(),
            });
        }
        self.stored
            .write()
            .await
            .insert(domain.to_string(), history.clone());
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Full SOA answer line the way the resolver adapter renders it.
pub fn soa_line(domain: &str, nameserver: &str, serial: u32) -> String {
    format!(
        "{domain}. 3600 IN SOA {nameserver} hostmaster.{domain}. {serial} 7200 3600 1209600 300"
    )
}

/// Seeds a healthy domain: two nameservers with addresses, PTRs and SOA,
/// one A, one MX and one TXT record.
pub async fn seed_domain(querier: &MockDnsQuerier, domain: &str) {
    let ns1 = format!("ns1.{domain}.");
    let ns2 = format!("ns2.{domain}.");

    querier
        .set_response(RecordType::NS, domain, &[ns2.as_str(), ns1.as_str()])
        .await;
    for (ns, ip, serial) in [(&ns1, "192.0.2.1", 2024050101), (&ns2, "192.0.2.2", 2024050101)] {
        querier
            .set_response_at(RecordType::SOA, domain, ip, &[soa_line(domain, ns, serial).as_str()])
            .await;
        querier.set_response(RecordType::A, ns, &[ip]).await;
        let ptr = format!("host-{}.example.net.", ip.replace('.', "-"));
        querier.set_response(RecordType::PTR, ip, &[ptr.as_str()]).await;
    }
    querier
        .set_response(RecordType::A, domain, &["203.0.113.10"])
        .await;
    let mx = format!("10 mail.{domain}.");
    querier.set_response(RecordType::MX, domain, &[mx.as_str()]).await;
    querier
        .set_response(RecordType::TXT, domain, &["\"v=spf1 -all\""])
        .await;
}
