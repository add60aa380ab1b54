use super::RecordType;
use std::sync::Arc;

/// One resolver request: record type, target name (or IP for PTR) and an
/// optional nameserver to ask instead of the default upstream.
/// Uses `Arc<str>` so the same target can be shared across the lookups of
/// a pass without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub record_type: RecordType,
    pub target: Arc<str>,
    pub nameserver: Option<Arc<str>>,
}

impl DnsQuery {
    pub fn new(record_type: RecordType, target: impl Into<Arc<str>>) -> Self {
        Self {
            record_type,
            target: target.into(),
            nameserver: None,
        }
    }

    /// Directs the query at `nameserver` (a hostname or IP).
    pub fn at(mut self, nameserver: impl Into<Arc<str>>) -> Self {
        self.nameserver = Some(nameserver.into());
        self
    }
}
