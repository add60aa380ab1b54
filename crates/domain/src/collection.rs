use crate::dns_record::RecordKind;
use std::collections::{BTreeMap, HashMap};

/// Values of every tracked kind for one domain, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRecords {
    values: BTreeMap<RecordKind, Vec<String>>,
}

impl DomainRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: RecordKind, values: Vec<String>) -> Self {
        self.set(kind, values);
        self
    }

    pub fn set(&mut self, kind: RecordKind, values: Vec<String>) {
        self.values.insert(kind, values);
    }

    /// Values of `kind`; empty when the kind was never collected.
    pub fn values(&self, kind: RecordKind) -> &[String] {
        self.values.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn value(&self, kind: RecordKind, slot: usize) -> Option<&str> {
        self.values(kind).get(slot).map(String::as_str)
    }

    pub fn count(&self, kind: RecordKind) -> usize {
        self.values(kind).len()
    }
}

/// Largest per-domain sequence length of each kind across a pass.
/// Decides how many grid rows a kind reserves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaxCounts {
    counts: BTreeMap<RecordKind, usize>,
}

impl MaxCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: RecordKind, count: usize) -> Self {
        self.counts.insert(kind, count);
        self
    }

    pub fn get(&self, kind: RecordKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn observe(&mut self, kind: RecordKind, count: usize) {
        let current = self.counts.entry(kind).or_insert(0);
        *current = (*current).max(count);
    }
}

/// Result of one collection pass.
#[derive(Debug, Clone, Default)]
pub struct CollectedRecords {
    domains: Vec<String>,
    by_domain: HashMap<String, DomainRecords>,
    max_counts: MaxCounts,
}

impl CollectedRecords {
    /// Builds the pass result, keeping the input order of domains.
    pub fn new(results: Vec<(String, DomainRecords)>) -> Self {
        let mut max_counts = MaxCounts::new();
        let mut domains = Vec::with_capacity(results.len());
        let mut by_domain = HashMap::with_capacity(results.len());

        for (domain, records) in results {
            for kind in RecordKind::all() {
                max_counts.observe(*kind, records.count(*kind));
            }
            domains.push(domain.clone());
            by_domain.insert(domain, records);
        }

        Self {
            domains,
            by_domain,
            max_counts,
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn records(&self, domain: &str) -> Option<&DomainRecords> {
        self.by_domain.get(domain)
    }

    pub fn value(&self, domain: &str, kind: RecordKind, slot: usize) -> Option<&str> {
        self.records(domain).and_then(|r| r.value(kind, slot))
    }

    pub fn max_counts(&self) -> &MaxCounts {
        &self.max_counts
    }
}
