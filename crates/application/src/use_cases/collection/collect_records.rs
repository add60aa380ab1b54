use crate::ports::DnsQuerier;
use dnswatch_domain::{
    CollectedRecords, DnsQuery, DomainRecords, RecordKind, RecordType, NOT_AVAILABLE,
};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Field holding the record type in a full SOA answer line.
const SOA_TYPE_FIELD: usize = 3;
/// Field holding the serial in a full SOA answer line.
const SOA_SERIAL_FIELD: usize = 6;

/// Use case: one collection pass over every monitored domain.
///
/// Per domain the queries run in dependency order: NS first, then for each
/// nameserver its address, its SOA serial (asked of that nameserver at that
/// address) and the PTR of that address, then A, MX and TXT of the domain
/// itself. Domains are
/// collected concurrently, bounded by `max_concurrent`. A failed query only
/// empties its own sequence.
pub struct CollectRecordsUseCase {
    querier: Arc<dyn DnsQuerier>,
    max_concurrent: usize,
}

impl CollectRecordsUseCase {
    pub fn new(querier: Arc<dyn DnsQuerier>, max_concurrent: usize) -> Self {
        Self {
            querier,
            max_concurrent: max_concurrent.max(1),
        }
    }

    #[instrument(skip(self, domains), fields(domains = domains.len()))]
    pub async fn execute(&self, domains: &[String]) -> CollectedRecords {
        let results: Vec<(String, DomainRecords)> = stream::iter(domains.iter().cloned())
            .map(|domain| async move {
                let records = self.collect_domain(&domain).await;
                (domain, records)
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let collected = CollectedRecords::new(results);
        info!(
            domains = collected.domains().len(),
            nameservers = collected.max_counts().get(RecordKind::Ns),
            "Collection pass finished"
        );
        collected
    }

    async fn collect_domain(&self, domain: &str) -> DomainRecords {
        let nameservers = sorted(self.lookup(DnsQuery::new(RecordType::NS, domain)).await);

        let mut serials = Vec::with_capacity(nameservers.len());
        let mut addresses = Vec::with_capacity(nameservers.len());
        let mut pointers = Vec::with_capacity(nameservers.len());

        for nameserver in &nameservers {
            let address = self
                .lookup(DnsQuery::new(RecordType::A, nameserver.as_str()))
                .await
                .into_iter()
                .next();

            // Ask the nameserver by address once known; by name otherwise.
            let soa_server = address.as_deref().unwrap_or(nameserver.as_str());
            let soa = self
                .lookup(DnsQuery::new(RecordType::SOA, domain).at(soa_server))
                .await;
            serials.push(soa_serial(&soa).unwrap_or_else(|| NOT_AVAILABLE.to_string()));

            let pointer = match &address {
                Some(ip) => self
                    .lookup(DnsQuery::new(RecordType::PTR, ip.as_str()))
                    .await
                    .first()
                    .map(|name| strip_root(name).to_string()),
                None => None,
            };

            addresses.push(address.unwrap_or_else(|| NOT_AVAILABLE.to_string()));
            pointers.push(pointer.unwrap_or_else(|| NOT_AVAILABLE.to_string()));
        }

        let mut records = DomainRecords::new()
            .with(RecordKind::Ns, nameservers)
            .with(RecordKind::Soa, serials)
            .with(RecordKind::Ip, addresses)
            .with(RecordKind::Ptr, pointers);

        for kind in [RecordKind::A, RecordKind::Mx, RecordKind::Txt] {
            let values = sorted(self.lookup(DnsQuery::new(kind.query_type(), domain)).await);
            records.set(kind, values);
        }

        debug!(
            domain = %domain,
            ns = records.count(RecordKind::Ns),
            a = records.count(RecordKind::A),
            mx = records.count(RecordKind::Mx),
            txt = records.count(RecordKind::Txt),
            "Domain collected"
        );
        records
    }

    /// Runs one query; errors and blank lines degrade to nothing.
    async fn lookup(&self, query: DnsQuery) -> Vec<String> {
        match self.querier.query(&query).await {
            Ok(lines) => lines
                .into_iter()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect(),
            Err(e) => {
                warn!(
                    record_type = %query.record_type,
                    target = %query.target,
                    nameserver = ?query.nameserver,
                    error = %e,
                    "DNS query failed"
                );
                Vec::new()
            }
        }
    }
}

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

/// Serial of the first answer line whose type field reads `SOA`.
fn soa_serial(lines: &[String]) -> Option<String> {
    lines.iter().find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match (fields.get(SOA_TYPE_FIELD), fields.get(SOA_SERIAL_FIELD)) {
            (Some(&"SOA"), Some(serial)) => Some(serial.to_string()),
            _ => None,
        }
    })
}

fn strip_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
