use async_trait::async_trait;
use dnswatch_domain::{DnsQuery, DomainError};

/// Resolver adapter: issues one query and returns its answers as plain text
/// lines.
///
/// Line format per record type:
/// - NS, PTR: the name, fully qualified with a trailing dot
/// - A: the address
/// - MX: `<preference> <exchange>`
/// - TXT: the quoted character strings
/// - SOA: the full answer line,
///   `<name> <ttl> <class> SOA <mname> <rname> <serial> <refresh> <retry> <expire> <minimum>`
///
/// Callers treat any error as "no answers"; implementations must not retry.
#[async_trait]
pub trait DnsQuerier: Send + Sync {
    async fn query(&self, query: &DnsQuery) -> Result<Vec<String>, DomainError>;
}
