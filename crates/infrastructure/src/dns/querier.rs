use super::forwarding::{MessageBuilder, ResponseParser};
use super::reverse::ip_to_reverse_domain;
use super::transport::Transport;
use async_trait::async_trait;
use dnswatch_application::ports::DnsQuerier;
use dnswatch_domain::{DnsQuery, DomainError, RecordType};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, instrument};

const DNS_PORT: u16 = 53;

/// [`DnsQuerier`] speaking DNS directly with hickory-proto.
///
/// Queries go to the configured upstream unless the query names its own
/// nameserver. A nameserver given by name is first resolved to an address
/// through the upstream. Truncated UDP answers are retried once over TCP.
pub struct HickoryDnsQuerier {
    upstream: SocketAddr,
    timeout: Duration,
}

impl HickoryDnsQuerier {
    pub fn new(upstream: SocketAddr, timeout: Duration) -> Self {
        Self { upstream, timeout }
    }

    /// One request/response exchange with `server`.
    async fn exchange(
        &self,
        server: SocketAddr,
        name: &str,
        record_type: &RecordType,
    ) -> Result<Vec<String>, DomainError> {
        let (id, message) = MessageBuilder::build_query(name, record_type)?;

        let udp = Transport::udp(server);
        let mut response = ResponseParser::parse(
            &udp.send(&message, self.timeout).await?.bytes,
            record_type,
        )?;

        if response.truncated {
            debug!(server = %server, name = %name, "Truncated response, retrying over TCP");
            let tcp = Transport::tcp(server);
            response = ResponseParser::parse(
                &tcp.send(&message, self.timeout).await?.bytes,
                record_type,
            )?;
        }

        if response.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                response.id, id
            )));
        }

        if response.is_server_error() {
            return Err(DomainError::QueryFailed(format!(
                "{} {} answered {}",
                name,
                record_type,
                ResponseParser::rcode_to_status(response.rcode)
            )));
        }

        if response.is_nxdomain() {
            debug!(name = %name, "NXDOMAIN");
        }

        Ok(response.lines)
    }

    /// Address to send a nameserver-directed query to.
    async fn nameserver_addr(&self, nameserver: &str) -> Result<SocketAddr, DomainError> {
        if let Ok(ip) = nameserver.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, DNS_PORT));
        }

        self.exchange(self.upstream, nameserver, &RecordType::A)
            .await?
            .iter()
            .find_map(|line| line.parse::<IpAddr>().ok())
            .map(|ip| SocketAddr::new(ip, DNS_PORT))
            .ok_or_else(|| {
                DomainError::QueryFailed(format!("Nameserver {} has no address", nameserver))
            })
    }
}

#[async_trait]
impl DnsQuerier for HickoryDnsQuerier {
    #[instrument(skip(self), fields(record_type = %query.record_type, query_target = %query.target))]
    async fn query(&self, query: &DnsQuery) -> Result<Vec<String>, DomainError> {
        let server = match &query.nameserver {
            Some(nameserver) => self.nameserver_addr(nameserver).await?,
            None => self.upstream,
        };

        let name = match (query.record_type, query.target.parse::<IpAddr>()) {
            (RecordType::PTR, Ok(ip)) => ip_to_reverse_domain(&ip),
            _ => query.target.to_string(),
        };

        let lines = self.exchange(server, &name, &query.record_type).await?;
        debug!(server = %server, answers = lines.len(), "Query answered");
        Ok(lines)
    }
}
