use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Upstream resolver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Resolver used for every query that does not target a specific
    /// nameserver. Bare IPs get port 53 (default: "8.8.8.8:53")
    #[serde(default = "default_server")]
    pub server: String,

    /// Per-query timeout in milliseconds (default: 3000)
    #[serde(default = "default_query_timeout")]
    pub query_timeout_ms: u64,
}

impl DnsConfig {
    /// Parses `server` as `ip:port` or a bare `ip`.
    pub fn server_addr(&self) -> Option<SocketAddr> {
        parse_server_addr(&self.server)
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            query_timeout_ms: default_query_timeout(),
        }
    }
}

pub fn parse_server_addr(server: &str) -> Option<SocketAddr> {
    let server = server.trim();
    if let Ok(addr) = SocketAddr::from_str(server) {
        return Some(addr);
    }
    IpAddr::from_str(server)
        .ok()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
}

fn default_server() -> String {
    "8.8.8.8:53".to_string()
}

fn default_query_timeout() -> u64 {
    3000
}
