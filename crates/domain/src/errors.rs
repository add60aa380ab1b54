use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("DNS query failed: {0}")]
    QueryFailed(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Domain list unreadable: {0}")]
    DomainListUnreadable(String),

    #[error("Domain list is empty: {0}")]
    EmptyDomainList(String),

    #[error("History for {domain} could not be decoded: {reason}")]
    CorruptHistory { domain: String, reason: String },

    #[error("History for {domain} could not be saved: {reason}")]
    HistorySaveFailed { domain: String, reason: String },
}
