use dnswatch_domain::{require_domains, DomainError};
use std::path::Path;
use tracing::info;

/// Reads the newline-delimited domain list. An unreadable or empty list is
/// an error; the caller cannot proceed without domains.
pub async fn read_domain_list(path: impl AsRef<Path>) -> Result<Vec<String>, DomainError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::DomainListUnreadable(format!("{}: {}", path.display(), e))
    })?;

    let domains = require_domains(&text, &path.display().to_string())?;
    info!(path = %path.display(), domains = domains.len(), "Domain list loaded");
    Ok(domains)
}
