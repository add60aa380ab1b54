use crate::errors::DomainError;

/// Parses a newline-delimited domain list. Surrounding whitespace is trimmed,
/// blank lines are skipped and order is kept (it defines column order).
pub fn parse_domain_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`parse_domain_list`] but rejects a list without any domain.
pub fn require_domains(text: &str, source: &str) -> Result<Vec<String>, DomainError> {
    let domains = parse_domain_list(text);
    if domains.is_empty() {
        return Err(DomainError::EmptyDomainList(source.to_string()));
    }
    Ok(domains)
}
