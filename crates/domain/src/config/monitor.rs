use serde::{Deserialize, Serialize};

/// Polling and display configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Newline-delimited list of domains; order defines column order
    /// (default: "domains.txt")
    #[serde(default = "default_domains_file")]
    pub domains_file: String,

    /// Seconds between collection passes (default: 30)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Blink clock tick in milliseconds (default: 500)
    #[serde(default = "default_blink_interval")]
    pub blink_interval_ms: u64,

    /// Cell text is cut to this many characters (default: 20)
    #[serde(default = "default_column_width")]
    pub column_width: usize,

    /// Put each SOA serial row directly under its NS row (default: true)
    #[serde(default = "default_true")]
    pub interleave_soa: bool,

    /// Domains collected in parallel during a pass (default: 4)
    #[serde(default = "default_max_concurrent_domains")]
    pub max_concurrent_domains: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            domains_file: default_domains_file(),
            refresh_interval_secs: default_refresh_interval(),
            blink_interval_ms: default_blink_interval(),
            column_width: default_column_width(),
            interleave_soa: true,
            max_concurrent_domains: default_max_concurrent_domains(),
        }
    }
}

fn default_domains_file() -> String {
    "domains.txt".to_string()
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_blink_interval() -> u64 {
    500
}

fn default_column_width() -> usize {
    20
}

fn default_true() -> bool {
    true
}

fn default_max_concurrent_domains() -> usize {
    4
}
