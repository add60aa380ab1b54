//! Configuration module for dnswatch
//!
//! - `root`: Main configuration and CLI overrides
//! - `monitor`: Polling interval, blink clock and grid display
//! - `dns`: Upstream resolver settings
//! - `history`: Where history files live
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod dns;
pub mod errors;
pub mod history;
pub mod logging;
pub mod monitor;
pub mod root;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use history::HistoryConfig;
pub use logging::LoggingConfig;
pub use monitor::MonitorConfig;
pub use root::{CliOverrides, Config};
