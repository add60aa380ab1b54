//! dnswatch domain layer: record kinds, slot history, change detection,
//! blink policy and grid layout. No I/O lives here.
pub mod blink;
pub mod collection;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod domain_list;
pub mod errors;
pub mod grid;
pub mod history;
pub mod layout;

pub use blink::{blink_policy, Blink, FAST_PULSE, SLOW_PULSE};
pub use collection::{CollectedRecords, DomainRecords, MaxCounts};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::{DisplayColor, RecordKind, RecordType};
pub use domain_list::{parse_domain_list, require_domains};
pub use errors::DomainError;
pub use grid::{truncate, Grid, GridCell};
pub use history::{DomainHistory, HistoryEntry, HistoryLog, SlotKey, NOT_AVAILABLE};
pub use layout::RowPlan;
