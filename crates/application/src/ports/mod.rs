pub mod dns_querier;
pub mod history_repository;

pub use dns_querier::DnsQuerier;
pub use history_repository::HistoryRepository;
