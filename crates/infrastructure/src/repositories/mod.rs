pub mod history_repository;

pub use history_repository::JsonFileHistoryRepository;
