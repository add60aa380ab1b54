mod collect_records;

pub use collect_records::CollectRecordsUseCase;
