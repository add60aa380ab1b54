pub mod collection;
pub mod history;
pub mod monitor;

// Re-export use cases
pub use collection::CollectRecordsUseCase;
pub use history::{render_cell_history, CellHistory, GetCellHistoryUseCase, UpdateHistoryUseCase};
pub use monitor::{RefreshBlinksUseCase, RunCollectionPassUseCase};
