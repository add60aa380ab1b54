mod get_cell_history;
mod update_history;

pub use get_cell_history::{render_cell_history, CellHistory, GetCellHistoryUseCase};
pub use update_history::UpdateHistoryUseCase;
