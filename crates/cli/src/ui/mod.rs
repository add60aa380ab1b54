//! Terminal presentation: the live ratatui table and the plain-text table
//! printed by `--once`.
mod app;
pub mod plain;
mod render;

use app::App;
use dnswatch_application::services::MonitorState;
use dnswatch_application::use_cases::GetCellHistoryUseCase;
use std::sync::Arc;

/// Runs the interactive table until the user quits. Blocking.
pub fn run(state: Arc<MonitorState>, cell_history: Arc<GetCellHistoryUseCase>) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = App::new(state, cell_history).run(&mut terminal);
    ratatui::restore();
    result.map_err(Into::into)
}
