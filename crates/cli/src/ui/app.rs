use super::render;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use dnswatch_application::services::MonitorState;
use dnswatch_application::use_cases::{render_cell_history, GetCellHistoryUseCase};
use ratatui::DefaultTerminal;
use std::io;
use std::sync::Arc;
use tracing::debug;

/// Interactive state: the selected cell and the open detail popup.
pub struct App {
    state: Arc<MonitorState>,
    cell_history: Arc<GetCellHistoryUseCase>,
    /// (row, column) in grid coordinates; never on the header or label.
    selected: (usize, usize),
    popup: Option<Vec<String>>,
    quit: bool,
}

impl App {
    pub fn new(state: Arc<MonitorState>, cell_history: Arc<GetCellHistoryUseCase>) -> Self {
        Self {
            state,
            cell_history,
            selected: (1, 1),
            popup: None,
            quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        let tick = self.state.blink_interval();

        while !self.should_quit() {
            let snapshot = self.state.snapshot();
            let elapsed = self.state.blink_elapsed();
            self.clamp_selection(snapshot.grid.row_count(), snapshot.grid.column_count());

            terminal.draw(|frame| {
                render::draw(frame, &snapshot, elapsed, self.selected(), self.popup())
            })?;

            if event::poll(tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn clamp_selection(&mut self, rows: usize, cols: usize) {
        let (row, col) = self.selected;
        self.selected = (
            row.clamp(1, rows.saturating_sub(1).max(1)),
            col.clamp(1, cols.saturating_sub(1).max(1)),
        );
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if self.popup.is_some() {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.popup = None;
            }
            return;
        }

        let (row, col) = self.selected;
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.selected.0 = row.saturating_sub(1).max(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected.0 = row + 1,
            KeyCode::Left | KeyCode::Char('h') => self.selected.1 = col.saturating_sub(1).max(1),
            KeyCode::Right | KeyCode::Char('l') => self.selected.1 = col + 1,
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('r') => {
                debug!("Refresh requested from keyboard");
                self.state.request_refresh();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }

        let snapshot = self.state.snapshot();
        self.clamp_selection(snapshot.grid.row_count(), snapshot.grid.column_count());
    }

    fn open_detail(&mut self) {
        let (row, col) = self.selected;
        if let Some(cell) = self.cell_history.execute(row, col) {
            self.popup = Some(render_cell_history(&cell, &Local));
        }
    }

    pub fn selected(&self) -> (usize, usize) {
        self.selected
    }

    pub fn popup(&self) -> Option<&[String]> {
        self.popup.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}
