use crate::services::MonitorState;
use chrono::TimeZone;
use dnswatch_domain::{Grid, HistoryEntry, RecordKind};
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

/// RFC 2822 timestamp layout: the RFC 1123 date with a numeric zone
/// offset, the same in every time zone.
const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Full history of one selected cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellHistory {
    pub domain: String,
    pub kind: RecordKind,
    pub slot: usize,
    pub entries: Vec<HistoryEntry>,
}

impl CellHistory {
    /// `<domain> - <label> #<n>`
    pub fn title(&self) -> String {
        format!("{} - {}", self.domain, self.kind.row_label(self.slot))
    }
}

/// Renders the detail view of a cell, one line per entry, timestamps in
/// `tz`.
pub fn render_cell_history<Tz>(cell: &CellHistory, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if cell.entries.is_empty() {
        return vec![format!("No history available for {}", cell.title())];
    }

    let mut lines = Vec::with_capacity(cell.entries.len() + 1);
    lines.push(format!("History for {}:", cell.title()));
    lines.extend(cell.entries.iter().map(|entry| {
        format!(
            "{}: {}",
            entry.timestamp.with_timezone(tz).format(TIMESTAMP_FORMAT),
            entry.value
        )
    }));
    lines
}

/// Use case: inverse lookup from a selected grid cell to its slot history.
///
/// Reads the last published snapshot only; never waits on a running pass.
pub struct GetCellHistoryUseCase {
    state: Arc<MonitorState>,
}

impl GetCellHistoryUseCase {
    pub fn new(state: Arc<MonitorState>) -> Self {
        Self { state }
    }

    /// `None` for header, label and out-of-range cells.
    pub fn execute(&self, row: usize, col: usize) -> Option<CellHistory> {
        let snapshot = self.state.snapshot();
        let key = Grid::slot_at(&snapshot.plan, row, col)?;
        let domain = snapshot.domains.get(col - 1)?;

        let entries = snapshot
            .histories
            .get(domain)
            .and_then(|history| history.log(key))
            .map(|log| log.entries().to_vec())
            .unwrap_or_default();

        debug!(domain = %domain, kind = %key.kind, slot = key.slot, entries = entries.len(), "Cell selected");

        Some(CellHistory {
            domain: domain.clone(),
            kind: key.kind,
            slot: key.slot,
            entries,
        })
    }
}
