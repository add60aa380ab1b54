use crate::blink::{blink_policy, Blink};
use crate::collection::CollectedRecords;
use crate::dns_record::DisplayColor;
use crate::history::{DomainHistory, SlotKey, NOT_AVAILABLE};
use crate::layout::RowPlan;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

pub const HEADER_LABEL: &str = "INFORMATION";
pub const HEADER_COLOR: DisplayColor = DisplayColor::Yellow;
pub const HIGHLIGHT_COLOR: DisplayColor = DisplayColor::White;
const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub text: String,
    /// Color restored between pulses.
    pub color: DisplayColor,
    pub blink: Blink,
}

impl GridCell {
    fn plain(text: String, color: DisplayColor) -> Self {
        Self {
            text,
            color,
            blink: Blink::NONE,
        }
    }

    /// Color to paint `elapsed` into the blink clock.
    pub fn color_at(&self, elapsed: std::time::Duration) -> DisplayColor {
        if self.blink.is_highlighted(elapsed) {
            HIGHLIGHT_COLOR
        } else {
            self.color
        }
    }
}

/// Fully assembled table of one pass, row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<GridCell>>,
}

impl Grid {
    /// Builds the grid of a pass: header row, label column, one column per
    /// domain in input order. Every data cell carries the blink directive
    /// of its slot history as of `now`.
    pub fn build(
        collected: &CollectedRecords,
        histories: &HashMap<String, DomainHistory>,
        plan: &RowPlan,
        now: DateTime<Utc>,
        width: usize,
    ) -> Self {
        let domains = collected.domains();
        let mut rows = Vec::with_capacity(plan.total_rows());

        let mut header = Vec::with_capacity(domains.len() + 1);
        header.push(GridCell::plain(HEADER_LABEL.to_string(), HEADER_COLOR));
        header.extend(
            domains
                .iter()
                .map(|domain| GridCell::plain(truncate(domain, width), HEADER_COLOR)),
        );
        rows.push(header);

        for key in plan.rows() {
            let color = key.kind.color();
            let mut row = Vec::with_capacity(domains.len() + 1);
            row.push(GridCell::plain(key.kind.row_label(key.slot), color));

            for domain in domains {
                let value = collected
                    .value(domain, key.kind, key.slot)
                    .unwrap_or(NOT_AVAILABLE);
                let blink = histories
                    .get(domain)
                    .and_then(|history| history.log(key))
                    .map(|log| blink_policy(log, now))
                    .unwrap_or(Blink::NONE);
                row.push(GridCell {
                    text: truncate(value, width),
                    color,
                    blink,
                });
            }
            rows.push(row);
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<GridCell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Coordinates of every cell that currently pulses.
    pub fn blinking_cells(&self) -> impl Iterator<Item = (usize, usize, &GridCell)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.blink.should_blink)
                .map(move |(c, cell)| (r, c, cell))
        })
    }

    /// Re-evaluates every data cell's blink directive against `now`.
    /// The trailing windows move, so a cell can stop pulsing between passes.
    pub fn refresh_blinks(
        &mut self,
        domains: &[String],
        histories: &HashMap<String, DomainHistory>,
        plan: &RowPlan,
        now: DateTime<Utc>,
    ) {
        for (r, row) in self.rows.iter_mut().enumerate().skip(1) {
            let Some(key) = plan.locate(r) else { continue };
            for (c, cell) in row.iter_mut().enumerate().skip(1) {
                cell.blink = domains
                    .get(c - 1)
                    .and_then(|domain| histories.get(domain))
                    .and_then(|history| history.log(key))
                    .map(|log| blink_policy(log, now))
                    .unwrap_or(Blink::NONE);
            }
        }
    }

    /// Slot behind a data cell; `None` for header/label cells.
    pub fn slot_at(plan: &RowPlan, row: usize, col: usize) -> Option<SlotKey> {
        if col == 0 {
            return None;
        }
        plan.locate(row)
    }
}
