//! Grid layout engine.
//!
//! Maps the variable per-kind row counts of a pass onto one contiguous row
//! space and back. Row 0 is the header row, column 0 the label column; data
//! rows start at 1. Kinds appear in [`RecordKind::all`] order, each occupying
//! `max_counts[kind]` rows. With SOA interleaving, the NS and SOA kinds share
//! a block of `2 * max_counts[NS]` rows alternating NS, SOA.

use crate::blink::blink_policy;
use crate::collection::{CollectedRecords, MaxCounts};
use crate::dns_record::RecordKind;
use crate::history::{DomainHistory, SlotKey};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Block {
        kind: RecordKind,
        start: usize,
        count: usize,
    },
    NsSoaPairs {
        start: usize,
        pairs: usize,
    },
}

impl Segment {
    fn len(&self) -> usize {
        match self {
            Segment::Block { count, .. } => *count,
            Segment::NsSoaPairs { pairs, .. } => pairs * 2,
        }
    }

    fn start(&self) -> usize {
        match self {
            Segment::Block { start, .. } | Segment::NsSoaPairs { start, .. } => *start,
        }
    }
}

/// Row plan of one pass. Cheap to rebuild; holds no per-cell state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPlan {
    segments: Vec<Segment>,
    data_rows: usize,
}

impl RowPlan {
    pub fn new(max_counts: &MaxCounts, interleave_soa: bool) -> Self {
        let mut segments = Vec::with_capacity(RecordKind::all().len());
        let mut next = 1;

        for kind in RecordKind::all() {
            let segment = match kind {
                RecordKind::Ns if interleave_soa => Segment::NsSoaPairs {
                    start: next,
                    pairs: max_counts.get(RecordKind::Ns),
                },
                RecordKind::Soa if interleave_soa => continue,
                _ => Segment::Block {
                    kind: *kind,
                    start: next,
                    count: max_counts.get(*kind),
                },
            };
            next += segment.len();
            segments.push(segment);
        }

        Self {
            segments,
            data_rows: next - 1,
        }
    }

    /// Row plan of a finished pass. Besides the values collected this pass,
    /// rows stay reserved up to the last slot of each kind that still
    /// blinks at `now`, so a value that vanished is shown as a pulsing
    /// `N/A` while the change is recent.
    pub fn for_pass(
        collected: &CollectedRecords,
        histories: &HashMap<String, DomainHistory>,
        now: DateTime<Utc>,
        interleave_soa: bool,
    ) -> Self {
        let mut counts = collected.max_counts().clone();

        for history in collected
            .domains()
            .iter()
            .filter_map(|domain| histories.get(domain))
        {
            for kind in RecordKind::all() {
                let last_alerting = (0..history.tracked_slots(*kind)).rev().find(|slot| {
                    history
                        .log(SlotKey::new(*kind, *slot))
                        .is_some_and(|log| blink_policy(log, now).should_blink)
                });
                if let Some(slot) = last_alerting {
                    counts.observe(*kind, slot + 1);
                }
            }
        }

        Self::new(&counts, interleave_soa)
    }

    /// Number of data rows, excluding the header.
    pub fn data_rows(&self) -> usize {
        self.data_rows
    }

    /// Number of grid rows, including the header.
    pub fn total_rows(&self) -> usize {
        self.data_rows + 1
    }

    /// Number of rows reserved for `kind`.
    pub fn slots(&self, kind: RecordKind) -> usize {
        self.segments
            .iter()
            .map(|segment| match *segment {
                Segment::Block { kind: k, count, .. } if k == kind => count,
                Segment::NsSoaPairs { pairs, .. }
                    if matches!(kind, RecordKind::Ns | RecordKind::Soa) =>
                {
                    pairs
                }
                _ => 0,
            })
            .sum()
    }

    /// Grid row of a slot, or `None` when the slot has no row reserved.
    pub fn row_of(&self, key: SlotKey) -> Option<usize> {
        if key.slot >= self.slots(key.kind) {
            return None;
        }
        self.segments.iter().find_map(|segment| match *segment {
            Segment::Block { kind, start, .. } if kind == key.kind => Some(start + key.slot),
            Segment::NsSoaPairs { start, .. } => match key.kind {
                RecordKind::Ns => Some(start + key.slot * 2),
                RecordKind::Soa => Some(start + key.slot * 2 + 1),
                _ => None,
            },
            _ => None,
        })
    }

    /// Inverse of [`RowPlan::row_of`]. The header row and rows past the end
    /// locate nothing.
    pub fn locate(&self, row: usize) -> Option<SlotKey> {
        if row == 0 || row > self.data_rows {
            return None;
        }
        let segment = self
            .segments
            .iter()
            .find(|segment| row >= segment.start() && row < segment.start() + segment.len())?;
        let offset = row - segment.start();

        Some(match *segment {
            Segment::Block { kind, .. } => SlotKey::new(kind, offset),
            Segment::NsSoaPairs { .. } if offset % 2 == 0 => {
                SlotKey::new(RecordKind::Ns, offset / 2)
            }
            Segment::NsSoaPairs { .. } => SlotKey::new(RecordKind::Soa, offset / 2),
        })
    }

    /// Every data row's slot, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = SlotKey> + '_ {
        (1..=self.data_rows).filter_map(|row| self.locate(row))
    }
}
