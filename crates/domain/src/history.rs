//! Versioned record history.
//!
//! History is tracked per slot: one append-only log per
//! (domain, record kind, slot index). A slot is the Nth value of a kind for a
//! domain in the current collection pass.

use crate::dns_record::RecordKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder for a slot that has no value this pass.
pub const NOT_AVAILABLE: &str = "N/A";

/// One observed value of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub value: String,
}

impl HistoryEntry {
    pub fn new(timestamp: DateTime<Utc>, value: impl Into<String>) -> Self {
        Self {
            timestamp,
            value: value.into(),
        }
    }
}

/// Append-only log of a single slot, oldest first.
///
/// Consecutive entries never hold the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Change detector for one slot.
    ///
    /// Appends `(now, value)` when the log is empty or when `value` differs
    /// from the newest entry. Returns whether the log grew.
    pub fn observe(&mut self, value: &str, now: DateTime<Utc>) -> bool {
        match self.entries.last() {
            Some(last) if last.value == value => false,
            _ => {
                self.entries.push(HistoryEntry::new(now, value));
                true
            }
        }
    }
}

impl From<Vec<HistoryEntry>> for HistoryLog {
    /// Builds a log from persisted entries, dropping consecutive duplicates.
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut log = HistoryLog::new();
        for entry in entries {
            if log.latest().map(|l| l.value != entry.value).unwrap_or(true) {
                log.entries.push(entry);
            }
        }
        log
    }
}

impl From<HistoryLog> for Vec<HistoryEntry> {
    fn from(log: HistoryLog) -> Self {
        log.entries
    }
}

/// Identifies one tracked slot of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub kind: RecordKind,
    pub slot: usize,
}

impl SlotKey {
    pub fn new(kind: RecordKind, slot: usize) -> Self {
        Self { kind, slot }
    }
}

/// All slot logs of one domain. This is the unit that gets persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainHistory {
    kinds: BTreeMap<RecordKind, BTreeMap<usize, HistoryLog>>,
}

impl DomainHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self, key: SlotKey) -> Option<&HistoryLog> {
        self.kinds.get(&key.kind).and_then(|slots| slots.get(&key.slot))
    }

    /// Number of slots of `kind` that have ever been observed.
    pub fn tracked_slots(&self, kind: RecordKind) -> usize {
        self.kinds
            .get(&kind)
            .and_then(|slots| slots.keys().next_back())
            .map(|last| last + 1)
            .unwrap_or(0)
    }

    pub fn total_entries(&self) -> usize {
        self.kinds
            .values()
            .flat_map(|slots| slots.values())
            .map(HistoryLog::len)
            .sum()
    }

    /// Records one observation; see [`HistoryLog::observe`].
    pub fn record_observation(&mut self, key: SlotKey, value: &str, now: DateTime<Utc>) -> bool {
        self.kinds
            .entry(key.kind)
            .or_default()
            .entry(key.slot)
            .or_default()
            .observe(value, now)
    }

    /// Records the values of one kind for a whole pass.
    ///
    /// Every slot present in `values` is observed. Slots that only exist in
    /// history are observed as [`NOT_AVAILABLE`], so a disappearing value is
    /// itself a change. Returns the number of appended entries.
    pub fn record_pass(&mut self, kind: RecordKind, values: &[String], now: DateTime<Utc>) -> usize {
        let slots = values.len().max(self.tracked_slots(kind));
        let mut appended = 0;
        for slot in 0..slots {
            let value = values.get(slot).map(String::as_str).unwrap_or(NOT_AVAILABLE);
            if self.record_observation(SlotKey::new(kind, slot), value, now) {
                appended += 1;
            }
        }
        appended
    }
}
