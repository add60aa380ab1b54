//! Alert scheduling: maps how recently and how often a slot changed to a
//! pulse rate. Pure functions of a history log and the current time.

use crate::history::HistoryLog;
use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// A change newer than this pulses slowly.
pub const RECENT_CHANGE_WINDOW_SECS: i64 = 60 * 60;

/// More than one entry inside this window pulses fast.
pub const CHURN_WINDOW_SECS: i64 = 24 * 60 * 60;

pub const SLOW_PULSE: Duration = Duration::from_secs(1);
pub const FAST_PULSE: Duration = Duration::from_millis(500);

/// Blink directive for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    pub should_blink: bool,
    pub rate: Duration,
}

impl Blink {
    pub const NONE: Blink = Blink {
        should_blink: false,
        rate: Duration::ZERO,
    };

    /// Whether the cell shows its highlight color `elapsed` after the blink
    /// clock started. Each half-period lasts `rate`.
    pub fn is_highlighted(&self, elapsed: Duration) -> bool {
        if !self.should_blink || self.rate.is_zero() {
            return false;
        }
        (elapsed.as_millis() / self.rate.as_millis()) % 2 == 1
    }
}

impl Default for Blink {
    fn default() -> Self {
        Blink::NONE
    }
}

/// Derives the blink directive of a slot from its history.
///
/// - fewer than two entries: no blink
/// - newest entry within the last hour: blink at [`SLOW_PULSE`]
/// - otherwise more than one entry within the last day: blink at [`FAST_PULSE`]
/// - otherwise: no blink
pub fn blink_policy(log: &HistoryLog, now: DateTime<Utc>) -> Blink {
    if log.len() < 2 {
        return Blink::NONE;
    }

    let Some(last) = log.latest() else {
        return Blink::NONE;
    };

    let hour_ago = now - TimeDelta::seconds(RECENT_CHANGE_WINDOW_SECS);
    let day_ago = now - TimeDelta::seconds(CHURN_WINDOW_SECS);

    let recent = last.timestamp > hour_ago;
    let changes_in_day = log
        .entries()
        .iter()
        .filter(|entry| entry.timestamp > day_ago)
        .count();

    let rate = if recent {
        SLOW_PULSE
    } else if changes_in_day > 1 {
        FAST_PULSE
    } else {
        Duration::ZERO
    };

    Blink {
        should_blink: recent || changes_in_day > 1,
        rate,
    }
}
