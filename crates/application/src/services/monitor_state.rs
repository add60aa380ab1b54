use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use dnswatch_domain::{DomainHistory, Grid, MaxCounts, RowPlan};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// How a pass is turned into a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub interleave_soa: bool,
    pub column_width: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            interleave_soa: true,
            column_width: 20,
        }
    }
}

/// Everything the front end reads, as of the last completed pass.
///
/// Domains and histories only change with a pass and are shared between
/// snapshots; a blink tick copies the grid alone.
#[derive(Debug, Clone)]
pub struct MonitorSnapshot {
    pub grid: Grid,
    pub plan: RowPlan,
    pub domains: Arc<[String]>,
    pub histories: Arc<HashMap<String, DomainHistory>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub pass: u64,
}

impl MonitorSnapshot {
    /// Snapshot before the first pass: header-only grid, no domains.
    pub fn empty(options: GridOptions) -> Self {
        Self {
            grid: Grid::default(),
            plan: RowPlan::new(&MaxCounts::new(), options.interleave_soa),
            domains: Arc::from(Vec::new()),
            histories: Arc::new(HashMap::new()),
            completed_at: None,
            pass: 0,
        }
    }
}

/// Shared read side of the monitor.
///
/// Writers swap whole snapshots; readers never block on a running pass.
pub struct MonitorState {
    snapshot: ArcSwap<MonitorSnapshot>,
    blink_ticks: AtomicU64,
    blink_interval: Duration,
    refresh_requested: Notify,
}

impl MonitorState {
    pub fn new(options: GridOptions, blink_interval: Duration) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(MonitorSnapshot::empty(options)),
            blink_ticks: AtomicU64::new(0),
            blink_interval,
            refresh_requested: Notify::new(),
        }
    }

    pub fn snapshot(&self) -> Arc<MonitorSnapshot> {
        self.snapshot.load_full()
    }

    pub fn publish(&self, snapshot: MonitorSnapshot) {
        self.snapshot.store(Arc::new(snapshot));
    }

    /// Replaces the snapshot with `f(current)`, retrying if a pass published
    /// in between.
    pub fn update<F>(&self, f: F)
    where
        F: Fn(&MonitorSnapshot) -> MonitorSnapshot,
    {
        self.snapshot.rcu(|current| Arc::new(f(current)));
    }

    /// Advances the blink clock by one tick and returns the new tick count.
    pub fn advance_blink(&self) -> u64 {
        self.blink_ticks.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Time on the blink clock, used to pick each blinking cell's phase.
    pub fn blink_elapsed(&self) -> Duration {
        let ticks = self.blink_ticks.load(Ordering::Relaxed);
        self.blink_interval
            .saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX))
    }

    pub fn blink_interval(&self) -> Duration {
        self.blink_interval
    }

    /// Asks the collection job to run a pass now.
    pub fn request_refresh(&self) {
        self.refresh_requested.notify_one();
    }

    pub async fn refresh_requested(&self) {
        self.refresh_requested.notified().await;
    }
}
