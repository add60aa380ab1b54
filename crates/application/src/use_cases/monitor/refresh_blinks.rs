use crate::services::MonitorState;
use chrono::Utc;
use std::sync::Arc;
use tracing::trace;

/// Use case: one blink tick.
///
/// Advances the blink clock and re-derives every cell's blink directive,
/// since the recency windows move even when no pass ran. The snapshot is
/// only replaced when a directive actually changed.
pub struct RefreshBlinksUseCase {
    state: Arc<MonitorState>,
}

impl RefreshBlinksUseCase {
    pub fn new(state: Arc<MonitorState>) -> Self {
        Self { state }
    }

    /// Returns the number of cells currently blinking.
    pub fn execute(&self) -> usize {
        let tick = self.state.advance_blink();
        let now = Utc::now();

        let current = self.state.snapshot();
        let mut grid = current.grid.clone();
        grid.refresh_blinks(&current.domains, &current.histories, &current.plan, now);

        if grid != current.grid {
            self.state.update(|latest| {
                let mut next = latest.clone();
                next.grid
                    .refresh_blinks(&next.domains, &next.histories, &next.plan, now);
                next
            });
        }

        let blinking = self.state.snapshot().grid.blinking_cells().count();
        trace!(tick, blinking, "Blink tick");
        blinking
    }
}
