use crate::services::{GridOptions, MonitorSnapshot, MonitorState};
use crate::use_cases::{CollectRecordsUseCase, UpdateHistoryUseCase};
use chrono::Utc;
use dnswatch_domain::{Grid, RowPlan};
use std::sync::Arc;
use tracing::{info, instrument};

/// Use case: collect, record, lay out and publish one full pass.
///
/// History is only touched once every domain has been collected, and the
/// grid is rebuilt from scratch each time.
pub struct RunCollectionPassUseCase {
    domains: Arc<[String]>,
    collect: Arc<CollectRecordsUseCase>,
    update_history: Arc<UpdateHistoryUseCase>,
    state: Arc<MonitorState>,
    options: GridOptions,
}

impl RunCollectionPassUseCase {
    pub fn new(
        domains: Vec<String>,
        collect: Arc<CollectRecordsUseCase>,
        update_history: Arc<UpdateHistoryUseCase>,
        state: Arc<MonitorState>,
        options: GridOptions,
    ) -> Self {
        Self {
            domains: domains.into(),
            collect,
            update_history,
            state,
            options,
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Returns the number of the pass that was published.
    #[instrument(skip(self))]
    pub async fn execute(&self) -> u64 {
        let collected = self.collect.execute(&self.domains).await;

        let now = Utc::now();
        let histories = self.update_history.execute(&collected, now).await;

        let plan = RowPlan::for_pass(&collected, &histories, now, self.options.interleave_soa);
        let grid = Grid::build(
            &collected,
            &histories,
            &plan,
            now,
            self.options.column_width,
        );
        let blinking = grid.blinking_cells().count();

        let pass = self.state.snapshot().pass + 1;
        self.state.publish(MonitorSnapshot {
            grid,
            plan,
            domains: collected.domains().into(),
            histories: Arc::new(histories),
            completed_at: Some(now),
            pass,
        });

        info!(pass, rows = self.state.snapshot().grid.row_count(), blinking, "Grid published");
        pass
    }
}
