//! Dependency wiring: builds adapters and use cases from the configuration.
use anyhow::anyhow;
use dnswatch_application::services::{GridOptions, MonitorState};
use dnswatch_application::use_cases::{
    CollectRecordsUseCase, GetCellHistoryUseCase, RefreshBlinksUseCase, RunCollectionPassUseCase,
    UpdateHistoryUseCase,
};
use dnswatch_domain::Config;
use dnswatch_infrastructure::dns::HickoryDnsQuerier;
use dnswatch_infrastructure::repositories::JsonFileHistoryRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct Services {
    pub state: Arc<MonitorState>,
    pub run_pass: Arc<RunCollectionPassUseCase>,
    pub refresh_blinks: Arc<RefreshBlinksUseCase>,
    pub cell_history: Arc<GetCellHistoryUseCase>,
}

impl Services {
    pub fn new(config: &Config, domains: Vec<String>) -> anyhow::Result<Self> {
        let upstream = config
            .dns
            .server_addr()
            .ok_or_else(|| anyhow!("Invalid DNS server address: {}", config.dns.server))?;

        let querier = Arc::new(HickoryDnsQuerier::new(
            upstream,
            Duration::from_millis(config.dns.query_timeout_ms),
        ));
        let history_repo = Arc::new(JsonFileHistoryRepository::new(&config.history.directory));

        let options = GridOptions {
            interleave_soa: config.monitor.interleave_soa,
            column_width: config.monitor.column_width,
        };
        let state = Arc::new(MonitorState::new(
            options,
            Duration::from_millis(config.monitor.blink_interval_ms),
        ));

        let run_pass = Arc::new(RunCollectionPassUseCase::new(
            domains,
            Arc::new(CollectRecordsUseCase::new(
                querier,
                config.monitor.max_concurrent_domains,
            )),
            Arc::new(UpdateHistoryUseCase::new(history_repo)),
            state.clone(),
            options,
        ));

        info!(upstream = %upstream, domains = run_pass.domains().len(), "Services wired");

        Ok(Self {
            refresh_blinks: Arc::new(RefreshBlinksUseCase::new(state.clone())),
            cell_history: Arc::new(GetCellHistoryUseCase::new(state.clone())),
            run_pass,
            state,
        })
    }
}
