use async_trait::async_trait;
use dnswatch_application::ports::DnsQuerier;
use dnswatch_application::services::{GridOptions, MonitorState};
use dnswatch_application::use_cases::{
    CollectRecordsUseCase, GetCellHistoryUseCase, RunCollectionPassUseCase, UpdateHistoryUseCase,
};
use dnswatch_domain::{DnsQuery, DomainError, RecordType};
use dnswatch_infrastructure::repositories::JsonFileHistoryRepository;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

type ZoneKey = (RecordType, String, Option<String>);

/// In-memory stand-in for the resolver. Unknown queries answer nothing,
/// names in `down` fail.
#[derive(Default)]
pub struct FakeZone {
    answers: RwLock<HashMap<ZoneKey, Vec<String>>>,
    down: RwLock<Vec<String>>,
}

impl FakeZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, record_type: RecordType, target: &str, lines: &[&str]) {
        if let Ok(mut answers) = self.answers.write() {
            answers.insert(
                (record_type, target.to_string(), None),
                lines.iter().map(|l| l.to_string()).collect(),
            );
        }
    }

    pub fn answer_at(&self, record_type: RecordType, target: &str, nameserver: &str, lines: &[&str]) {
        if let Ok(mut answers) = self.answers.write() {
            answers.insert(
                (record_type, target.to_string(), Some(nameserver.to_string())),
                lines.iter().map(|l| l.to_string()).collect(),
            );
        }
    }

    /// Every query about `target` fails from now on.
    pub fn take_down(&self, target: &str) {
        if let Ok(mut down) = self.down.write() {
            down.push(target.to_string());
        }
    }

    /// A domain served by `nameservers`, each with its own address, reverse
    /// name and SOA serial. The SOA answers only when asked at the address.
    pub fn delegate(&self, domain: &str, nameservers: &[(&str, &str, u32)]) {
        let names: Vec<&str> = nameservers.iter().map(|(name, _, _)| *name).collect();
        self.answer(RecordType::NS, domain, &names);

        for (name, ip, serial) in nameservers {
            let soa = format!(
                "{domain}. 3600 IN SOA {name} hostmaster.{domain}. {serial} 7200 3600 1209600 300"
            );
            self.answer_at(RecordType::SOA, domain, ip, &[soa.as_str()]);
            self.answer(RecordType::A, name, &[*ip]);
            let ptr = format!("host-{}.example.net.", ip.replace('.', "-"));
            self.answer(RecordType::PTR, ip, &[ptr.as_str()]);
        }
    }
}

#[async_trait]
impl DnsQuerier for FakeZone {
    async fn query(&self, query: &DnsQuery) -> Result<Vec<String>, DomainError> {
        let is_down = self
            .down
            .read()
            .map(|down| down.iter().any(|d| d.as_str() == &*query.target))
            .unwrap_or(false);
        if is_down {
            return Err(DomainError::QueryTimeout);
        }

        let key = (
            query.record_type,
            query.target.to_string(),
            query.nameserver.as_ref().map(|ns| ns.to_string()),
        );
        Ok(self
            .answers
            .read()
            .map(|answers| answers.get(&key).cloned().unwrap_or_default())
            .unwrap_or_default())
    }
}

/// The application wired the way the binary wires it, with histories in
/// `history_dir`.
pub struct Monitor {
    pub state: Arc<MonitorState>,
    pub run_pass: RunCollectionPassUseCase,
    pub cell_history: GetCellHistoryUseCase,
}

impl Monitor {
    pub fn start(zone: Arc<FakeZone>, history_dir: &Path, domains: &[&str]) -> Self {
        let options = GridOptions::default();
        let state = Arc::new(MonitorState::new(options, Duration::from_millis(500)));
        let repository = Arc::new(JsonFileHistoryRepository::new(history_dir));

        let run_pass = RunCollectionPassUseCase::new(
            domains.iter().map(|d| d.to_string()).collect(),
            Arc::new(CollectRecordsUseCase::new(zone, 4)),
            Arc::new(UpdateHistoryUseCase::new(repository)),
            state.clone(),
            options,
        );

        Self {
            cell_history: GetCellHistoryUseCase::new(state.clone()),
            state,
            run_pass,
        }
    }

    /// Text of the cell at `label` row for the `col`th domain.
    pub fn cell_text(&self, label: &str, col: usize) -> Option<String> {
        let snapshot = self.state.snapshot();
        let row = snapshot
            .grid
            .rows()
            .iter()
            .position(|row| row.first().is_some_and(|cell| cell.text == label))?;
        snapshot.grid.cell(row, col).map(|cell| cell.text.clone())
    }

    pub fn row_of(&self, label: &str) -> Option<usize> {
        self.state
            .snapshot()
            .grid
            .rows()
            .iter()
            .position(|row| row.first().is_some_and(|cell| cell.text == label))
    }
}
