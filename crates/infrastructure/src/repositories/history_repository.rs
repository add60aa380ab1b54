use async_trait::async_trait;
use dnswatch_application::ports::HistoryRepository;
use dnswatch_domain::{DomainError, DomainHistory};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, instrument};

const FILE_SUFFIX: &str = "_history.json";

/// Stores each domain's history as `<directory>/<domain>_history.json`.
///
/// Saves go through a temporary file that is renamed over the target, so a
/// reader sees either the previous or the new history, never a mix.
pub struct JsonFileHistoryRepository {
    directory: PathBuf,
}

impl JsonFileHistoryRepository {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, domain: &str) -> PathBuf {
        self.directory.join(format!("{}{}", file_stem(domain), FILE_SUFFIX))
    }
}

/// Replaces path separators so the file stays inside the directory.
fn file_stem(domain: &str) -> String {
    domain
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

#[async_trait]
impl HistoryRepository for JsonFileHistoryRepository {
    #[instrument(skip(self))]
    async fn load(&self, domain: &str) -> Result<Option<DomainHistory>, DomainError> {
        let path = self.path_for(domain);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored history");
                return Ok(None);
            }
            Err(e) => {
                return Err(DomainError::IoError(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let history = serde_json::from_slice(&bytes).map_err(|e| DomainError::CorruptHistory {
            domain: domain.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Some(history))
    }

    #[instrument(skip(self, history))]
    async fn save(&self, domain: &str, history: &DomainHistory) -> Result<(), DomainError> {
        let save_failed = |reason: String| DomainError::HistorySaveFailed {
            domain: domain.to_string(),
            reason,
        };

        let json = serde_json::to_vec_pretty(history).map_err(|e| save_failed(e.to_string()))?;

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| save_failed(format!("{}: {}", self.directory.display(), e)))?;

        let path = self.path_for(domain);
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| save_failed(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| save_failed(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), bytes = json.len(), "History saved");
        Ok(())
    }
}
