use serde::{Deserialize, Serialize};

/// History persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Directory holding one `<domain>_history.json` file per domain
    /// (default: ".")
    #[serde(default = "default_history_dir")]
    pub directory: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            directory: default_history_dir(),
        }
    }
}

fn default_history_dir() -> String {
    ".".to_string()
}
