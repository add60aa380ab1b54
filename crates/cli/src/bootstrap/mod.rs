pub mod config;
pub mod logging;

pub use config::{load_config, log_config};
pub use logging::{init_logging, LogTarget};
