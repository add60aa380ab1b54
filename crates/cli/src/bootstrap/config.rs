use dnswatch_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logs the effective configuration once logging is up.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        domains_file = %config.monitor.domains_file,
        dns_server = %config.dns.server,
        history_dir = %config.history.directory,
        refresh_interval_secs = config.monitor.refresh_interval_secs,
        "Configuration loaded"
    );
}
