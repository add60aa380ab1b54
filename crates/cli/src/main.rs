//! # dnswatch
//!
//! Polls DNS records of a list of domains and shows them as a live table
//! that flags recently changed records.

mod bootstrap;
mod di;
mod ui;

use bootstrap::{init_logging, load_config, log_config, LogTarget};
use clap::Parser;
use di::Services;
use dnswatch_domain::CliOverrides;
use dnswatch_infrastructure::system::read_domain_list;
use dnswatch_jobs::{BlinkJob, CollectionJob, JobRunner};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "dnswatch")]
#[command(version)]
#[command(about = "Live DNS change monitor for a list of domains")]
struct Cli {
    /// Configuration file (TOML); defaults to ./dnswatch.toml when present
    #[arg(short, long)]
    config: Option<String>,

    /// Newline-delimited domain list
    #[arg(short, long)]
    domains: Option<String>,

    /// Upstream DNS server, `IP` or `IP:PORT`
    #[arg(long)]
    dns: Option<String>,

    /// Directory holding the `<domain>_history.json` files
    #[arg(long)]
    history_dir: Option<String>,

    /// Seconds between collection passes
    #[arg(short, long)]
    interval: Option<u64>,

    /// Log level filter (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Run a single pass, print the table and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        domains_file: cli.domains.clone(),
        dns_server: cli.dns.clone(),
        history_dir: cli.history_dir.clone(),
        refresh_interval_secs: cli.interval,
        log_level: cli.log_level.clone(),
    };
    let config = load_config(cli.config.as_deref(), overrides)?;

    let target = if cli.once {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    init_logging(&config, target)?;
    log_config(cli.config.as_deref(), &config);

    let domains = read_domain_list(&config.monitor.domains_file).await?;
    let services = Services::new(&config, domains)?;

    if cli.once {
        services.run_pass.execute().await;
        print!("{}", ui::plain::render_table(&services.state.snapshot().grid));
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    JobRunner::new()
        .with_collection(
            CollectionJob::new(services.run_pass.clone(), services.state.clone())
                .with_interval(config.monitor.refresh_interval_secs)
                .with_cancellation(shutdown.clone()),
        )
        .with_blink(
            BlinkJob::new(services.refresh_blinks.clone())
                .with_interval_ms(config.monitor.blink_interval_ms)
                .with_cancellation(shutdown.clone()),
        )
        .start()
        .await;

    let state = services.state.clone();
    let cell_history = services.cell_history.clone();
    let result = tokio::task::spawn_blocking(move || ui::run(state, cell_history)).await?;

    shutdown.cancel();
    info!("dnswatch stopped");
    result
}
