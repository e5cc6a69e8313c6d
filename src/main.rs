use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uptime_cachet::cli::Cli;
use uptime_cachet::{AppConfig, Reconciler};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    let reconciler = Reconciler::from_config(&config, Duration::from_secs(cli.timeout_secs))
        .context("failed to set up HTTP clients")?
        .dry_run(cli.dry_run);

    info!(
        "Syncing {} monitor route(s){}",
        reconciler.route_count(),
        if cli.dry_run { " (dry run)" } else { "" }
    );

    match reconciler.run().await {
        Ok(report) => {
            if !report.is_clean() {
                error!("{} monitor(s) failed to sync", report.failures.len());
            }
            Ok(ExitCode::SUCCESS)
        }
        // Already logged by the reconciler
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,uptime_cachet=info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
