use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "uptime-cachet")]
#[command(version)]
#[command(about = "Send UptimeRobot status and response times to Cachet", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(default_value = "config.toml", env = "UPTIME_CACHET_CONFIG")]
    pub config: PathBuf,

    /// Read everything, log the writes that would happen, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
