mod app;
mod catalog;
mod config;
mod ctl;
mod display;
mod engine;
mod favorites;
mod format;
mod ipc;
mod scheduler;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zonewatch", version, about = "World-clock widget daemon with persisted favorite cities")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override hour format: 12 | 24
    #[arg(long)]
    hour_format: Option<u8>,

    /// Hide the date line under each city
    #[arg(long)]
    no_date: bool,

    /// Override refresh period in seconds
    #[arg(long)]
    period: Option<u64>,

    /// Override favorites storage path
    #[arg(long)]
    favorites: Option<PathBuf>,

    /// Override IPC socket path
    #[arg(long)]
    socket: Option<PathBuf>,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Control a running zonewatch instance
    Ctl(ctl::CtlArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(CliCommand::Ctl(args)) => ctl::run(args),
        None => run_daemon(cli),
    }
}

fn run_daemon(args: Cli) -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Some(shell) = args.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "zonewatch", &mut std::io::stdout());
        return Ok(());
    }

    let config_path = args.config.unwrap_or_else(config::default_config_path);
    let mut config = config::load_config(&config_path)?;

    // Apply CLI overrides
    if let Some(hour_format) = args.hour_format {
        match hour_format {
            12 | 24 => config.clock.hour_format = hour_format,
            other => anyhow::bail!("Unknown hour format: {} (use 12 or 24)", other),
        }
    }
    if args.no_date {
        config.clock.show_date = false;
    }
    if let Some(period) = args.period {
        anyhow::ensure!(period > 0, "Refresh period must be positive");
        config.refresh.period_secs = period;
    }
    if let Some(path) = args.favorites {
        config.storage.favorites_path = Some(path);
    }

    log::info!(
        "Starting zonewatch with hour_format={}, refresh every {}s",
        config.clock.hour_format,
        config.refresh.period_secs
    );

    app::run(config, config_path, args.socket)
}
