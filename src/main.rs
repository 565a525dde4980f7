//! PC Health Monitor
//!
//! Shows static system identification (OS, CPU, GPU, RAM, disk model) and
//! refreshes live CPU, RAM and disk utilization gauges once per interval.
//! - Inventory is read once at startup from sysinfo and OS inventory commands
//! - Live gauges are sampled on a single-threaded timer tick
//! - Runs as a fullscreen terminal UI, or in line mode without a terminal

mod config;
mod hardware;
mod logging;
mod metrics;
mod plain;
mod tui;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::logging::LogTarget;
use crate::metrics::dashboard::Dashboard;
use crate::metrics::sampler::{default_volume_path, SysinfoSampler};

/// PC Health Monitor - system information and live resource gauges
#[derive(Parser)]
#[command(name = "pc-health")]
#[command(version)]
#[command(about = "Show system information and live CPU, RAM and disk usage")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Refresh interval in milliseconds (overrides the config file)
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    /// Path whose volume is sampled for disk usage (overrides the config file)
    #[arg(long, global = true)]
    disk_path: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Open the monitor (default)
    Monitor {
        /// Print status lines instead of opening the terminal UI
        #[arg(long)]
        plain: bool,

        /// Stop after this many refreshes (implies --plain)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        ticks: Option<u64>,
    },

    /// Print system information and exit
    Detect {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Monitor {
            plain: false,
            ticks: None,
        }
    }
}

/// Command-line flags win over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(interval_ms) = cli.interval_ms {
        config.monitor.refresh_interval_ms = interval_ms;
    }
    if let Some(path) = &cli.disk_path {
        config.monitor.disk_path = Some(path.clone());
    }
    config.validate().context("Invalid command-line options")
}

fn run_detect(config: &Config, verbose: u8, json: bool) -> Result<()> {
    logging::init_logging(&config.logging, verbose, &LogTarget::Stderr)?;

    let info = hardware::collect_static_info();
    if json {
        let rendered =
            serde_json::to_string_pretty(&info).context("Failed to serialize system info")?;
        println!("{rendered}");
    } else {
        println!("{}", info.display());
    }
    Ok(())
}

fn run_monitor(config: &Config, verbose: u8, plain: bool, ticks: Option<u64>) -> Result<()> {
    let interactive =
        !plain && ticks.is_none() && io::stdin().is_terminal() && io::stdout().is_terminal();

    let target = if interactive {
        LogTarget::for_tui(&config.logging)?
    } else {
        LogTarget::Stderr
    };
    logging::init_logging(&config.logging, verbose, &target)?;

    // Inventory commands run before the window opens; they may be slow.
    let inventory = hardware::collect_static_info();

    let volume = config
        .monitor
        .disk_path
        .clone()
        .unwrap_or_else(default_volume_path);
    let mut sampler = SysinfoSampler::new(volume);
    tracing::info!(volume = %sampler.volume_path().display(), "sampling disk usage");

    let dashboard = Dashboard::new(inventory, config.thresholds);
    let period = config.monitor.refresh_interval();

    if interactive {
        tui::run_tui(dashboard, &mut sampler, period).context("Could not run terminal UI")
    } else {
        plain::run_line_mode(dashboard, &mut sampler, period, ticks).map(|_| ())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    apply_overrides(&mut config, &cli)?;

    match cli.command.unwrap_or_default() {
        Commands::Monitor { plain, ticks } => run_monitor(&config, cli.verbose, plain, ticks),
        Commands::Detect { json } => run_detect(&config, cli.verbose, json),
    }
}
