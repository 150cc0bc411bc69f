//! RDS Monitor
//!
//! Decodes RDS groups from a text capture (one group of four hex words per
//! line) or from a simulated station, printing the station state as it
//! builds up.

mod monitor;
mod settings;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rds_sim::{group_period, run_station_task, StationCommand, VirtualStation};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monitor::Monitor;
use settings::{OutputMode, Settings};

const DEFAULT_LOG_FILTER: &str = "rds_monitor=info,rds_protocol=info,rds_sim=info";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Group capture to read. If not provided uses stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Decode groups from the configured virtual station instead of input
    #[arg(long)]
    simulate: bool,
    /// Print station state as JSON after each change
    #[arg(long)]
    json: bool,
    /// Print a field annotation for every group
    #[arg(long)]
    annotate: bool,
    /// Stop after this many groups in simulate mode
    #[arg(long)]
    groups: Option<u64>,
    /// Store the effective output options as the new defaults
    #[arg(long)]
    save_settings: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = Settings::load();

    // Logs go to stderr so decoded output on stdout stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                settings
                    .log_filter
                    .as_deref()
                    .unwrap_or(DEFAULT_LOG_FILTER)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if args.json {
        settings.output = OutputMode::Json;
    }
    if args.annotate {
        settings.annotate = true;
    }
    if args.save_settings {
        settings.save().map_err(anyhow::Error::msg)?;
        info!("Saved settings to {:?}", Settings::settings_path());
    }

    let mut monitor = Monitor::new(settings.output, settings.annotate);
    let mut stdout = io::stdout().lock();

    if args.simulate {
        let station = VirtualStation::from_config(settings.station.clone())
            .context("Invalid simulated station in settings")?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("Failed to start runtime")?;
        runtime.block_on(simulate(station, &mut monitor, args.groups, &mut stdout))?;
    } else {
        let input: Box<dyn BufRead> = match &args.input {
            None => Box::new(io::stdin().lock()),
            Some(path) => Box::new(BufReader::new(
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
            )),
        };
        monitor.run_lines(input, &mut stdout)?;
    }

    let stats = monitor.stats();
    info!(
        "Decoded {} groups ({} beyond common fields ignored, {} lines skipped)",
        stats.groups,
        stats.ignored,
        monitor.skipped_lines()
    );
    if settings.output == OutputMode::Text {
        writeln!(stdout, "{}", monitor.report())?;
    }
    Ok(())
}

/// Decode groups from a virtual station running at the RDS group rate
async fn simulate(
    station: VirtualStation,
    monitor: &mut Monitor,
    limit: Option<u64>,
    out: &mut impl Write,
) -> Result<()> {
    let (group_tx, mut group_rx) = mpsc::channel(16);
    let (cmd_tx, cmd_rx) = mpsc::channel(4);

    info!("Simulating {}", station.state_summary());
    let task = tokio::spawn(run_station_task(station, group_tx, cmd_rx, group_period()));

    let mut received = 0u64;
    while limit.map_or(true, |limit| received < limit) {
        let Some(group) = group_rx.recv().await else {
            break;
        };
        monitor.handle_group(&group, out)?;
        received += 1;
    }

    // The task may be waiting on a full group channel
    drop(group_rx);
    let _ = cmd_tx.send(StationCommand::Shutdown).await;
    let station = task.await.context("Station task failed")?;
    info!("Station sent {} groups", station.groups_sent());
    Ok(())
}
