//! `switchstat` generates the statistics of a simulated switch.
//!
//! Usage:
//!   switchstat stats.txt --total-ports 24 --loop 1 --runtime 600
//!   switchstat stats.txt --vlan -1 --unicast -1 --seed 42

use std::{
    fs::File,
    io::{BufWriter, IsTerminal as _},
};

use anyhow::Context as _;
use clap::Parser as _;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use switchstat_core::{report, Simulation};

mod cli;

use cli::Command;

const PROGRESS_TEMPLATE: &str = "{elapsed_precise} [{bar:40}] {pos}/{len} seconds";

fn main() -> anyhow::Result<()> {
    let cmd = Command::parse();

    let no_color =
        std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(!no_color)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "switchstat starting");

    let seed = cmd.seed.unwrap_or_else(rand::random);
    info!(seed, "random generator seeded");

    let mut simulation = Simulation::new(&cmd.config(), seed);
    let scenario = simulation.scenario();
    let topology = simulation.topology();
    info!(
        ports = scenario.total_ports,
        uplink1 = %topology.uplink1(),
        uplink2 = %topology.uplink2(),
        vlan = scenario.vlan,
        runtime = scenario.runtime,
        "switch ready"
    );

    let progress = progress_bar(scenario.runtime, cmd.no_progress)?;
    simulation.run_with(|_| progress.inc(1));
    progress.finish_and_clear();
    debug!(ticks = %simulation.tick(), "run completed");

    let file = File::create(&cmd.out_file)
        .with_context(|| format!("cannot create {}", cmd.out_file.display()))?;
    report::write_report(BufWriter::new(file), simulation.interfaces())
        .with_context(|| format!("cannot write the report to {}", cmd.out_file.display()))?;

    info!(
        out_file = %cmd.out_file.display(),
        interfaces = simulation.interfaces().len(),
        "report written"
    );

    Ok(())
}

/// The progress bar is drawn on stderr, and only when it is a terminal.
fn progress_bar(runtime: u64, disabled: bool) -> anyhow::Result<ProgressBar> {
    if disabled || !std::io::stderr().is_terminal() {
        return Ok(ProgressBar::hidden());
    }

    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .context("invalid progress bar template")?
        .progress_chars("=> ");
    Ok(ProgressBar::new(runtime).with_style(style))
}
