//! Highwater CLI: prints today's rolling-max signal for SPY.
//!
//! Fetches ten years of daily closes from Yahoo Finance and Nasdaq, checks
//! both series for gaps, computes the 99-day rolling-max signal, and reports
//! whether the two sources agree on recent closes. Takes no arguments.
//!
//! The report goes to stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use highwater_core::{data, SystemClock};
use highwater_runner::{run_pipeline, SignalConfig, SignalReport};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "highwater",
    version,
    about = "Rolling-max trend signal for SPY, cross-checked across two data providers"
)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let config = SignalConfig::default();
    let primary = data::connect(config.primary)
        .with_context(|| format!("failed to set up {} provider", config.primary))?;
    let secondary = data::connect(config.secondary)
        .with_context(|| format!("failed to set up {} provider", config.secondary))?;

    let report = run_pipeline(primary.as_ref(), secondary.as_ref(), &config, &SystemClock)?;
    let summary = SignalReport::from_comparison(&report, &config)
        .context("comparison report has no rows")?;

    print!("{}", summary.render());
    Ok(())
}
