//! Stronghold CLI -- cost and time reports for maxing out a base.
//!
//! Thin presentation layer: loads the catalog, runs the planner, renders
//! the report. All computation lives in `stronghold-core`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stronghold_core::{DEFAULT_DOWNTIME_FACTOR, PlanInput, Planner, Resource, format_duration};
use stronghold_data::load_catalog_dir;

#[derive(Parser)]
#[command(name = "stronghold")]
#[command(about = "Estimate the cost and time to fully upgrade a base", long_about = None)]
struct Cli {
    /// Directory containing catalog.{ron,toml,json}
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Current progression level
    #[arg(long)]
    level: u32,

    /// Number of workers available for parallel upgrades
    #[arg(long)]
    workers: usize,

    /// Downtime factor; values below 1.0 fall back to the default
    #[arg(long, default_value_t = DEFAULT_DOWNTIME_FACTOR)]
    downtime: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_catalog_dir(&cli.data)
        .with_context(|| format!("loading catalog from {}", cli.data.display()))?;
    for warning in &loaded.warnings {
        eprintln!("warning: {warning}");
    }

    let input = PlanInput::new(cli.level, cli.workers, cli.downtime)?;
    if input.downtime_clamped() {
        eprintln!(
            "warning: downtime factor {} is invalid, using {DEFAULT_DOWNTIME_FACTOR}",
            input.requested_downtime()
        );
    }

    let mut planner = Planner::new(&loaded.catalog);
    let plan = planner.plan(&input)?;

    println!("Total cost to max out at level {}:", cli.level);
    for (resource, amount) in plan.totals.nonzero() {
        match resource {
            Resource::GoldOrElixir => println!("  {amount} gold or elixir (your choice)"),
            other => println!("  {amount} {}", other.label()),
        }
    }

    println!("Raw total time: {}", format_duration(plan.raw_total));
    println!(
        "Adjusted total time with {} workers: {}",
        cli.workers,
        format_duration(plan.adjusted_total)
    );

    Ok(())
}
