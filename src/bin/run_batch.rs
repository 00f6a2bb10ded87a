//! Run a CSV file of scenarios and write one result row per scenario
//!
//! Usage: cargo run --bin run_batch -- --input scenarios.csv --output results.csv

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use teilzeit_rechner::scenario::{load_scenarios, write_scenario_rows};
use teilzeit_rechner::ScenarioRunner;

#[derive(Parser, Debug)]
#[command(about = "Evaluate a batch of training duration scenarios")]
struct BatchArgs {
    /// Scenario CSV (id, original_duration, full_time_hours, part_time_hours,
    /// initial_full_time_months, then one column per reason id)
    #[arg(long)]
    input: PathBuf,
    /// Output CSV path
    #[arg(long, default_value = "batch_output.csv")]
    output: PathBuf,
    /// Directory with rule table CSV files (defaults to the built-in table)
    #[arg(long)]
    rules: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = BatchArgs::parse();

    let start = Instant::now();
    let runner = match &args.rules {
        Some(dir) => ScenarioRunner::from_csv_path(dir)
            .with_context(|| format!("failed to load rule table from {}", dir.display()))?,
        None => ScenarioRunner::new(),
    };

    println!("Loading scenarios from {}...", args.input.display());
    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("failed to read scenarios from {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let calc_start = Instant::now();
    let rows = runner.run_scenarios(&scenarios);
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    write_scenario_rows(BufWriter::new(file), &rows)?;
    println!("Output written to {}", args.output.display());

    let skipped = scenarios.len() - rows.len();
    let capped = rows.iter().filter(|r| r.extension_cap_hit).count();
    let absorbed = rows.iter().filter(|r| r.grace_period_applied).count();

    println!("\nBatch Summary:");
    println!("  Evaluated:              {}", rows.len());
    println!("  Skipped (invalid):      {}", skipped);
    println!("  Grace period applied:   {}", absorbed);
    println!("  Over duration ceiling:  {}", capped);
    if let Some(longest) = rows.iter().max_by_key(|r| r.total_duration) {
        println!("  Longest total duration: {} months ({})", longest.total_duration, longest.id);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
