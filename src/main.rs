//! Teilzeit-Ausbildungsrechner CLI
//!
//! Command-line interface for calculating part-time training durations

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use teilzeit_rechner::calculation::{CalculationInput, SelectionValue};
use teilzeit_rechner::validation::validate_input;
use teilzeit_rechner::{CalculationEngine, ResultReport, RuleTable};

#[derive(Parser, Debug)]
#[command(
    name = "teilzeit_rechner",
    about = "Calculate the duration of a part-time vocational training",
    version
)]
struct Cli {
    /// Directory with rule table CSV files (defaults to the built-in table)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the total duration for one set of inputs
    Calculate(CalculateArgs),
    /// Print the active rule table as JSON
    Rules,
}

#[derive(Args, Debug)]
struct CalculateArgs {
    /// Nominal full-time duration in months
    #[arg(long)]
    duration: i32,
    /// Weekly hours at full time
    #[arg(long)]
    full_time_hours: f64,
    /// Weekly hours at part time (0 for no part time)
    #[arg(long, default_value_t = 0.0)]
    part_time_hours: f64,
    /// Months served at full time before switching to part time
    #[arg(long, default_value_t = 0)]
    full_time_months: i32,
    /// Reason selection as id=value, e.g. --select age-select=12
    #[arg(long = "select", value_parser = parse_selection)]
    selections: Vec<(String, String)>,
    /// Print the full result as JSON instead of a report
    #[arg(long)]
    json: bool,
    /// Report date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

fn parse_selection(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((id, selected)) if !id.trim().is_empty() => Ok((id.trim().to_string(), selected.trim().to_string())),
        _ => Err(format!("expected id=value, got `{}`", value)),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| format!("invalid date `{}`: {}", value, err))
}

fn load_rules(path: Option<&PathBuf>) -> Result<RuleTable> {
    match path {
        Some(dir) => RuleTable::from_csv_path(dir)
            .with_context(|| format!("failed to load rule table from {}", dir.display())),
        None => Ok(RuleTable::standard()),
    }
}

fn calculate(rules: RuleTable, args: CalculateArgs) -> Result<()> {
    let mut input = CalculationInput::new(args.duration, args.full_time_hours, args.part_time_hours)
        .with_initial_full_time_months(args.full_time_months);
    for (id, value) in args.selections {
        input.selections.insert(id, SelectionValue::from(value));
    }

    if let Err(err) = validate_input(&input, &rules) {
        bail!("invalid input: {}", err);
    }

    let engine = CalculationEngine::new(rules);
    let result = engine.calculate_final_results(&input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let report = match args.date {
            Some(date) => ResultReport::new(&result, date),
            None => ResultReport::today(&result),
        };
        print!("{}", report);
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let rules = load_rules(cli.rules.as_ref())?;

    match cli.command {
        Command::Calculate(args) => calculate(rules, args),
        Command::Rules => {
            println!("{}", serde_json::to_string_pretty(&rules)?);
            Ok(())
        }
    }
}
