//! Scenario runner for batch calculations
//!
//! Loads the rule table once, then evaluates many inputs against it. Inputs
//! can be read from a CSV file with one scenario per row.

use crate::calculation::{CalculationEngine, CalculationInput, FinalResult, SelectionValue};
use crate::error::{RuleTableError, ScenarioError};
use crate::rules::RuleTable;
use crate::validation::validate_input;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;

/// Columns every scenario file must have; all other columns are reason ids
pub const SCENARIO_COLUMNS: [&str; 5] = [
    "id",
    "original_duration",
    "full_time_hours",
    "part_time_hours",
    "initial_full_time_months",
];

/// One row of a scenario file
#[derive(Debug, Clone, PartialEq)]
pub struct NamedInput {
    pub id: String,
    pub input: CalculationInput,
}

/// Output row for a scenario file
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRow {
    pub id: String,
    pub original_duration: i32,
    pub full_time_hours: f64,
    pub part_time_hours: f64,
    pub initial_full_time_months: i32,
    pub shortening_months: i32,
    pub shortening_cap_hit: bool,
    pub new_full_time_duration: i32,
    pub legal_minimum_duration: i32,
    pub extension_months: i32,
    pub grace_period_applied: bool,
    pub total_duration: i32,
    pub max_allowed_total_duration: i32,
    pub extension_cap_hit: bool,
}

impl ScenarioRow {
    pub fn new(id: &str, result: &FinalResult) -> Self {
        Self {
            id: id.to_string(),
            original_duration: result.original_duration,
            full_time_hours: result.full_time_hours,
            part_time_hours: result.part_time_hours,
            initial_full_time_months: result.initial_full_time_months,
            shortening_months: result.official_shortening_months,
            shortening_cap_hit: result.cap_was_hit_shortening,
            new_full_time_duration: result.new_full_time_duration,
            legal_minimum_duration: result.legal_minimum_duration,
            extension_months: result.final_extension_months,
            grace_period_applied: result.grace_period_applied,
            total_duration: result.final_total_duration,
            max_allowed_total_duration: result.max_allowed_total_duration,
            extension_cap_hit: result.extension_cap_was_hit,
        }
    }
}

/// Pre-loaded runner for batch calculations
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: CalculationEngine,
}

impl ScenarioRunner {
    /// Create runner with the built-in rule table
    pub fn new() -> Self {
        Self::with_rules(RuleTable::standard())
    }

    /// Create runner by loading the rule table from data/rules/
    pub fn from_csv() -> Result<Self, RuleTableError> {
        Ok(Self::with_rules(RuleTable::from_csv()?))
    }

    /// Create runner from a specific rules directory
    pub fn from_csv_path(path: &Path) -> Result<Self, RuleTableError> {
        Ok(Self::with_rules(RuleTable::from_csv_path(path)?))
    }

    pub fn with_rules(rules: RuleTable) -> Self {
        Self {
            engine: CalculationEngine::new(rules),
        }
    }

    pub fn run(&self, input: &CalculationInput) -> FinalResult {
        self.engine.calculate_final_results(input)
    }

    /// Run many inputs in parallel; output order matches input order
    pub fn run_batch(&self, inputs: &[CalculationInput]) -> Vec<FinalResult> {
        inputs
            .par_iter()
            .map(|input| self.engine.calculate_final_results(input))
            .collect()
    }

    /// Validate and run named scenarios, dropping rows that fail validation
    pub fn run_scenarios(&self, scenarios: &[NamedInput]) -> Vec<ScenarioRow> {
        let rows: Vec<ScenarioRow> = scenarios
            .par_iter()
            .filter_map(|scenario| match validate_input(&scenario.input, self.rules()) {
                Ok(()) => Some(ScenarioRow::new(&scenario.id, &self.run(&scenario.input))),
                Err(err) => {
                    warn!("Skipping scenario {}: {}", scenario.id, err);
                    None
                }
            })
            .collect();

        info!("Evaluated {} of {} scenarios", rows.len(), scenarios.len());
        rows
    }

    pub fn engine(&self) -> &CalculationEngine {
        &self.engine
    }

    pub fn rules(&self) -> &RuleTable {
        self.engine.rules()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_field<T: std::str::FromStr>(row: usize, column: &str, value: &str) -> Result<T, ScenarioError> {
    value.trim().parse().map_err(|_| ScenarioError::InvalidNumber {
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Read scenarios from any reader (file, string buffer, request body)
///
/// Empty reason cells are treated as "not selected".
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<NamedInput>, ScenarioError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut index = [0usize; 5];
    for (slot, name) in index.iter_mut().zip(SCENARIO_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(ScenarioError::MissingColumn(name))?;
    }
    let [id_col, duration_col, full_col, part_col, initial_col] = index;

    let reason_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !index.contains(i))
        .map(|(i, h)| (i, h.trim().to_string()))
        .collect();

    let mut scenarios = Vec::new();
    for (n, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row = n + 1;
        let field = |i: usize| record.get(i).unwrap_or("");

        let mut input = CalculationInput::new(
            parse_field(row, SCENARIO_COLUMNS[1], field(duration_col))?,
            parse_field(row, SCENARIO_COLUMNS[2], field(full_col))?,
            parse_field(row, SCENARIO_COLUMNS[3], field(part_col))?,
        )
        .with_initial_full_time_months(parse_field(row, SCENARIO_COLUMNS[4], field(initial_col))?);

        for (i, reason_id) in &reason_columns {
            let value = field(*i).trim();
            if !value.is_empty() {
                input.selections.insert(reason_id.clone(), SelectionValue::from(value));
            }
        }

        scenarios.push(NamedInput {
            id: field(id_col).trim().to_string(),
            input,
        });
    }

    Ok(scenarios)
}

/// Read scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<NamedInput>, ScenarioError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    load_scenarios_from_reader(file)
}

/// Write result rows as CSV with a header line
pub fn write_scenario_rows<W: Write>(writer: W, rows: &[ScenarioRow]) -> Result<(), ScenarioError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
