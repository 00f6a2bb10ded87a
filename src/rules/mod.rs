//! Rule table: shortening reasons, legal minimum durations, and general caps

mod durations;
mod general;
mod reasons;
pub mod loader;

pub use durations::{MinimumDurationBracket, MinimumDurations};
pub use general::GeneralRules;
pub use reasons::{standard_reasons, ReasonDefinition, ReasonEntry, ReasonOption};

use crate::error::RuleTableError;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable configuration consumed by every calculation
///
/// Loaded once and shared read-only; calculations never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Reasons in display order
    pub reasons: Vec<ReasonEntry>,
    pub minimum_durations: MinimumDurations,
    pub general_rules: GeneralRules,
}

impl RuleTable {
    /// Built-in table matching the shipped data/rules files
    pub fn standard() -> Self {
        Self {
            reasons: standard_reasons(),
            minimum_durations: MinimumDurations::standard(),
            general_rules: GeneralRules::default(),
        }
    }

    /// Load the rule table from CSV files in the default location (data/rules/)
    pub fn from_csv() -> Result<Self, RuleTableError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RULES_PATH))
    }

    /// Load the rule table from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, RuleTableError> {
        let table = Self {
            reasons: loader::load_reasons(path)?,
            minimum_durations: loader::load_minimum_durations(path)?,
            general_rules: loader::load_general_rules(path)?,
        };

        info!(
            "Loaded rule table from {}: {} reasons, {} duration brackets",
            path.display(),
            table.reasons.len(),
            table.minimum_durations.brackets().len()
        );

        Ok(table)
    }

    pub fn reason(&self, id: &str) -> Option<&ReasonDefinition> {
        self.reasons.iter().find(|r| r.id == id).map(|r| &r.definition)
    }

    /// Legal minimum duration for a nominal duration
    pub fn minimum_duration_for(&self, original_duration: i32) -> i32 {
        self.minimum_durations.minimum_for(original_duration)
    }

    /// Nominal durations the input form may offer
    pub fn nominal_durations(&self) -> Vec<i32> {
        self.minimum_durations.nominal_durations()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}
