//! CSV-based rule table loader
//!
//! Loads a rule table from CSV files in data/rules/

use super::durations::{MinimumDurationBracket, MinimumDurations};
use super::general::GeneralRules;
use super::reasons::{ReasonDefinition, ReasonEntry, ReasonOption};
use crate::error::RuleTableError;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// Default path to the rules directory
pub const DEFAULT_RULES_PATH: &str = "data/rules";

#[derive(Debug, serde::Deserialize)]
struct ReasonRow {
    id: String,
    kind: String,
    text: String,
    translation_key: String,
    value: Option<i32>,
    is_variable: Option<bool>,
}

#[derive(Debug, serde::Deserialize)]
struct OptionRow {
    reason_id: String,
    code: i32,
    text: String,
    translation_key: String,
    value: i32,
}

#[derive(Debug, serde::Deserialize)]
struct GeneralRuleRow {
    rule: String,
    value: String,
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RuleTableError> {
    let file = File::open(path).map_err(|source| RuleTableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result.map_err(|source| RuleTableError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load reasons from reasons.csv and attach options from reason_options.csv
/// Reason order follows the file order
pub fn load_reasons(path: &Path) -> Result<Vec<ReasonEntry>, RuleTableError> {
    let reason_rows: Vec<ReasonRow> = read_rows(&path.join("reasons.csv"))?;
    let option_rows: Vec<OptionRow> = read_rows(&path.join("reason_options.csv"))?;

    let mut reasons: Vec<ReasonEntry> = Vec::with_capacity(reason_rows.len());

    for row in reason_rows {
        if reasons.iter().any(|r| r.id == row.id) {
            return Err(RuleTableError::DuplicateReason(row.id));
        }

        let definition = match row.kind.as_str() {
            "flat" => ReasonDefinition::Flat {
                value: row
                    .value
                    .ok_or_else(|| RuleTableError::MissingReasonValue(row.id.clone()))?,
                is_variable: row.is_variable.unwrap_or(false),
                text: row.text,
                translation_key: row.translation_key,
            },
            "multi_option" => ReasonDefinition::MultiOption {
                text: row.text,
                translation_key: row.translation_key,
                options: Vec::new(),
            },
            other => {
                return Err(RuleTableError::UnknownReasonKind {
                    id: row.id,
                    kind: other.to_string(),
                })
            }
        };

        reasons.push(ReasonEntry { id: row.id, definition });
    }

    for row in option_rows {
        let target = reasons
            .iter_mut()
            .find(|r| r.id == row.reason_id)
            .map(|r| &mut r.definition);

        match target {
            Some(ReasonDefinition::MultiOption { options, .. }) => options.push(ReasonOption {
                code: row.code,
                text: row.text,
                translation_key: row.translation_key,
                value: row.value,
            }),
            _ => return Err(RuleTableError::OrphanOption(row.reason_id)),
        }
    }

    for reason in &reasons {
        if let ReasonDefinition::MultiOption { options, .. } = &reason.definition {
            if options.is_empty() {
                return Err(RuleTableError::EmptyOptions(reason.id.clone()));
            }
        }
    }

    Ok(reasons)
}

/// Load minimum duration brackets from minimum_durations.csv
pub fn load_minimum_durations(path: &Path) -> Result<MinimumDurations, RuleTableError> {
    let brackets: Vec<MinimumDurationBracket> = read_rows(&path.join("minimum_durations.csv"))?;
    MinimumDurations::from_brackets(brackets)
}

/// Load caps and thresholds from general_rules.csv
pub fn load_general_rules(path: &Path) -> Result<GeneralRules, RuleTableError> {
    let rows: Vec<GeneralRuleRow> = read_rows(&path.join("general_rules.csv"))?;
    GeneralRules::from_pairs(rows.iter().map(|r| (r.rule.as_str(), r.value.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::reasons::standard_reasons;

    #[test]
    fn test_load_default_reasons() {
        let reasons = load_reasons(Path::new(DEFAULT_RULES_PATH)).expect("Failed to load reasons");
        assert_eq!(reasons, standard_reasons());
    }

    #[test]
    fn test_load_default_minimum_durations() {
        let durations = load_minimum_durations(Path::new(DEFAULT_RULES_PATH)).unwrap();
        assert_eq!(durations, MinimumDurations::standard());
    }

    #[test]
    fn test_load_default_general_rules() {
        let rules = load_general_rules(Path::new(DEFAULT_RULES_PATH)).unwrap();
        assert_eq!(rules, GeneralRules::default());
    }

    #[test]
    fn test_missing_directory() {
        let result = load_reasons(Path::new("data/does-not-exist"));
        assert!(matches!(result, Err(RuleTableError::Io { .. })));
    }
}
