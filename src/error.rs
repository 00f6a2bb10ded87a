//! Error types for the edges of the crate
//!
//! The calculation engine itself never fails. Errors only arise when loading
//! rule tables, reading batch inputs, or validating user input.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading or checking a rule table
#[derive(Debug, Error)]
pub enum RuleTableError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unknown kind `{kind}` for reason `{id}`")]
    UnknownReasonKind { id: String, kind: String },

    #[error("reason `{0}` has no value")]
    MissingReasonValue(String),

    #[error("reason `{0}` is defined more than once")]
    DuplicateReason(String),

    #[error("option row refers to `{0}`, which is not a multi-option reason")]
    OrphanOption(String),

    #[error("multi-option reason `{0}` has no options")]
    EmptyOptions(String),

    #[error("minimum duration table is empty")]
    EmptyBrackets,

    #[error("minimum duration brackets must be strictly descending ({previous} is followed by {next})")]
    UnorderedBrackets { previous: i32, next: i32 },

    #[error("minimum duration table must end with a catch-all bracket at 0")]
    MissingCatchAll,

    #[error("unknown general rule `{0}`")]
    UnknownGeneralRule(String),

    #[error("general rule `{0}` is set more than once")]
    DuplicateGeneralRule(String),

    #[error("general rule `{0}` is missing")]
    MissingGeneralRule(&'static str),

    #[error("invalid value `{value}` for general rule `{rule}`")]
    InvalidGeneralRule { rule: String, value: String },
}

/// Input rejected before it reaches the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unsupported nominal duration of {value} months (expected one of {allowed:?})")]
    UnsupportedDuration { value: i32, allowed: Vec<i32> },

    #[error("full-time hours must be between {min} and {max}, got {value}")]
    FullTimeHoursOutOfRange { value: f64, min: f64, max: f64 },

    #[error("part-time hours must be at least {min} and below {max}, got {value}")]
    PartTimeHoursOutOfRange { value: f64, min: f64, max: f64 },

    #[error("{field} must be a multiple of 0.5, got {value}")]
    NotHalfHourStep { field: &'static str, value: f64 },

    #[error("months already served at full time must be at least 0 and below {max}, got {value}")]
    InitialMonthsOutOfRange { value: i32, max: i32 },

    #[error("unknown shortening reason `{0}`")]
    UnknownReason(String),

    #[error("{value} is not a valid selection for `{reason}`")]
    InvalidSelection { reason: String, value: i32 },
}

/// Failure while reading or writing batch scenario files
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("malformed scenario CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario file is missing the `{0}` column")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid value `{value}` in column `{column}`")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}
