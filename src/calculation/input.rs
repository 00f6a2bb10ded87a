//! Calculation inputs as supplied by the input form

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw value of a reason selection
///
/// Form fields arrive as strings, API callers usually send numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    Number(f64),
    Text(String),
    Empty,
}

impl SelectionValue {
    /// Selected credit (or option code) as whole months
    ///
    /// Text is read as a leading base-10 integer after optional whitespace and
    /// sign ("12", " 6 Monate", "-3"). Numbers are truncated toward zero.
    /// Anything else, including empty or non-numeric text, is 0.
    pub fn months(&self) -> i32 {
        match self {
            SelectionValue::Number(n) if n.is_finite() => n.trunc() as i32,
            SelectionValue::Number(_) | SelectionValue::Empty => 0,
            SelectionValue::Text(s) => parse_leading_int(s).unwrap_or(0),
        }
    }
}

fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    let value = if negative { -magnitude } else { magnitude };

    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

impl From<i32> for SelectionValue {
    fn from(value: i32) -> Self {
        SelectionValue::Number(f64::from(value))
    }
}

impl From<&str> for SelectionValue {
    fn from(value: &str) -> Self {
        SelectionValue::Text(value.to_string())
    }
}

impl From<String> for SelectionValue {
    fn from(value: String) -> Self {
        SelectionValue::Text(value)
    }
}

/// Reason id -> selected value
pub type Selections = BTreeMap<String, SelectionValue>;

/// Snapshot of all form values for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Nominal full-time duration in months
    pub original_duration: i32,

    /// Weekly hours at full time
    pub full_time_hours: f64,

    /// Weekly hours at part time, 0 for no part-time
    #[serde(default)]
    pub part_time_hours: f64,

    /// Months already served at full time before switching to part time
    #[serde(default)]
    pub initial_full_time_months: i32,

    #[serde(default)]
    pub selections: Selections,
}

impl CalculationInput {
    pub fn new(original_duration: i32, full_time_hours: f64, part_time_hours: f64) -> Self {
        Self {
            original_duration,
            full_time_hours,
            part_time_hours,
            initial_full_time_months: 0,
            selections: Selections::new(),
        }
    }

    pub fn with_initial_full_time_months(mut self, months: i32) -> Self {
        self.initial_full_time_months = months;
        self
    }

    /// Add or replace a reason selection
    pub fn select(mut self, reason_id: &str, value: impl Into<SelectionValue>) -> Self {
        self.selections.insert(reason_id.to_string(), value.into());
        self
    }

    /// Part-time hours are set (any non-zero number) and below full time
    ///
    /// Negative hours count as set; validation rejects them before this point.
    pub fn has_part_time(&self) -> bool {
        self.part_time_hours != 0.0 && !self.part_time_hours.is_nan() && self.part_time_hours < self.full_time_hours
    }
}
