//! Numeric limits that apply to every calculation

use crate::error::RuleTableError;
use serde::{Deserialize, Serialize};

/// Caps and thresholds shared by all reasons and durations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneralRules {
    /// Ceiling on the summed credit from all shortening reasons (months)
    pub max_shortening_from_reasons: i32,

    /// Total duration may not exceed this multiple of the nominal duration
    pub max_duration_factor: f64,

    /// Part-time extensions up to this many months are disregarded
    pub part_time_grace_period_months: i32,
}

impl Default for GeneralRules {
    fn default() -> Self {
        Self {
            max_shortening_from_reasons: 12,
            max_duration_factor: 1.5,
            part_time_grace_period_months: 6,
        }
    }
}

impl GeneralRules {
    pub const MAX_SHORTENING: &'static str = "max_shortening_from_reasons";
    pub const MAX_DURATION_FACTOR: &'static str = "max_duration_factor";
    pub const GRACE_PERIOD: &'static str = "part_time_grace_period_months";

    /// Absolute ceiling on total duration, rounded up to whole months
    pub fn max_total_duration(&self, original_duration: i32) -> i32 {
        (f64::from(original_duration) * self.max_duration_factor).ceil() as i32
    }

    /// Build from `(rule, value)` pairs; every rule must appear exactly once
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, RuleTableError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut max_shortening = None;
        let mut factor = None;
        let mut grace = None;

        for (rule, value) in pairs {
            let invalid = || RuleTableError::InvalidGeneralRule {
                rule: rule.to_string(),
                value: value.to_string(),
            };
            let value = value.trim();

            let duplicate = || RuleTableError::DuplicateGeneralRule(rule.trim().to_string());

            match rule.trim() {
                Self::MAX_SHORTENING => {
                    let parsed = value.parse::<i32>().map_err(|_| invalid())?;
                    if max_shortening.replace(parsed).is_some() {
                        return Err(duplicate());
                    }
                }
                Self::MAX_DURATION_FACTOR => {
                    let parsed = value.parse::<f64>().map_err(|_| invalid())?;
                    if factor.replace(parsed).is_some() {
                        return Err(duplicate());
                    }
                }
                Self::GRACE_PERIOD => {
                    let parsed = value.parse::<i32>().map_err(|_| invalid())?;
                    if grace.replace(parsed).is_some() {
                        return Err(duplicate());
                    }
                }
                other => return Err(RuleTableError::UnknownGeneralRule(other.to_string())),
            }
        }

        Ok(Self {
            max_shortening_from_reasons: max_shortening
                .ok_or(RuleTableError::MissingGeneralRule(Self::MAX_SHORTENING))?,
            max_duration_factor: factor.ok_or(RuleTableError::MissingGeneralRule(Self::MAX_DURATION_FACTOR))?,
            part_time_grace_period_months: grace.ok_or(RuleTableError::MissingGeneralRule(Self::GRACE_PERIOD))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_total_duration() {
        let rules = GeneralRules::default();

        assert_eq!(rules.max_total_duration(36), 54);
        assert_eq!(rules.max_total_duration(42), 63);
        // 1.5 * 25 = 37.5 rounds up
        assert_eq!(rules.max_total_duration(25), 38);
    }

    #[test]
    fn test_from_pairs() {
        let rules = GeneralRules::from_pairs(vec![
            ("max_shortening_from_reasons", "12"),
            ("max_duration_factor", "1.5"),
            ("part_time_grace_period_months", " 6 "),
        ])
        .unwrap();

        assert_eq!(rules, GeneralRules::default());
    }

    #[test]
    fn test_from_pairs_missing_rule() {
        let result = GeneralRules::from_pairs(vec![
            ("max_shortening_from_reasons", "12"),
            ("max_duration_factor", "1.5"),
        ]);
        assert!(matches!(
            result,
            Err(RuleTableError::MissingGeneralRule("part_time_grace_period_months"))
        ));
    }

    #[test]
    fn test_from_pairs_duplicate_rule() {
        let result = GeneralRules::from_pairs(vec![
            ("max_shortening_from_reasons", "12"),
            ("max_duration_factor", "1.5"),
            ("part_time_grace_period_months", "6"),
            ("max_shortening_from_reasons", "18"),
        ]);
        assert!(matches!(
            result,
            Err(RuleTableError::DuplicateGeneralRule(ref rule)) if rule == "max_shortening_from_reasons"
        ));
    }

    #[test]
    fn test_from_pairs_bad_value() {
        let result = GeneralRules::from_pairs(vec![("max_duration_factor", "anderthalb")]);
        assert!(matches!(result, Err(RuleTableError::InvalidGeneralRule { .. })));
    }

    #[test]
    fn test_from_pairs_unknown_rule() {
        let result = GeneralRules::from_pairs(vec![("max_extension", "6")]);
        assert!(matches!(result, Err(RuleTableError::UnknownGeneralRule(name)) if name == "max_extension"));
    }
}
