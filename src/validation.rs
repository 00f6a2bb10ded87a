//! Input checks applied before the engine runs
//!
//! The engine trusts its input. Every surface that accepts user data (CLI,
//! batch files, Lambda requests) runs these checks first.

use crate::calculation::CalculationInput;
use crate::calculation::SelectionValue;
use crate::error::ValidationError;
use crate::rules::{ReasonDefinition, RuleTable};

pub const MIN_FULL_TIME_HOURS: f64 = 35.0;
pub const MAX_FULL_TIME_HOURS: f64 = 48.0;

/// Part time must be at least this share of full time
pub const MIN_PART_TIME_SHARE: f64 = 0.5;

fn is_half_hour_step(value: f64) -> bool {
    (value * 100.0).round() as i64 % 50 == 0
}

pub fn validate_full_time_hours(hours: f64) -> Result<(), ValidationError> {
    if !(MIN_FULL_TIME_HOURS..=MAX_FULL_TIME_HOURS).contains(&hours) {
        return Err(ValidationError::FullTimeHoursOutOfRange {
            value: hours,
            min: MIN_FULL_TIME_HOURS,
            max: MAX_FULL_TIME_HOURS,
        });
    }
    if !is_half_hour_step(hours) {
        return Err(ValidationError::NotHalfHourStep {
            field: "full-time hours",
            value: hours,
        });
    }
    Ok(())
}

/// 0 means no part time and is always accepted
pub fn validate_part_time_hours(part_time_hours: f64, full_time_hours: f64) -> Result<(), ValidationError> {
    if part_time_hours == 0.0 {
        return Ok(());
    }

    let min = full_time_hours * MIN_PART_TIME_SHARE;
    if !(part_time_hours >= min && part_time_hours < full_time_hours) {
        return Err(ValidationError::PartTimeHoursOutOfRange {
            value: part_time_hours,
            min,
            max: full_time_hours,
        });
    }
    if !is_half_hour_step(part_time_hours) {
        return Err(ValidationError::NotHalfHourStep {
            field: "part-time hours",
            value: part_time_hours,
        });
    }
    Ok(())
}

/// Check an input against the ranges the input form enforces
pub fn validate_input(input: &CalculationInput, rules: &RuleTable) -> Result<(), ValidationError> {
    let allowed = rules.nominal_durations();
    if !allowed.contains(&input.original_duration) {
        return Err(ValidationError::UnsupportedDuration {
            value: input.original_duration,
            allowed,
        });
    }

    validate_full_time_hours(input.full_time_hours)?;
    validate_part_time_hours(input.part_time_hours, input.full_time_hours)?;

    let months = input.initial_full_time_months;
    if months < 0 || months >= input.original_duration {
        return Err(ValidationError::InitialMonthsOutOfRange {
            value: months,
            max: input.original_duration,
        });
    }

    for (id, value) in &input.selections {
        let definition = rules.reason(id).ok_or_else(|| ValidationError::UnknownReason(id.clone()))?;
        validate_selection(id, definition, value)?;
    }

    Ok(())
}

/// Flat reasons accept 0 up to their credit, multi-option reasons only known codes
pub fn validate_selection(
    reason_id: &str,
    definition: &ReasonDefinition,
    value: &SelectionValue,
) -> Result<(), ValidationError> {
    let months = value.months();
    let valid = match definition {
        ReasonDefinition::Flat { value: max, .. } => (0..=*max).contains(&months),
        ReasonDefinition::MultiOption { .. } => definition.option(months).is_some(),
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidSelection {
            reason: reason_id.to_string(),
            value: months,
        })
    }
}
