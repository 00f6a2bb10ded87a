//! Official shortening from prior education, experience, and age

use super::input::{SelectionValue, Selections};
use crate::rules::{ReasonDefinition, RuleTable};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// One credited reason as shown in the breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShorteningDetail {
    /// Label from the rule table, used when no translation is available
    pub reason: String,
    pub translation_key: String,
    pub months: i32,
    /// Credit is a discretionary maximum ("up to")
    pub is_variable: bool,
}

/// Shortening after both caps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShorteningResult {
    pub total_shortening: i32,
    /// Selected reasons in rule table order
    pub details: Vec<ShorteningDetail>,
    pub cap_was_hit: bool,
}

impl ShorteningResult {
    /// Sum of the selected credits before any cap
    pub fn potential_shortening(&self) -> i32 {
        self.details.iter().fold(0i32, |acc, d| acc.saturating_add(d.months))
    }
}

/// Sum the selected reasons and cap the result
///
/// The sum is limited first by `max_shortening_from_reasons` and then by the
/// legal minimum duration for `original_duration`. Missing or non-numeric
/// selections count as 0 and are left out of the breakdown.
pub fn calculate_shortening(
    rules: &RuleTable,
    selections: &Selections,
    original_duration: i32,
) -> ShorteningResult {
    let mut details = Vec::new();
    let mut potential_shortening = 0i32;

    for entry in &rules.reasons {
        let selected = selections
            .get(&entry.id)
            .map(SelectionValue::months)
            .unwrap_or(0);

        if selected == 0 {
            continue;
        }

        let detail = match &entry.definition {
            ReasonDefinition::Flat {
                text,
                translation_key,
                is_variable,
                ..
            } => ShorteningDetail {
                reason: text.clone(),
                translation_key: translation_key.clone(),
                months: selected,
                is_variable: *is_variable,
            },
            ReasonDefinition::MultiOption {
                text, translation_key, ..
            } => match entry.definition.option(selected) {
                Some(option) => ShorteningDetail {
                    reason: option.text.clone(),
                    translation_key: option.translation_key.clone(),
                    months: option.value,
                    is_variable: false,
                },
                None => {
                    warn!("Unknown option code {} for reason {}, counting 0 months", selected, entry.id);
                    ShorteningDetail {
                        reason: text.clone(),
                        translation_key: translation_key.clone(),
                        months: 0,
                        is_variable: false,
                    }
                }
            },
        };

        potential_shortening = potential_shortening.saturating_add(detail.months);
        details.push(detail);
    }

    let max_from_reasons = rules.general_rules.max_shortening_from_reasons;
    let after_reason_cap = potential_shortening.min(max_from_reasons);

    let minimum_duration = rules.minimum_duration_for(original_duration);
    let max_allowed_legal = original_duration.saturating_sub(minimum_duration);

    let total_shortening = after_reason_cap.min(max_allowed_legal);

    // Also set when the sum lands exactly on the reason cap, so the notice
    // shows whenever the ceiling is reached
    let cap_was_hit = potential_shortening > total_shortening || total_shortening >= max_from_reasons;

    debug!(
        "Shortening for {} months: potential={} reason_cap={} legal_max={} total={} cap_hit={}",
        original_duration, potential_shortening, max_from_reasons, max_allowed_legal, total_shortening, cap_was_hit
    );

    ShorteningResult {
        total_shortening,
        details,
        cap_was_hit,
    }
}
