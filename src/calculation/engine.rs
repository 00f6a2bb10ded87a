//! Calculation engine: shortening, part-time conversion, and the special rules
//! for small extensions and the overall duration ceiling

use super::input::{CalculationInput, Selections};
use super::part_time::calculate_part_time_duration;
use super::shortening::{calculate_shortening, ShorteningResult};
use crate::rules::RuleTable;
use log::debug;
use serde::{Deserialize, Serialize};

/// Everything the result page needs, including intermediate values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalResult {
    pub original_duration: i32,
    pub full_time_hours: f64,
    pub part_time_hours: f64,
    pub part_time_hours_available: bool,
    pub initial_full_time_months: i32,

    pub shortening_result: ShorteningResult,
    pub official_shortening_months: i32,
    pub cap_was_hit_shortening: bool,

    /// Full-time duration after shortening
    pub new_full_time_duration: i32,
    pub legal_minimum_duration: i32,
    /// Full-time months still to serve after the initial full-time phase
    pub remaining_full_time_equivalent: i32,

    /// Extension caused by part time, 0 when within the grace period
    pub final_extension_months: i32,
    pub final_total_duration: i32,
    pub grace_period_applied: bool,

    /// Total before the grace period exceeded the duration ceiling
    pub extension_cap_was_hit: bool,
    pub max_allowed_total_duration: i32,
    pub grace_period: i32,
}

/// Bar chart stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartStage {
    Nominal,
    AfterShortening,
    Final,
}

impl ChartStage {
    pub fn label(&self) -> &'static str {
        match self {
            ChartStage::Nominal => "Regeldauer",
            ChartStage::AfterShortening => "Nach Verkürzung",
            ChartStage::Final => "Gesamtdauer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub stage: ChartStage,
    pub months: i32,
}

impl FinalResult {
    /// Nominal, post-shortening, and final duration for the bar chart
    pub fn chart_points(&self) -> [ChartPoint; 3] {
        [
            ChartPoint { stage: ChartStage::Nominal, months: self.original_duration },
            ChartPoint { stage: ChartStage::AfterShortening, months: self.new_full_time_duration },
            ChartPoint { stage: ChartStage::Final, months: self.final_total_duration },
        ]
    }

    /// Part-time hours as a fraction of full time (1.0 without part time)
    pub fn part_time_share(&self) -> f64 {
        if self.part_time_hours_available {
            self.part_time_hours / self.full_time_hours
        } else {
            1.0
        }
    }
}

/// Pure calculator over a fixed rule table
#[derive(Debug, Clone)]
pub struct CalculationEngine {
    rules: RuleTable,
}

impl CalculationEngine {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn calculate_shortening(&self, selections: &Selections, original_duration: i32) -> ShorteningResult {
        calculate_shortening(&self.rules, selections, original_duration)
    }

    pub fn calculate_part_time_duration(
        &self,
        full_time_equivalent_months: i32,
        full_time_hours: f64,
        part_time_hours: f64,
    ) -> i32 {
        calculate_part_time_duration(full_time_equivalent_months, full_time_hours, part_time_hours)
    }

    /// Run the whole pipeline for one input
    ///
    /// Inputs are trusted: range checks belong to the caller (see
    /// [`crate::validation`]). Out-of-range values give defined but
    /// meaningless results rather than errors.
    pub fn calculate_final_results(&self, input: &CalculationInput) -> FinalResult {
        let general = &self.rules.general_rules;
        let original_duration = input.original_duration;
        let initial_full_time_months = input.initial_full_time_months;

        let shortening_result = self.calculate_shortening(&input.selections, original_duration);
        let official_shortening_months = shortening_result.total_shortening;

        let new_full_time_duration = original_duration.saturating_sub(official_shortening_months);
        let legal_minimum_duration = self.rules.minimum_duration_for(original_duration);

        let remaining_full_time_equivalent = new_full_time_duration.saturating_sub(initial_full_time_months).max(0);
        let remaining_part_time_duration = self.calculate_part_time_duration(
            remaining_full_time_equivalent,
            input.full_time_hours,
            input.part_time_hours,
        );

        let real_extension_months = remaining_part_time_duration - remaining_full_time_equivalent;
        let real_total_duration = initial_full_time_months.saturating_add(remaining_part_time_duration);

        // Small extensions are disregarded entirely
        let grace_period = general.part_time_grace_period_months;
        let grace_period_applied = real_extension_months > 0 && real_extension_months <= grace_period;
        let (final_extension_months, final_total_duration) = if grace_period_applied {
            (0, initial_full_time_months.saturating_add(remaining_full_time_equivalent))
        } else {
            (real_extension_months, real_total_duration)
        };

        // Tested against the total before the grace period; an absorbed
        // extension never shows the warning
        let max_allowed_total_duration = general.max_total_duration(original_duration);
        let extension_cap_was_hit = real_total_duration > max_allowed_total_duration && final_extension_months != 0;

        debug!(
            "Final result for {} months: shortening={} remaining_fte={} extension={} (real {}) total={} cap_hit={}",
            original_duration,
            official_shortening_months,
            remaining_full_time_equivalent,
            final_extension_months,
            real_extension_months,
            final_total_duration,
            extension_cap_was_hit
        );

        FinalResult {
            original_duration,
            full_time_hours: input.full_time_hours,
            part_time_hours: input.part_time_hours,
            part_time_hours_available: input.has_part_time(),
            initial_full_time_months,
            official_shortening_months,
            cap_was_hit_shortening: shortening_result.cap_was_hit,
            shortening_result,
            new_full_time_duration,
            legal_minimum_duration,
            remaining_full_time_equivalent,
            final_extension_months,
            final_total_duration,
            grace_period_applied,
            extension_cap_was_hit,
            max_allowed_total_duration,
            grace_period,
        }
    }
}

impl Default for CalculationEngine {
    fn default() -> Self {
        Self::new(RuleTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine() -> CalculationEngine {
        CalculationEngine::default()
    }

    #[test]
    fn test_capped_reasons_at_half_time() {
        let input = CalculationInput::new(36, 40.0, 20.0)
            .select("age-select", 12)
            .select("school-finish", 6)
            .select("experience-select", 12);
        let result = engine().calculate_final_results(&input);

        assert_eq!(result.shortening_result.potential_shortening(), 30);
        assert_eq!(result.official_shortening_months, 12);
        assert!(result.cap_was_hit_shortening);
        assert_eq!(result.new_full_time_duration, 24);
        assert_eq!(result.legal_minimum_duration, 18);
        assert_eq!(result.remaining_full_time_equivalent, 24);
        assert_eq!(result.final_extension_months, 24);
        assert_eq!(result.final_total_duration, 48);
        assert_eq!(result.max_allowed_total_duration, 54);
        assert!(!result.extension_cap_was_hit);
        assert!(!result.grace_period_applied);
        assert!(result.part_time_hours_available);
    }

    #[test]
    fn test_grace_period_absorbs_small_extension() {
        // 36 * 40 / 35 = 41.14 -> 41, extension of 5 months
        let input = CalculationInput::new(36, 40.0, 35.0);
        let result = engine().calculate_final_results(&input);

        assert!(result.grace_period_applied);
        assert_eq!(result.final_extension_months, 0);
        assert_eq!(result.final_total_duration, 36);
        assert_eq!(result.grace_period, 6);
        assert!(!result.extension_cap_was_hit);
    }

    #[test]
    fn test_grace_period_after_full_time_phase() {
        // 12 months served, 24 remaining: 24 * 40 / 35 = 27.43 -> 27, extension of 3
        let input = CalculationInput::new(36, 40.0, 35.0).with_initial_full_time_months(12);
        let result = engine().calculate_final_results(&input);

        assert_eq!(result.remaining_full_time_equivalent, 24);
        assert!(result.grace_period_applied);
        assert_eq!(result.final_extension_months, 0);
        assert_eq!(result.final_total_duration, 36);

        // Without the grace period the full-time phase is added to the part-time phase
        let input = CalculationInput::new(36, 40.0, 20.0).with_initial_full_time_months(12);
        let result = engine().calculate_final_results(&input);

        assert_eq!(result.final_extension_months, 24);
        assert_eq!(result.final_total_duration, 60);
    }

    #[test]
    fn test_grace_period_boundary() {
        // 24 * 40 / 32 = 30: extension of exactly 6 is still absorbed
        let result = engine().calculate_final_results(&CalculationInput::new(24, 40.0, 32.0));
        assert_eq!(result.final_extension_months, 0);
        assert_eq!(result.final_total_duration, 24);

        // 24 * 40 / 31.5 = 30.48 -> 30, same
        let result = engine().calculate_final_results(&CalculationInput::new(24, 40.0, 31.5));
        assert_eq!(result.final_extension_months, 0);

        // 24 * 40 / 30 = 32: extension of 8 stays
        let result = engine().calculate_final_results(&CalculationInput::new(24, 40.0, 30.0));
        assert_eq!(result.final_extension_months, 8);
        assert_eq!(result.final_total_duration, 32);
    }

    #[test]
    fn test_grace_period_suppresses_cap_warning() {
        let mut rules = RuleTable::standard();
        rules.general_rules.max_duration_factor = 1.0;
        let engine = CalculationEngine::new(rules);

        // Real total of 41 exceeds the ceiling of 36, but the 5 month
        // extension is absorbed
        let result = engine.calculate_final_results(&CalculationInput::new(36, 40.0, 35.0));

        assert_eq!(result.max_allowed_total_duration, 36);
        assert_eq!(result.final_total_duration, 36);
        assert!(!result.extension_cap_was_hit);
    }

    #[test]
    fn test_extension_cap_uses_real_total() {
        // 12 months full time, then 24 remaining months at half time = 48
        let input = CalculationInput::new(36, 40.0, 20.0).with_initial_full_time_months(12);
        let result = engine().calculate_final_results(&input);

        assert_eq!(result.remaining_full_time_equivalent, 24);
        assert_eq!(result.final_extension_months, 24);
        assert_eq!(result.final_total_duration, 60);
        assert!(result.extension_cap_was_hit);
        // The ceiling is reported, not enforced
        assert!(result.final_total_duration > result.max_allowed_total_duration);
    }

    #[test]
    fn test_no_reasons_selected() {
        let result = engine().calculate_final_results(&CalculationInput::new(36, 40.0, 30.0));

        assert!(result.shortening_result.details.is_empty());
        assert_eq!(result.official_shortening_months, 0);
        assert!(!result.cap_was_hit_shortening);
        assert_eq!(result.new_full_time_duration, 36);
        // 36 * 40 / 30 = 48
        assert_eq!(result.final_total_duration, 48);
    }

    #[test]
    fn test_full_time_only() {
        let input = CalculationInput::new(42, 39.0, 0.0).select("school-finish", "12");
        let result = engine().calculate_final_results(&input);

        assert!(!result.part_time_hours_available);
        assert_eq!(result.new_full_time_duration, 30);
        assert_eq!(result.final_extension_months, 0);
        assert_eq!(result.final_total_duration, 30);
        assert!(!result.grace_period_applied);
    }

    #[test]
    fn test_negative_part_time_hours() {
        // Counts as available, but the conversion leaves the duration unchanged
        let result = engine().calculate_final_results(&CalculationInput::new(36, 40.0, -5.0));

        assert!(result.part_time_hours_available);
        assert_eq!(result.final_extension_months, 0);
        assert_eq!(result.final_total_duration, 36);
        assert_relative_eq!(result.part_time_share(), -0.125);
    }

    #[test]
    fn test_initial_months_beyond_shortened_duration() {
        // Already served more than the shortened duration requires
        let input = CalculationInput::new(36, 40.0, 20.0)
            .select("age-select", 12)
            .with_initial_full_time_months(30);
        let result = engine().calculate_final_results(&input);

        assert_eq!(result.remaining_full_time_equivalent, 0);
        assert_eq!(result.final_extension_months, 0);
        assert_eq!(result.final_total_duration, 30);
    }

    #[test]
    fn test_legal_floor_holds() {
        let engine = engine();
        for original in [24, 36, 42] {
            let input = CalculationInput::new(original, 40.0, 30.0)
                .select("age-select", 12)
                .select("school-finish", 12)
                .select("study-select", 12);
            let result = engine.calculate_final_results(&input);

            assert!(result.new_full_time_duration >= result.legal_minimum_duration);
            assert!(result.official_shortening_months <= 12);
        }
    }

    #[test]
    fn test_deterministic() {
        let input = CalculationInput::new(42, 38.5, 25.5)
            .select("child-care-select", "12")
            .with_initial_full_time_months(6);
        let engine = engine();

        assert_eq!(engine.calculate_final_results(&input), engine.calculate_final_results(&input));
    }

    #[test]
    fn test_chart_points() {
        let input = CalculationInput::new(36, 40.0, 20.0).select("school-finish", 6);
        let result = engine().calculate_final_results(&input);
        let points = result.chart_points();

        assert_eq!(points[0], ChartPoint { stage: ChartStage::Nominal, months: 36 });
        assert_eq!(points[1].months, 30);
        assert_eq!(points[2].months, 60);
        assert_eq!(points[2].stage.label(), "Gesamtdauer");
    }

    #[test]
    fn test_part_time_share() {
        let result = engine().calculate_final_results(&CalculationInput::new(36, 39.0, 29.25));
        assert_relative_eq!(result.part_time_share(), 0.75);

        let result = engine().calculate_final_results(&CalculationInput::new(36, 39.0, 0.0));
        assert_relative_eq!(result.part_time_share(), 1.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = engine().calculate_final_results(&CalculationInput::new(36, 40.0, 20.0));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["finalTotalDuration"], 72);
        assert_eq!(json["shorteningResult"]["totalShortening"], 0);
        assert_eq!(json["extensionCapWasHit"], true);
    }
}
