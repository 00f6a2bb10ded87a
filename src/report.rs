//! Plain-text result summary for the CLI and exports

use crate::calculation::FinalResult;
use chrono::NaiveDate;
use std::fmt;

/// Printable summary of a calculation, dated for the export
pub struct ResultReport<'a> {
    result: &'a FinalResult,
    generated_on: NaiveDate,
}

impl<'a> ResultReport<'a> {
    pub fn new(result: &'a FinalResult, generated_on: NaiveDate) -> Self {
        Self { result, generated_on }
    }

    /// Report dated today (local time)
    pub fn today(result: &'a FinalResult) -> Self {
        Self::new(result, chrono::Local::now().date_naive())
    }
}

/// Widest bar in the text chart, in characters
const MAX_BAR_WIDTH: usize = 120;

fn months(n: i32) -> String {
    if n == 1 {
        "1 Monat".to_string()
    } else {
        format!("{} Monate", n)
    }
}

impl fmt::Display for ResultReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;

        writeln!(f, "Teilzeitausbildung: Ergebnis vom {}", self.generated_on.format("%d.%m.%Y"))?;
        writeln!(f)?;
        writeln!(f, "{:<30}{}", "Regelausbildungsdauer:", months(r.original_duration))?;

        if r.part_time_hours_available {
            writeln!(
                f,
                "{:<30}{:.1} h / {:.1} h pro Woche ({:.0} %)",
                "Vollzeit / Teilzeit:",
                r.full_time_hours,
                r.part_time_hours,
                r.part_time_share() * 100.0
            )?;
        } else {
            writeln!(f, "{:<30}{:.1} h pro Woche (keine Teilzeit)", "Vollzeit:", r.full_time_hours)?;
        }

        if r.initial_full_time_months > 0 {
            writeln!(f, "{:<30}{}", "Bereits in Vollzeit:", months(r.initial_full_time_months))?;
        }

        writeln!(f)?;
        if r.shortening_result.details.is_empty() {
            writeln!(f, "Keine Verkürzungsgründe angegeben.")?;
        } else {
            writeln!(f, "Verkürzungsgründe:")?;
            for detail in &r.shortening_result.details {
                let prefix = if detail.is_variable { "bis zu " } else { "" };
                writeln!(f, "  - {}: {}{}", detail.reason, prefix, months(detail.months))?;
            }
        }

        writeln!(f, "{:<30}{}", "Anerkannte Verkürzung:", months(r.official_shortening_months))?;
        if r.cap_was_hit_shortening {
            writeln!(
                f,
                "  Hinweis: Höchstgrenze erreicht (gesetzliche Mindestdauer {}).",
                months(r.legal_minimum_duration)
            )?;
        }
        writeln!(f, "{:<30}{}", "Dauer nach Verkürzung:", months(r.new_full_time_duration))?;

        writeln!(f)?;
        writeln!(f, "{:<30}{}", "Verlängerung durch Teilzeit:", months(r.final_extension_months))?;
        if r.grace_period_applied {
            writeln!(
                f,
                "  Hinweis: Verlängerungen bis zur Geringfügigkeitsgrenze ({}) bleiben unberücksichtigt.",
                months(r.grace_period)
            )?;
        }
        writeln!(f, "{:<30}{}", "Gesamtdauer:", months(r.final_total_duration))?;
        if r.extension_cap_was_hit {
            writeln!(
                f,
                "  Hinweis: Die Höchstdauer ({}) wird überschritten.",
                months(r.max_allowed_total_duration)
            )?;
        }

        writeln!(f)?;
        for point in r.chart_points() {
            let width = (point.months.max(0) as usize).min(MAX_BAR_WIDTH);
            writeln!(f, "{:<18}{:>4} {}", point.stage.label(), point.months, "#".repeat(width))?;
        }

        Ok(())
    }
}
