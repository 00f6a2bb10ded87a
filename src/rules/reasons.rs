//! Shortening reasons and their credit values

use serde::{Deserialize, Serialize};

/// One selectable option of a multi-option reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonOption {
    pub code: i32,
    pub text: String,
    pub translation_key: String,
    pub value: i32,
}

/// Definition of a shortening reason
///
/// Reasons differ only in shape: most grant a flat credit, the school
/// completion reason offers a fixed set of options keyed by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReasonDefinition {
    Flat {
        text: String,
        translation_key: String,
        /// Maximum credit in months
        value: i32,
        /// Credit is discretionary ("up to N months") rather than guaranteed
        is_variable: bool,
    },
    MultiOption {
        /// Generic label, also used when a selected code has no option
        text: String,
        translation_key: String,
        options: Vec<ReasonOption>,
    },
}

impl ReasonDefinition {
    pub fn text(&self) -> &str {
        match self {
            ReasonDefinition::Flat { text, .. } | ReasonDefinition::MultiOption { text, .. } => text,
        }
    }

    pub fn is_variable(&self) -> bool {
        match self {
            ReasonDefinition::Flat { is_variable, .. } => *is_variable,
            ReasonDefinition::MultiOption { .. } => false,
        }
    }

    /// Largest credit this reason can contribute on its own
    pub fn max_value(&self) -> i32 {
        match self {
            ReasonDefinition::Flat { value, .. } => *value,
            ReasonDefinition::MultiOption { options, .. } => {
                options.iter().map(|o| o.value).max().unwrap_or(0)
            }
        }
    }

    /// Look up the option selected by `code`; flat reasons have none
    pub fn option(&self, code: i32) -> Option<&ReasonOption> {
        match self {
            ReasonDefinition::Flat { .. } => None,
            ReasonDefinition::MultiOption { options, .. } => options.iter().find(|o| o.code == code),
        }
    }
}

/// A reason together with the identifier the input form uses for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonEntry {
    pub id: String,
    #[serde(flatten)]
    pub definition: ReasonDefinition,
}

impl ReasonEntry {
    pub fn flat(id: &str, text: &str, translation_key: &str, value: i32, is_variable: bool) -> Self {
        Self {
            id: id.to_string(),
            definition: ReasonDefinition::Flat {
                text: text.to_string(),
                translation_key: translation_key.to_string(),
                value,
                is_variable,
            },
        }
    }

    pub fn multi_option(id: &str, text: &str, translation_key: &str, options: &[(i32, &str, &str)]) -> Self {
        let options = options
            .iter()
            .map(|&(code, text, key)| ReasonOption {
                code,
                text: text.to_string(),
                translation_key: key.to_string(),
                value: code,
            })
            .collect();

        Self {
            id: id.to_string(),
            definition: ReasonDefinition::MultiOption {
                text: text.to_string(),
                translation_key: translation_key.to_string(),
                options,
            },
        }
    }
}

/// Default reasons in display order
pub fn standard_reasons() -> Vec<ReasonEntry> {
    vec![
        ReasonEntry::flat("age-select", "Alter über 21 Jahre", "reason_age_over21", 12, false),
        ReasonEntry::multi_option(
            "school-finish",
            "Schulabschluss",
            "reason_school",
            &[
                (0, "Kein/Hauptschulabschluss", "reason_school_none"),
                (6, "Mittlere Reife / Realschulabschluss", "reason_school_mid"),
                (12, "Fachhochschulreife / Abitur", "reason_school_high"),
            ],
        ),
        ReasonEntry::flat("experience-select", "Erste Berufserfahrung / EQ", "reason_experience_eq", 12, true),
        ReasonEntry::flat("apprenticeship-select", "Abgeschlossene Berufsausbildung", "reason_apprenticeship", 12, false),
        ReasonEntry::flat("study-select", "Passende Studienleistungen", "reason_study", 12, true),
        ReasonEntry::flat("child-care-select", "Betreuung eigener Kinder", "reason_childcare", 12, true),
        ReasonEntry::flat("family-care-select", "Pflege naher Angehöriger", "reason_familycare", 12, true),
    ]
}
