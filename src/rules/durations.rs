//! Legal minimum training durations by nominal-duration bracket

use crate::error::RuleTableError;
use serde::{Deserialize, Serialize};

/// A single bracket: nominal durations of at least `original` months may not
/// be shortened below `min` months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumDurationBracket {
    pub original: i32,
    pub min: i32,
}

/// Ordered bracket list, strictly descending by threshold and terminated by a
/// `{ original: 0, min: 0 }` catch-all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MinimumDurationBracket>", into = "Vec<MinimumDurationBracket>")]
pub struct MinimumDurations {
    brackets: Vec<MinimumDurationBracket>,
}

impl MinimumDurations {
    /// Brackets for the common 42/36/24 month training programmes
    pub fn standard() -> Self {
        Self {
            brackets: vec![
                MinimumDurationBracket { original: 42, min: 24 },
                MinimumDurationBracket { original: 36, min: 18 },
                MinimumDurationBracket { original: 24, min: 12 },
                MinimumDurationBracket { original: 0, min: 0 },
            ],
        }
    }

    /// Build from loaded brackets, checking order and the trailing catch-all
    pub fn from_brackets(brackets: Vec<MinimumDurationBracket>) -> Result<Self, RuleTableError> {
        let last = brackets.last().ok_or(RuleTableError::EmptyBrackets)?;
        if last.original != 0 {
            return Err(RuleTableError::MissingCatchAll);
        }

        for pair in brackets.windows(2) {
            if pair[0].original <= pair[1].original {
                return Err(RuleTableError::UnorderedBrackets {
                    previous: pair[0].original,
                    next: pair[1].original,
                });
            }
        }

        Ok(Self { brackets })
    }

    /// Minimum duration for a nominal duration: `min` of the first bracket
    /// whose threshold does not exceed it
    pub fn minimum_for(&self, original_duration: i32) -> i32 {
        self.brackets
            .iter()
            .find(|b| b.original <= original_duration)
            .map(|b| b.min)
            .unwrap_or(0)
    }

    /// Nominal durations the table names explicitly (catch-all excluded)
    pub fn nominal_durations(&self) -> Vec<i32> {
        self.brackets
            .iter()
            .filter(|b| b.original > 0)
            .map(|b| b.original)
            .collect()
    }

    pub fn brackets(&self) -> &[MinimumDurationBracket] {
        &self.brackets
    }
}

impl Default for MinimumDurations {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<MinimumDurationBracket>> for MinimumDurations {
    type Error = RuleTableError;

    fn try_from(brackets: Vec<MinimumDurationBracket>) -> Result<Self, Self::Error> {
        Self::from_brackets(brackets)
    }
}

impl From<MinimumDurations> for Vec<MinimumDurationBracket> {
    fn from(durations: MinimumDurations) -> Self {
        durations.brackets
    }
}
