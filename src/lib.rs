//! Teilzeit-Ausbildungsrechner - duration calculator for part-time vocational training
//!
//! This library provides:
//! - A declarative rule table (shortening reasons, legal minimum durations, caps)
//! - Shortening from prior education, experience, and age
//! - Full-time to part-time duration conversion
//! - The final duration with grace period and extension ceiling applied
//! - Input validation, text reports, and batch evaluation

pub mod error;
pub mod rules;
pub mod calculation;
pub mod validation;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{RuleTableError, ScenarioError, ValidationError};
pub use rules::{RuleTable, ReasonDefinition, MinimumDurations, GeneralRules};
pub use calculation::{CalculationEngine, CalculationInput, FinalResult, ShorteningResult};
pub use report::ResultReport;
pub use scenario::ScenarioRunner;
