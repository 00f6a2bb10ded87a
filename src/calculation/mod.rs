//! Duration calculation for part-time training

mod engine;
mod input;
mod part_time;
mod shortening;

pub use engine::{CalculationEngine, ChartPoint, ChartStage, FinalResult};
pub use input::{CalculationInput, SelectionValue, Selections};
pub use part_time::calculate_part_time_duration;
pub use shortening::{calculate_shortening, ShorteningDetail, ShorteningResult};
