mod controller;
pub mod state;

pub use controller::{CalculateOutcome, ScoreWidget};
pub use state::{Phase, WidgetSnapshot};
