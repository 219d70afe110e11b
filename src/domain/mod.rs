pub mod types;

pub use types::{ScoreBreakdown, ScoreOutcome};
