pub mod brand;
pub mod calculator;
pub mod hash;

pub use brand::{extract_brand_name, logo_url};
pub use calculator::ScoreCalculator;
pub use hash::hash_score;
