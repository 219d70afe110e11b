use serde::{Deserialize, Serialize};

pub const RECALL_MAX: u32 = 40;
pub const WIKI_POINTS: u32 = 20;
pub const SEO_MAX: u32 = 25;
pub const PLATFORMS_CAP: u32 = 15;

/// One published scoring result. `total` is the plain sum of the four parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub brand: String,
    pub recall: u32,
    pub wiki: u32,
    pub seo: u32,
    pub platforms: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    pub fn new(brand: String, recall: u32, wiki: u32, seo: u32, platforms: u32) -> Self {
        Self {
            brand,
            recall,
            wiki,
            seo,
            platforms,
            total: recall + wiki + seo + platforms,
        }
    }
}

/// What a finished calculation hands back to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub breakdown: ScoreBreakdown,
    pub logo_url: String,
}
