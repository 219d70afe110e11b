use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    config::FaviconConfig,
    domain::{
        types::{PLATFORMS_CAP, RECALL_MAX, SEO_MAX},
        ScoreBreakdown, ScoreOutcome,
    },
    signals::{check_schema_markup, check_wikipedia, MarkupSource, TitleSearch},
};

use super::{extract_brand_name, hash_score, logo_url};

const PLATFORMS_BASE_MAX: u32 = 10;

/// Combines the hash-derived parts with the two live signals.
pub struct ScoreCalculator {
    titles: Arc<dyn TitleSearch>,
    markup: Arc<dyn MarkupSource>,
    favicon: FaviconConfig,
}

impl ScoreCalculator {
    pub fn new(
        titles: Arc<dyn TitleSearch>,
        markup: Arc<dyn MarkupSource>,
        favicon: FaviconConfig,
    ) -> Self {
        Self {
            titles,
            markup,
            favicon,
        }
    }

    /// Never fails: each signal degrades to zero on its own.
    pub async fn calculate(&self, url: &str) -> ScoreOutcome {
        let brand = extract_brand_name(url);
        let logo_url = logo_url(url, &self.favicon);

        let recall = hash_score(url, RECALL_MAX, 0);
        let seo = hash_score(&format!("{url}seo"), SEO_MAX, 0);

        // The schema check finishes before the Wikipedia lookup starts.
        let schema = check_schema_markup(self.markup.as_ref(), url).await;
        let platforms_base = hash_score(
            &format!("{url}consistent_platforms"),
            PLATFORMS_BASE_MAX,
            0,
        );
        let platforms = (platforms_base + schema).min(PLATFORMS_CAP);

        let wiki = check_wikipedia(self.titles.as_ref(), &brand).await;
        debug!(target: "score", %brand, recall, seo, schema, platforms_base, wiki, "signals collected");

        let breakdown = ScoreBreakdown::new(brand, recall, wiki, seo, platforms);
        info!(target: "score", brand = %breakdown.brand, total = breakdown.total, "score calculated");

        ScoreOutcome {
            breakdown,
            logo_url,
        }
    }
}
