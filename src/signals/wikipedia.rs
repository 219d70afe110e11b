use anyhow::{Context, Result};
use futures::{future::BoxFuture, FutureExt};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::{config::SignalConfig, domain::types::WIKI_POINTS};

use super::TitleSearch;

pub struct WikipediaSearch {
    client: Client,
    config: SignalConfig,
}

impl WikipediaSearch {
    pub fn new(client: Client, config: SignalConfig) -> Self {
        Self { client, config }
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.config.wikipedia_api_url,
            &[
                ("action", "query"),
                ("list", "search"),
                ("format", "json"),
                ("origin", "*"),
                ("srsearch", query),
            ],
        )
        .with_context(|| format!("invalid Wikipedia API url {}", self.config.wikipedia_api_url))
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let url = self.search_url(query)?;
        let body = self
            .client
            .get(url.clone())
            .timeout(self.config.fetch_timeout)
            .send()
            .await
            .with_context(|| format!("failed to query {}", url))?
            .error_for_status()?
            .text()
            .await?;
        parse_search_titles(&body)
    }
}

impl TitleSearch for WikipediaSearch {
    fn search_titles<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<String>>> {
        self.search(query).boxed()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

pub(crate) fn parse_search_titles(body: &str) -> Result<Vec<String>> {
    let response: SearchResponse =
        serde_json::from_str(body).context("unexpected Wikipedia search response")?;
    Ok(response.query.search.into_iter().map(|hit| hit.title).collect())
}

/// 20 points when any search title and the brand contain one another
/// (case-insensitive), otherwise 0. Failures count as no match.
pub async fn check_wikipedia(search: &dyn TitleSearch, brand: &str) -> u32 {
    if brand.is_empty() {
        return 0;
    }

    let titles = match search.search_titles(brand).await {
        Ok(titles) => titles,
        Err(err) => {
            warn!(target: "signals", error = %err, brand, "Wikipedia lookup failed");
            return 0;
        }
    };

    let brand = brand.to_lowercase();
    let matched = titles.iter().any(|title| {
        let title = title.to_lowercase();
        title.contains(&brand) || brand.contains(&title)
    });

    if matched {
        WIKI_POINTS
    } else {
        0
    }
}
