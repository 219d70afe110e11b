use anyhow::{Context, Result};
use futures::{future::BoxFuture, FutureExt};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::SignalConfig;

use super::MarkupSource;

pub const SCHEMA_POINTS: u32 = 5;
const SCHEMA_MARKER: &str = "schema.org";

/// Fetches page markup through a public CORS proxy (`<proxy>/<target>`).
/// The proxy has no availability guarantees.
pub struct ProxyMarkupFetcher {
    client: Client,
    config: SignalConfig,
}

impl ProxyMarkupFetcher {
    pub fn new(client: Client, config: SignalConfig) -> Self {
        Self { client, config }
    }

    fn proxied_url(&self, target_url: &str) -> String {
        format!(
            "{}/{}",
            self.config.schema_proxy_url.trim_end_matches('/'),
            target_url
        )
    }

    async fn fetch(&self, target_url: &str) -> Result<String> {
        let proxied = self.proxied_url(target_url);
        let response = self
            .client
            .get(&proxied)
            .timeout(self.config.fetch_timeout)
            .send()
            .await
            .with_context(|| format!("failed to fetch {}", proxied))?;

        // Error pages are scanned too; only transport failures count as failures.
        let status = response.status();
        if !status.is_success() {
            debug!(target: "signals", %status, url = target_url, "proxy answered non-2xx");
        }
        Ok(response.text().await?)
    }
}

impl MarkupSource for ProxyMarkupFetcher {
    fn fetch_markup<'a>(&'a self, target_url: &'a str) -> BoxFuture<'a, Result<String>> {
        self.fetch(target_url).boxed()
    }
}

/// 5 points when the page markup mentions `schema.org`, otherwise 0.
pub async fn check_schema_markup(source: &dyn MarkupSource, target_url: &str) -> u32 {
    match source.fetch_markup(target_url).await {
        Ok(body) if body.contains(SCHEMA_MARKER) => SCHEMA_POINTS,
        Ok(_) => 0,
        Err(err) => {
            warn!(target: "signals", error = %err, url = target_url, "schema markup check failed");
            0
        }
    }
}
