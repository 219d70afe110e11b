//! Best-effort external lookups. Each checker returns a bounded point value
//! and degrades to zero on any failure; the fetch itself sits behind a trait
//! so it can be swapped or stubbed.

use anyhow::Result;
use futures::future::BoxFuture;

pub mod schema;
pub mod wikipedia;

pub use schema::{check_schema_markup, ProxyMarkupFetcher};
pub use wikipedia::{check_wikipedia, WikipediaSearch};

/// Full-text title search (Wikipedia in production).
pub trait TitleSearch: Send + Sync {
    fn search_titles<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<String>>>;
}

/// Fetches the raw markup of a target page.
pub trait MarkupSource: Send + Sync {
    fn fetch_markup<'a>(&'a self, target_url: &'a str) -> BoxFuture<'a, Result<String>>;
}
