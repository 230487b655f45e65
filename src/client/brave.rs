//! Brave Search web API.

use super::{page_offset, HttpJson, SearchProvider};
use crate::error::SearchApiResult;
use crate::metrics::Metrics;
use crate::models::RawResult;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Default, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BraveItem {
    title: String,
    url: String,
    description: String,
}

impl From<BraveItem> for RawResult {
    fn from(item: BraveItem) -> Self {
        RawResult::new(item.title, item.url, item.description)
    }
}

/// Client for `GET /res/v1/web/search`, authenticated with the
/// `X-Subscription-Token` header.
#[derive(Clone)]
pub struct BraveClient {
    base_url: String,
    api_key: String,
    http: HttpJson,
}

impl BraveClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration, metrics: Metrics) -> Self {
        Self {
            base_url,
            api_key,
            http: HttpJson::new(timeout, metrics),
        }
    }

    /// Create a BraveClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self::new(base_url, api_key, Duration::from_secs(10), Metrics::new())
    }
}

impl SearchProvider for BraveClient {
    fn name(&self) -> &'static str {
        "brave"
    }

    fn search(
        &self,
        query: &str,
        max_results: usize,
        page: usize,
    ) -> SearchApiResult<Vec<RawResult>> {
        let params = [
            ("q", query.to_string()),
            ("count", max_results.to_string()),
            ("offset", page_offset(max_results, page).to_string()),
        ];
        let headers = [("X-Subscription-Token", self.api_key.as_str())];

        let response: BraveResponse = self.http.get(&self.base_url, &params, &headers)?;

        Ok(response
            .web
            .map(|web| web.results.into_iter().map(RawResult::from).collect())
            .unwrap_or_default())
    }
}
