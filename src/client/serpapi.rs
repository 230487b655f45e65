//! SerpAPI (Google engine).

use super::{page_offset, HttpJson, SearchProvider};
use crate::error::SearchApiResult;
use crate::metrics::Metrics;
use crate::models::RawResult;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OrganicResult {
    title: String,
    link: String,
    snippet: String,
}

impl From<OrganicResult> for RawResult {
    fn from(item: OrganicResult) -> Self {
        RawResult::new(item.title, item.link, item.snippet)
    }
}

/// Client for `GET /search.json?engine=google`, key passed as `api_key`.
#[derive(Clone)]
pub struct SerpApiClient {
    base_url: String,
    api_key: String,
    http: HttpJson,
}

impl SerpApiClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration, metrics: Metrics) -> Self {
        Self {
            base_url,
            api_key,
            http: HttpJson::new(timeout, metrics),
        }
    }

    /// Create a SerpApiClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self::new(base_url, api_key, Duration::from_secs(10), Metrics::new())
    }
}

impl SearchProvider for SerpApiClient {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    fn search(
        &self,
        query: &str,
        max_results: usize,
        page: usize,
    ) -> SearchApiResult<Vec<RawResult>> {
        let params = [
            ("engine", "google".to_string()),
            ("q", query.to_string()),
            ("num", max_results.to_string()),
            ("start", page_offset(max_results, page).to_string()),
            ("api_key", self.api_key.clone()),
        ];

        let response: SerpApiResponse = self.http.get(&self.base_url, &params, &[])?;

        Ok(response
            .organic_results
            .into_iter()
            .map(RawResult::from)
            .collect())
    }
}
