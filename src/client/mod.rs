//! HTTP clients for the web search providers.
//!
//! Providers are synchronous (`ureq`) and can be called from async contexts
//! via `tokio::task::spawn_blocking`. [`SearchClient`] chains the configured
//! providers, falling through to the next one when a provider fails.

mod brave;
mod serpapi;

pub use brave::BraveClient;
pub use serpapi::SerpApiClient;

use crate::config::Config;
use crate::error::{ConfigError, ConfigResult, SearchApiResult, SearchError};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::RawResult;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// A web search backend.
pub trait SearchProvider: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &'static str;

    /// Run one query and return up to `max_results` organic results for the
    /// 1-based `page`.
    fn search(&self, query: &str, max_results: usize, page: usize)
        -> SearchApiResult<Vec<RawResult>>;
}

/// Result offset for a 1-based page.
pub fn page_offset(max_results: usize, page: usize) -> usize {
    page.saturating_sub(1) * max_results
}

/// Blocking HTTP plumbing shared by the providers.
#[derive(Clone)]
pub(crate) struct HttpJson {
    agent: Arc<ureq::Agent>,
    metrics: Metrics,
}

impl HttpJson {
    pub(crate) fn new(timeout: Duration, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// GET `base_url` with the given query parameters and headers and decode
    /// the JSON body.
    pub(crate) fn get<T: DeserializeOwned>(
        &self,
        base_url: &str,
        params: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> SearchApiResult<T> {
        let url = build_url(base_url, params);
        let timer = HttpTimer::new(self.metrics.clone());

        let mut request = self.agent.get(&url).set("Accept", "application/json");
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let response = match request.call() {
            Ok(response) => {
                timer.complete();
                response
            }
            Err(e) => {
                timer.complete_with_error();
                return Err(map_error(e));
            }
        };

        let body = response
            .into_string()
            .map_err(|e| SearchError::HttpError(e.to_string()))?;

        serde_json::from_str(&body).map_err(SearchError::JsonError)
    }
}

/// Append URL-encoded query parameters to a base URL.
fn build_url(base_url: &str, params: &[(&str, String)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        base_url.to_string()
    } else if base_url.contains('?') {
        format!("{}&{}", base_url, query)
    } else {
        format!("{}?{}", base_url, query)
    }
}

/// Map a ureq error to a SearchError.
fn map_error(error: ureq::Error) -> SearchError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 | 403 => SearchError::Unauthorized,
                429 => SearchError::RateLimitExceeded,
                _ => SearchError::ApiError {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => {
            if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                SearchError::HttpError("Connection failed".to_string())
            } else if transport.kind() == ureq::ErrorKind::Io {
                SearchError::Timeout
            } else {
                SearchError::HttpError(transport.to_string())
            }
        }
    }
}

/// Ordered fallback chain of search providers.
#[derive(Clone)]
pub struct SearchClient {
    providers: Vec<Arc<dyn SearchProvider>>,
    metrics: Metrics,
}

impl SearchClient {
    /// Build the chain from configured credentials: Brave first, then SerpAPI.
    ///
    /// # Errors
    ///
    /// `ConfigError::NoSearchCredential` when neither key is set.
    pub fn from_config(config: &Config, timeout: Duration, metrics: Metrics) -> ConfigResult<Self> {
        let mut providers: Vec<Arc<dyn SearchProvider>> = Vec::new();

        if let Some(key) = &config.brave_key {
            providers.push(Arc::new(BraveClient::new(
                config.brave_api_url.clone(),
                key.clone(),
                timeout,
                metrics.clone(),
            )));
        }
        if let Some(key) = &config.serpapi_key {
            providers.push(Arc::new(SerpApiClient::new(
                config.serpapi_url.clone(),
                key.clone(),
                timeout,
                metrics.clone(),
            )));
        }

        if providers.is_empty() {
            return Err(ConfigError::NoSearchCredential);
        }

        Ok(Self { providers, metrics })
    }

    /// Chain over explicit providers, tried in order.
    pub fn with_providers(providers: Vec<Arc<dyn SearchProvider>>) -> Self {
        Self {
            providers,
            metrics: Metrics::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

impl SearchProvider for SearchClient {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn search(
        &self,
        query: &str,
        max_results: usize,
        page: usize,
    ) -> SearchApiResult<Vec<RawResult>> {
        if self.providers.is_empty() {
            return Err(SearchError::NoProvider);
        }

        self.metrics.record_search();
        let mut last_error = None;

        for provider in &self.providers {
            match provider.search(query, max_results, page) {
                Ok(results) => {
                    debug!(
                        "{} returned {} result(s) for {:?}",
                        provider.name(),
                        results.len(),
                        query
                    );
                    return Ok(results);
                }
                Err(e) => {
                    warn!("{} search failed: {}", provider.name(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(SearchError::AllProvidersFailed(
            last_error.map(|e| e.to_string()).unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(20, 1), 0);
        assert_eq!(page_offset(20, 3), 40);
        assert_eq!(page_offset(10, 0), 0);
    }

    #[test]
    fn test_build_url_encodes() {
        let url = build_url(
            "https://example.com/search",
            &[("q", "\"Acme\" (a OR b)".to_string()), ("count", "10".to_string())],
        );
        assert_eq!(
            url,
            "https://example.com/search?q=%22Acme%22%20%28a%20OR%20b%29&count=10"
        );
    }

    #[test]
    fn test_build_url_existing_query() {
        assert_eq!(
            build_url("https://x.test/s?engine=google", &[("q", "a".to_string())]),
            "https://x.test/s?engine=google&q=a"
        );
    }

    #[test]
    fn test_chain_requires_credential() {
        let config = Config::default();
        let result = SearchClient::from_config(&config, Duration::from_secs(1), Metrics::new());
        assert!(matches!(result, Err(ConfigError::NoSearchCredential)));
    }

    #[test]
    fn test_chain_order() {
        let config = Config {
            brave_key: Some("b".into()),
            serpapi_key: Some("s".into()),
            ..Config::default()
        };
        let client =
            SearchClient::from_config(&config, Duration::from_secs(1), Metrics::new()).unwrap();
        assert_eq!(client.provider_names(), vec!["brave", "serpapi"]);
    }

    #[test]
    fn test_empty_chain_is_no_provider() {
        let client = SearchClient::with_providers(Vec::new());
        assert!(matches!(client.search("q", 10, 1), Err(SearchError::NoProvider)));
    }
}
