//! Company name to website domain, via web search.

use crate::cache::TimedCache;
use crate::client::SearchProvider;
use crate::domain::NormalizedDomain;
use crate::models::RawResult;
use std::sync::Arc;
use tracing::{debug, warn};

/// Social and aggregator sites that are never a company's own domain.
pub const EXCLUDED_DOMAINS: &[&str] = &[
    "linkedin.com",
    "facebook.com",
    "twitter.com",
    "youtube.com",
    "instagram.com",
];

/// Results requested for a discovery search.
pub const DISCOVERY_RESULTS: usize = 10;

/// Search query used to find a company's homepage.
pub fn discovery_query(company: &str) -> String {
    format!("\"{}\" (homepage OR website)", company)
}

/// First result whose normalized domain is non-empty and not excluded.
pub fn pick_domain(results: &[RawResult]) -> Option<NormalizedDomain> {
    results
        .iter()
        .map(|r| NormalizedDomain::parse(&r.url))
        .find(|d| !d.is_empty() && !EXCLUDED_DOMAINS.contains(&d.as_str()))
}

/// Finds company domains, remembering answers per company name.
#[derive(Clone)]
pub struct DomainDiscovery {
    provider: Arc<dyn SearchProvider>,
    cache: TimedCache<String, Option<NormalizedDomain>>,
}

impl DomainDiscovery {
    pub fn new(provider: Arc<dyn SearchProvider>, cache_ttl_secs: u64) -> Self {
        Self {
            provider,
            cache: TimedCache::new(cache_ttl_secs),
        }
    }

    /// Best guess at the company's registrable domain.
    ///
    /// Search failures are logged and yield `None`; they are not cached, so a
    /// later call retries.
    pub fn discover(&self, company: &str) -> Option<NormalizedDomain> {
        let company = company.trim();
        if company.is_empty() {
            return None;
        }

        let key = company.to_lowercase();
        if let Some(cached) = self.cache.get(&key) {
            debug!("Discovery cache hit for {:?}", company);
            return cached;
        }

        let results = match self
            .provider
            .search(&discovery_query(company), DISCOVERY_RESULTS, 1)
        {
            Ok(results) => results,
            Err(e) => {
                warn!("Domain discovery for {:?} failed: {}", company, e);
                return None;
            }
        };

        let domain = pick_domain(&results);
        debug!("Discovered {:?} -> {:?}", company, domain);
        self.cache.insert(key, domain.clone());
        domain
    }
}
