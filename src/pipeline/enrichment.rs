//! Batch enrichment: search, dedupe against the ledger, then turn each
//! result into an [`EnrichedRow`].

use super::discovery::DomainDiscovery;
use super::headcount::HeadcountEstimator;
use super::query::{build_general_query, build_linkedin_query, SearchFilters, SearchSource, SearchTarget};
use super::selector::select_best;
use crate::client::SearchProvider;
use crate::dns::DnsValidator;
use crate::models::{strip_linkedin_suffix, EnrichedRow, ParsedPerson, RawResult};
use crate::storage::SeenUrls;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Parameters of one batch run.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub filters: SearchFilters,
    pub target: SearchTarget,
    pub source: SearchSource,
    /// Results requested per query
    pub per_page: usize,
    /// 1-based result page
    pub page: usize,
    /// Drop results whose URL is already in the ledger
    pub skip_seen: bool,
    /// Add this run's URLs to the returned ledger
    pub remember_seen: bool,
    /// Estimate headcount for discovered domains
    pub with_headcount: bool,
}

impl Default for BatchRequest {
    fn default() -> Self {
        Self {
            filters: SearchFilters::default(),
            target: SearchTarget::People,
            source: SearchSource::LinkedIn,
            per_page: 20,
            page: 1,
            skip_seen: true,
            remember_seen: true,
            with_headcount: true,
        }
    }
}

/// One executed query and what it returned.
#[derive(Debug, Clone)]
pub struct QueryRun {
    /// `LinkedIn` or `General`
    pub label: &'static str,
    pub query: String,
    pub results: Vec<RawResult>,
}

/// Everything a batch produced, including the updated ledger.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub queries: Vec<QueryRun>,
    pub unique: Vec<RawResult>,
    pub rows: Vec<EnrichedRow>,
    pub seen: SeenUrls,
}

/// Sequential enricher. One person at a time, candidates in order.
#[derive(Clone)]
pub struct Enricher {
    search: Arc<dyn SearchProvider>,
    discovery: DomainDiscovery,
    validator: DnsValidator,
    headcount: Option<HeadcountEstimator>,
}

impl Enricher {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        discovery: DomainDiscovery,
        validator: DnsValidator,
    ) -> Self {
        Self {
            search,
            discovery,
            validator,
            headcount: None,
        }
    }

    pub fn with_headcount(mut self, estimator: HeadcountEstimator) -> Self {
        self.headcount = Some(estimator);
        self
    }

    /// Run the requested queries. A failed search contributes no results.
    pub fn run_queries(&self, request: &BatchRequest) -> Vec<QueryRun> {
        let mut planned = Vec::new();
        if request.source.includes_linkedin() {
            planned.push(("LinkedIn", build_linkedin_query(&request.filters, request.target)));
        }
        if request.source.includes_general() {
            planned.push(("General", build_general_query(&request.filters, request.target)));
        }

        planned
            .into_iter()
            .map(|(label, query)| {
                let results = self
                    .search
                    .search(&query, request.per_page, request.page)
                    .unwrap_or_else(|e| {
                        warn!("{} query failed: {}", label, e);
                        Vec::new()
                    });
                info!("{} query returned {} result(s)", label, results.len());
                QueryRun {
                    label,
                    query,
                    results,
                }
            })
            .collect()
    }

    /// Enrich a single search result. Always yields a row.
    pub fn enrich(&self, result: &RawResult, request: &BatchRequest) -> EnrichedRow {
        let person = if request.target == SearchTarget::People
            && (result.is_linkedin_profile() || result.title.contains("LinkedIn"))
        {
            ParsedPerson::from_title(&result.title)
        } else {
            ParsedPerson {
                company: strip_linkedin_suffix(&result.title),
                ..ParsedPerson::default()
            }
        };

        let domain = self
            .discovery
            .discover(&person.company)
            .map(|d| d.into_inner())
            .unwrap_or_default();

        let headcount = match &self.headcount {
            Some(estimator) if request.with_headcount && !domain.is_empty() => {
                estimator.estimate(&domain)
            }
            _ => None,
        };

        let best = match person.name_parts() {
            Some(name) if !domain.is_empty() => {
                select_best(&self.validator, &name.first, &name.last, &domain)
            }
            _ => None,
        };

        debug!(
            "Enriched {:?}: domain={:?} email={:?}",
            person.name,
            domain,
            best.as_ref().map(|b| b.email.as_str())
        );

        EnrichedRow {
            name: person.name,
            title: person.title,
            company: person.company,
            domain,
            headcount,
            source_url: result.url.clone(),
            ..EnrichedRow::default()
        }
        .with_best(best.as_ref())
    }

    /// Run a full batch against the given ledger and return the new ledger
    /// with the rows.
    pub fn run_batch(&self, request: &BatchRequest, seen: SeenUrls) -> BatchOutcome {
        let queries = self.run_queries(request);
        let (unique, seen) = dedupe_results(&queries, request, seen);
        info!("{} unique URL(s) after dedupe", unique.len());

        let rows = unique.iter().map(|r| self.enrich(r, request)).collect();

        BatchOutcome {
            queries,
            unique,
            rows,
            seen,
        }
    }
}

/// Drop repeated URLs within the run and, when asked, URLs already seen.
/// Returns the unique results and the (possibly updated) ledger.
pub fn dedupe_results(
    queries: &[QueryRun],
    request: &BatchRequest,
    mut seen: SeenUrls,
) -> (Vec<RawResult>, SeenUrls) {
    let mut this_run = HashSet::new();
    let mut unique = Vec::new();

    for result in queries.iter().flat_map(|q| q.results.iter()) {
        if this_run.contains(&result.url) {
            continue;
        }
        if request.skip_seen && seen.contains(&result.url) {
            continue;
        }
        this_run.insert(result.url.clone());
        unique.push(result.clone());
    }

    if request.remember_seen {
        seen.extend(this_run);
    }

    (unique, seen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(results: Vec<RawResult>) -> Vec<QueryRun> {
        vec![QueryRun {
            label: "LinkedIn",
            query: String::new(),
            results,
        }]
    }

    #[test]
    fn test_dedupe_within_run_and_against_seen() {
        let queries = run(vec![
            RawResult::new("a", "https://x.com/a", ""),
            RawResult::new("a again", "https://x.com/a", ""),
            RawResult::new("b", "https://x.com/b", ""),
        ]);
        let mut seen = SeenUrls::new();
        seen.insert("https://x.com/b");

        let (unique, seen) = dedupe_results(&queries, &BatchRequest::default(), seen);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].title, "a");
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_no_skip_no_remember() {
        let queries = run(vec![RawResult::new("b", "https://x.com/b", "")]);
        let mut seen = SeenUrls::new();
        seen.insert("https://x.com/b");
        let request = BatchRequest {
            skip_seen: false,
            remember_seen: false,
            ..BatchRequest::default()
        };

        let (unique, seen) = dedupe_results(&queries, &request, seen);
        assert_eq!(unique.len(), 1);
        assert_eq!(seen.len(), 1);
    }
}
