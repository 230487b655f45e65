use lead_finder::client::SearchProvider;
use lead_finder::error::{SearchApiResult, SearchError};
use lead_finder::models::RawResult;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Canned search results keyed by exact query string.
///
/// Unknown queries return no results; queries registered with
/// [`MockSearchProvider::fail_query`] return `SearchError::Timeout`.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockSearchProvider {
    responses: Arc<Mutex<HashMap<String, Vec<RawResult>>>>,
    failing: Arc<Mutex<Vec<String>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, query: &str, results: Vec<RawResult>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    pub fn fail_query(self, query: &str) -> Self {
        self.failing.lock().unwrap().push(query.to_string());
        self
    }

    /// Queries received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl SearchProvider for MockSearchProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn search(
        &self,
        query: &str,
        max_results: usize,
        _page: usize,
    ) -> SearchApiResult<Vec<RawResult>> {
        self.queries.lock().unwrap().push(query.to_string());

        if self.failing.lock().unwrap().iter().any(|q| q == query) {
            return Err(SearchError::Timeout);
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(query)
            .map(|r| r.iter().take(max_results).cloned().collect())
            .unwrap_or_default())
    }
}
