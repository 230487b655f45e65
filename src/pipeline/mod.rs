//! The lead pipeline: query building, domain discovery, candidate selection,
//! headcount estimation and batch enrichment.

pub mod discovery;
pub mod enrichment;
pub mod headcount;
pub mod parallel;
pub mod query;
pub mod selector;

pub use discovery::{discovery_query, pick_domain, DomainDiscovery, EXCLUDED_DOMAINS};
pub use enrichment::{dedupe_results, BatchOutcome, BatchRequest, Enricher, QueryRun};
pub use headcount::{estimate_from_html, HeadcountEstimator};
pub use parallel::ParallelEnricher;
pub use query::{
    build_company_query, build_general_query, build_linkedin_query, build_people_query,
    SearchFilters, SearchSource, SearchTarget,
};
pub use selector::{best_index, select_best, validate_all, ScoredCandidate};
