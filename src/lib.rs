//! Lead Finder - people and company discovery with email inference and
//! DNS-only deliverability checks.
//!
//! Given a person's name and their company, the pipeline finds the company's
//! website domain, generates plausible addresses from common naming
//! conventions, and checks each address's domain for MX (or A/AAAA) records.
//! No mail is ever sent.
//!
//! # Architecture
//!
//! - **domain**: Domain normalization and the email value object
//! - **candidates**: Naming conventions and candidate generation
//! - **dns**: Resolver abstraction and the DNS validator
//! - **client**: Web search providers (Brave, SerpAPI) and their fallback chain
//! - **pipeline**: Query building, domain discovery, best-candidate selection,
//!   headcount estimation and batch enrichment
//! - **storage**: Seen-URL ledger and CSV export
//! - **models**: Records passed between pipeline stages
//! - **cache** / **metrics**: TTL cache and counters shared by the above
//! - **config** / **error**: Environment configuration and error types

pub mod cache;
pub mod candidates;
pub mod client;
pub mod config;
pub mod dns;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod storage;

// Re-export commonly used types
pub use cache::TimedCache;
pub use candidates::{generate, EmailCandidate, NamingConvention};
pub use client::{BraveClient, SearchClient, SearchProvider, SerpApiClient};
pub use config::Config;
pub use dns::{DnsLookup, DnsValidator, HickoryLookup, MxRecord};
pub use domain::{normalize, EmailAddress, NormalizedDomain};
pub use error::{ConfigError, DnsError, ExportError, LedgerError, SearchError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{
    EnrichedRow, ParsedPerson, RawResult, ValidationReason, ValidationResult, ValidationStatus,
};
pub use pipeline::{
    select_best, BatchOutcome, BatchRequest, DomainDiscovery, Enricher, HeadcountEstimator,
    ParallelEnricher, SearchFilters, SearchSource, SearchTarget,
};
pub use storage::SeenUrls;
