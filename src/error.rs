//! Error types for lead-finder.
//!
//! Each family of failures gets its own `thiserror` enum. Upstream failures
//! (search, DNS) are recovered close to where they happen and turned into
//! "absent" values; only configuration errors are allowed to stop a run.

use thiserror::Error;

/// Errors that can occur when calling a web search provider.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Provider returned a non-success status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Credential rejected by the provider
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The provider chain is empty
    #[error("No search provider configured")]
    NoProvider,

    /// Every configured provider failed; carries the last failure
    #[error("All search providers failed, last error: {0}")]
    AllProvidersFailed(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Neither search credential is present
    #[error("No search API key available. Set BRAVE_KEY or SERPAPI_KEY.")]
    NoSearchCredential,
}

/// Errors from a single DNS lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    /// Definitive negative answer (NXDOMAIN or empty answer section)
    #[error("No records found")]
    NoRecords,

    /// Query timed out
    #[error("DNS query timed out")]
    Timeout,

    /// Resolver or transport failure (SERVFAIL, unreachable upstream, ...)
    #[error("Resolver error: {0}")]
    Resolver(String),
}

impl DnsError {
    /// Whether this failure is a definitive answer rather than a transport problem.
    pub fn is_definitive(&self) -> bool {
        matches!(self, DnsError::NoRecords)
    }
}

/// Errors reading or writing the seen-URL ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The ledger file has no `url` column
    #[error("Ledger is missing the 'url' column")]
    MissingColumn,
}

/// Errors writing enriched rows.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results with SearchError
pub type SearchApiResult<T> = Result<T, SearchError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with DnsError
pub type DnsResult<T> = Result<T, DnsError>;

/// Convenience type alias for Results with LedgerError
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Convenience type alias for Results with ExportError
pub type ExportResult<T> = Result<T, ExportError>;
