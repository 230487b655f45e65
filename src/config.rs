//! Configuration management for lead-finder.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file. Search credentials are optional at load time; commands that hit a
//! search provider call [`Config::require_search_credentials`] before any
//! query runs.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Default Brave Search web endpoint.
pub const DEFAULT_BRAVE_API_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Default SerpAPI endpoint.
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search.json";

/// Configuration for a lead-finder run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Brave Search subscription token
    pub brave_key: Option<String>,

    /// SerpAPI key
    pub serpapi_key: Option<String>,

    /// Brave Search endpoint
    pub brave_api_url: String,

    /// SerpAPI endpoint
    pub serpapi_url: String,

    /// Search HTTP timeout in seconds (default: 20)
    pub request_timeout: u64,

    /// Timeout for the domain discovery search in seconds (default: 15)
    pub discovery_timeout: u64,

    /// DNS query timeout in milliseconds (default: 4000)
    pub dns_timeout_ms: u64,

    /// Headcount HTML fetch timeout in seconds (default: 12)
    pub fetch_timeout: u64,

    /// Per-domain DNS cache TTL in seconds, 0 disables (default: 300)
    pub dns_cache_ttl_secs: u64,

    /// People enriched concurrently (default: 4)
    pub worker_count: usize,

    /// Report DNS transport failures as `unknown` instead of `no_mx_or_dns`
    pub distinguish_dns_failures: bool,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `BRAVE_KEY` / `SERPAPI_KEY`: search credentials
    /// - `BRAVE_API_URL` / `SERPAPI_URL`: endpoint overrides
    /// - `REQUEST_TIMEOUT`: search HTTP timeout in seconds (default: 20)
    /// - `DISCOVERY_TIMEOUT`: discovery search timeout in seconds (default: 15)
    /// - `DNS_TIMEOUT_MS`: DNS query timeout (default: 4000)
    /// - `FETCH_TIMEOUT`: HTML fetch timeout in seconds (default: 12)
    /// - `DNS_CACHE_TTL_SECS`: per-domain DNS cache TTL (default: 300)
    /// - `WORKER_COUNT`: people enriched concurrently (default: 4)
    /// - `DISTINGUISH_DNS_FAILURES`: `true`/`false` (default: false)
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let brave_key = Self::optional_secret("BRAVE_KEY");
        let serpapi_key = Self::optional_secret("SERPAPI_KEY");

        let brave_api_url = Self::parse_env_url("BRAVE_API_URL", DEFAULT_BRAVE_API_URL)?;
        let serpapi_url = Self::parse_env_url("SERPAPI_URL", DEFAULT_SERPAPI_URL)?;

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 20)?;
        let discovery_timeout = Self::parse_env_u64("DISCOVERY_TIMEOUT", 15)?;
        let dns_timeout_ms = Self::parse_env_u64("DNS_TIMEOUT_MS", 4000)?;
        let fetch_timeout = Self::parse_env_u64("FETCH_TIMEOUT", 12)?;
        let dns_cache_ttl_secs = Self::parse_env_u64("DNS_CACHE_TTL_SECS", 300)?;
        let worker_count = Self::parse_env_usize("WORKER_COUNT", 4)?;
        let distinguish_dns_failures = Self::parse_env_bool("DISTINGUISH_DNS_FAILURES", false)?;

        if worker_count == 0 {
            return Err(ConfigError::InvalidValue {
                var: "WORKER_COUNT".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if dns_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                var: "DNS_TIMEOUT_MS".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            brave_key,
            serpapi_key,
            brave_api_url,
            serpapi_url,
            request_timeout,
            discovery_timeout,
            dns_timeout_ms,
            fetch_timeout,
            dns_cache_ttl_secs,
            worker_count,
            distinguish_dns_failures,
            log_level,
        })
    }

    /// Fail unless at least one search credential is configured.
    pub fn require_search_credentials(&self) -> ConfigResult<()> {
        if self.brave_key.is_none() && self.serpapi_key.is_none() {
            return Err(ConfigError::NoSearchCredential);
        }
        Ok(())
    }

    /// Search HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Discovery search timeout.
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout)
    }

    /// DNS query timeout.
    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    /// HTML fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    /// Read a credential, treating blank values as absent.
    fn optional_secret(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Parse an endpoint URL with a default value.
    fn parse_env_url(var_name: &str, default: &str) -> ConfigResult<String> {
        match env::var(var_name) {
            Ok(val) => {
                if !val.starts_with("http://") && !val.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        var: var_name.to_string(),
                        reason: "Must start with http:// or https://".to_string(),
                    });
                }
                Ok(val)
            }
            Err(_) => Ok(default.to_string()),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            brave_key: None,
            serpapi_key: None,
            brave_api_url: DEFAULT_BRAVE_API_URL.to_string(),
            serpapi_url: DEFAULT_SERPAPI_URL.to_string(),
            request_timeout: 20,
            discovery_timeout: 15,
            dns_timeout_ms: 4000,
            fetch_timeout: 12,
            dns_cache_ttl_secs: 300,
            worker_count: 4,
            distinguish_dns_failures: false,
            log_level: "info".to_string(),
        }
    }
}
