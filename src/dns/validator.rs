//! DNS-only deliverability check for email addresses.
//!
//! An address is judged plausible when its domain publishes MX records, or
//! failing that an A/AAAA record. No mail is sent and no SMTP connection is
//! opened.

use super::resolver::{DnsLookup, MxRecord};
use crate::cache::TimedCache;
use crate::domain::EmailAddress;
use crate::error::DnsError;
use crate::metrics::Metrics;
use crate::models::{ValidationReason, ValidationResult, ValidationStatus};
use std::sync::Arc;
use tracing::{debug, warn};

/// What DNS said about a mail domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainVerdict {
    /// Mail exchangers by ascending preference
    Mx(Vec<String>),
    /// No usable MX, but the domain itself resolves
    Address,
    /// Definitive negative, or failures folded into "no record"
    NoRecords,
    /// Every lookup failed without a definitive answer
    Unreachable(DnsError),
}

/// Validates addresses against DNS, caching verdicts per domain.
///
/// Cheap to clone; clones share the resolver, cache and metrics.
#[derive(Clone)]
pub struct DnsValidator {
    lookup: Arc<dyn DnsLookup>,
    cache: TimedCache<String, DomainVerdict>,
    distinguish_failures: bool,
    metrics: Metrics,
}

impl DnsValidator {
    /// Create a validator with the given per-domain cache TTL in seconds
    /// (0 disables caching).
    pub fn new(lookup: Arc<dyn DnsLookup>, cache_ttl_secs: u64) -> Self {
        Self {
            lookup,
            cache: TimedCache::new(cache_ttl_secs),
            distinguish_failures: false,
            metrics: Metrics::new(),
        }
    }

    /// Report transport failures as `unknown` instead of `no_mx_or_dns`.
    pub fn with_distinguished_failures(mut self, distinguish: bool) -> Self {
        self.distinguish_failures = distinguish;
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Validate one address.
    ///
    /// Never fails: malformed input and DNS problems are reported through the
    /// result's status and reason.
    pub fn validate(&self, email: &str) -> ValidationResult {
        self.metrics.record_email_validated();

        let address = match EmailAddress::new(email) {
            Ok(address) => address,
            Err(_) => {
                debug!("Rejected by email grammar: {}", email);
                return ValidationResult::bad_syntax(email);
            }
        };

        let domain = address.domain().to_ascii_lowercase();
        let verdict = self.check_domain(&domain);

        let (status, reason, mx_hosts) = match verdict {
            DomainVerdict::Mx(hosts) => (ValidationStatus::Valid, ValidationReason::MxPresent, hosts),
            DomainVerdict::Address => (
                ValidationStatus::Valid,
                ValidationReason::ARecordFallback,
                vec![domain],
            ),
            DomainVerdict::NoRecords => (
                ValidationStatus::Invalid,
                ValidationReason::NoMxOrDns,
                Vec::new(),
            ),
            DomainVerdict::Unreachable(DnsError::Timeout) => (
                ValidationStatus::Unknown,
                ValidationReason::DnsTimeout,
                Vec::new(),
            ),
            DomainVerdict::Unreachable(_) => (
                ValidationStatus::Unknown,
                ValidationReason::DnsError,
                Vec::new(),
            ),
        };

        ValidationResult::new(email, status, reason, mx_hosts)
    }

    /// Look up (or recall) the verdict for a mail domain.
    pub fn check_domain(&self, domain: &str) -> DomainVerdict {
        let (verdict, hit) = self
            .cache
            .get_or_insert_with(domain.to_string(), || self.resolve_domain(domain));
        if hit {
            self.metrics.record_dns_cache_hit();
            debug!("DNS cache hit for {}", domain);
        }
        verdict
    }

    fn resolve_domain(&self, domain: &str) -> DomainVerdict {
        let mut failures: Vec<DnsError> = Vec::new();

        match self.observe(self.lookup.mx(domain)) {
            Ok(records) => {
                let published = !records.is_empty();
                let hosts = usable_mx_hosts(records);
                if !hosts.is_empty() {
                    debug!("{} has {} mail exchanger(s)", domain, hosts.len());
                    return DomainVerdict::Mx(hosts);
                }
                // Null MX (RFC 7505): the domain accepts no mail at all
                if published {
                    debug!("{} publishes a null MX", domain);
                    return DomainVerdict::NoRecords;
                }
            }
            Err(e) => Self::note_failure(&mut failures, e),
        }

        // Implicit MX: the domain itself may accept mail
        for ipv6 in [false, true] {
            let answer = if ipv6 {
                self.lookup.has_ipv6(domain)
            } else {
                self.lookup.has_ipv4(domain)
            };
            match self.observe(answer) {
                Ok(true) => {
                    debug!("{} has no MX but resolves to an address", domain);
                    return DomainVerdict::Address;
                }
                Ok(false) => {}
                Err(e) => Self::note_failure(&mut failures, e),
            }
        }

        // Three lookups ran; all three failing in transport means no answer
        if self.distinguish_failures && failures.len() == 3 {
            let error = failures
                .iter()
                .find(|e| **e == DnsError::Timeout)
                .cloned()
                .unwrap_or_else(|| failures[0].clone());
            warn!("DNS unreachable for {}: {}", domain, error);
            return DomainVerdict::Unreachable(error);
        }

        DomainVerdict::NoRecords
    }

    fn note_failure(failures: &mut Vec<DnsError>, error: DnsError) {
        if !error.is_definitive() {
            debug!("DNS lookup failed: {}", error);
            failures.push(error);
        }
    }

    fn observe<T>(&self, result: Result<T, DnsError>) -> Result<T, DnsError> {
        let failed = matches!(&result, Err(e) if !e.is_definitive());
        self.metrics.record_dns_lookup(failed);
        result
    }
}

/// Order by preference, dropping null MX (`.`) and empty targets.
fn usable_mx_hosts(mut records: Vec<MxRecord>) -> Vec<String> {
    records.sort_by_key(|r| r.preference);
    records
        .into_iter()
        .map(|r| r.exchange.trim_end_matches('.').to_string())
        .filter(|host| !host.is_empty())
        .collect()
}
