//! DNS lookups via hickory-resolver.
//!
//! The validator talks to DNS through the [`DnsLookup`] trait so it can be
//! exercised without network access. [`HickoryLookup`] is the production
//! implementation: hickory's tokio resolver driven on a private runtime, so
//! lookups can be made from blocking code whether or not the caller is itself
//! inside a tokio runtime.

use crate::error::{DnsError, DnsResult};
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::{AsyncResolver, TokioAsyncResolver};
use std::future::Future;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// One mail-exchange record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    /// Lower values are tried first by senders
    pub preference: u16,
    /// Target host, without the trailing root dot
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Read-only DNS queries needed to judge mail deliverability.
///
/// Implementations return `Err(DnsError::NoRecords)` (or an empty answer)
/// for NXDOMAIN, and `Timeout`/`Resolver` for transport problems.
pub trait DnsLookup: Send + Sync {
    /// MX records for a domain, in answer order.
    fn mx(&self, domain: &str) -> DnsResult<Vec<MxRecord>>;

    /// Whether the domain has at least one A record.
    fn has_ipv4(&self, domain: &str) -> DnsResult<bool>;

    /// Whether the domain has at least one AAAA record.
    fn has_ipv6(&self, domain: &str) -> DnsResult<bool>;
}

/// Hickory's async resolver behind a blocking interface.
///
/// Queries run as tasks on a dedicated single-worker runtime and the calling
/// thread waits on the task handle. The runtime is shut down in the
/// background on drop, so the lookup may be created, used and dropped on
/// any thread, including a tokio worker.
pub struct HickoryLookup {
    resolver: TokioAsyncResolver,
    runtime: Option<Runtime>,
}

impl HickoryLookup {
    /// Resolver using the system configuration, falling back to the public
    /// default upstreams when the system configuration cannot be read.
    ///
    /// Each query is bounded by `timeout` with a single attempt, so one lookup
    /// never blocks longer than roughly `timeout`.
    pub fn new(timeout: Duration) -> std::io::Result<Self> {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;

        let config = match hickory_resolver::system_conf::read_system_conf() {
            Ok((config, _)) => config,
            Err(e) => {
                debug!("Could not read system resolver config ({}), using defaults", e);
                ResolverConfig::default()
            }
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("dns-resolver")
            .enable_all()
            .build()?;

        let resolver = {
            let _guard = runtime.enter();
            AsyncResolver::tokio(config, opts)
        };

        info!("DNS resolver initialized - timeout: {}ms", timeout.as_millis());
        Ok(Self {
            resolver,
            runtime: Some(runtime),
        })
    }

    /// Query as a fully-qualified name so search domains are never appended.
    fn fqdn(domain: &str) -> String {
        let domain = domain.trim_end_matches('.');
        format!("{}.", domain)
    }

    /// Run one lookup on the private runtime and wait for it.
    fn run<F, T>(&self, lookup: F) -> DnsResult<T>
    where
        F: Future<Output = Result<T, ResolveError>> + Send + 'static,
        T: Send + 'static,
    {
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| DnsError::Resolver("resolver runtime is shut down".to_string()))?;

        let task = runtime.spawn(lookup);
        match futures::executor::block_on(task) {
            Ok(result) => result.map_err(map_resolve_error),
            Err(e) => Err(DnsError::Resolver(format!("lookup task failed: {}", e))),
        }
    }
}

impl Drop for HickoryLookup {
    fn drop(&mut self) {
        // A blocking shutdown panics when dropped from async context
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

fn map_resolve_error(error: ResolveError) -> DnsError {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            no_records_error(*response_code, &error)
        }
        ResolveErrorKind::Timeout => DnsError::Timeout,
        _ => DnsError::Resolver(error.to_string()),
    }
}

/// Only NXDOMAIN and an empty NOERROR answer are definitive; SERVFAIL,
/// REFUSED and the like say nothing about the domain.
fn no_records_error(code: ResponseCode, error: &dyn std::fmt::Display) -> DnsError {
    match code {
        ResponseCode::NXDomain | ResponseCode::NoError => DnsError::NoRecords,
        other => DnsError::Resolver(format!("{} ({})", error, other)),
    }
}

impl DnsLookup for HickoryLookup {
    fn mx(&self, domain: &str) -> DnsResult<Vec<MxRecord>> {
        debug!("Querying MX records for domain: {}", domain);

        let resolver = self.resolver.clone();
        let name = Self::fqdn(domain);
        let records = self.run(async move {
            let lookup = resolver.mx_lookup(name).await?;
            Ok(lookup
                .iter()
                .map(|mx| {
                    MxRecord::new(
                        mx.preference(),
                        mx.exchange().to_utf8().trim_end_matches('.'),
                    )
                })
                .collect::<Vec<_>>())
        })?;

        debug!("Found {} MX record(s) for {}", records.len(), domain);
        Ok(records)
    }

    fn has_ipv4(&self, domain: &str) -> DnsResult<bool> {
        let resolver = self.resolver.clone();
        let name = Self::fqdn(domain);
        self.run(async move {
            let lookup = resolver.ipv4_lookup(name).await?;
            Ok(lookup.iter().next().is_some())
        })
    }

    fn has_ipv6(&self, domain: &str) -> DnsResult<bool> {
        let resolver = self.resolver.clone();
        let name = Self::fqdn(domain);
        self.run(async move {
            let lookup = resolver.ipv6_lookup(name).await?;
            Ok(lookup.iter().next().is_some())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqdn() {
        assert_eq!(HickoryLookup::fqdn("acme.com"), "acme.com.");
        assert_eq!(HickoryLookup::fqdn("acme.com."), "acme.com.");
    }

    #[test]
    fn test_resolver_creation() {
        assert!(HickoryLookup::new(Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_no_records_by_response_code() {
        assert_eq!(no_records_error(ResponseCode::NXDomain, &"nx"), DnsError::NoRecords);
        assert_eq!(no_records_error(ResponseCode::NoError, &"empty"), DnsError::NoRecords);
        assert!(matches!(
            no_records_error(ResponseCode::ServFail, &"servfail"),
            DnsError::Resolver(_)
        ));
        assert!(matches!(
            no_records_error(ResponseCode::Refused, &"refused"),
            DnsError::Resolver(_)
        ));
    }

    #[test]
    fn test_timeout_maps_to_timeout() {
        let error = ResolveError::from(ResolveErrorKind::Timeout);
        assert_eq!(map_resolve_error(error), DnsError::Timeout);
    }

    #[tokio::test]
    async fn test_create_use_and_drop_inside_runtime() {
        let lookup = HickoryLookup::new(Duration::from_millis(200)).unwrap();
        // The outcome depends on the network; only the absence of a panic matters
        let _ = lookup.mx("invalid");
        drop(lookup);
    }
}
