//! DnsValidator behavior against an in-memory resolver.

mod mocks;

use lead_finder::error::DnsError;
use lead_finder::{DnsValidator, HickoryLookup, Metrics, ValidationReason, ValidationStatus};
use mocks::MockDnsLookup;
use std::sync::Arc;
use std::time::Duration;

fn validator(lookup: &MockDnsLookup) -> DnsValidator {
    DnsValidator::new(Arc::new(lookup.clone()), 300)
}

#[test]
fn test_bad_syntax_issues_no_queries() {
    let lookup = MockDnsLookup::new();
    let v = validator(&lookup);

    for email in ["not-an-email", "a@b", "two@@at.com", "", "jane smith@acme.com"] {
        let result = v.validate(email);
        assert_eq!(result.status, ValidationStatus::Invalid);
        assert_eq!(result.reason, ValidationReason::BadSyntax);
        assert!(result.mx_hosts.is_empty());
    }
    assert_eq!(lookup.total_calls(), 0);
}

#[test]
fn test_nonexistent_domain_is_no_mx_or_dns() {
    let lookup = MockDnsLookup::new();
    let result = validator(&lookup).validate("someone@this-domain-should-not-exist-xyz123.test");

    assert_eq!(result.status, ValidationStatus::Invalid);
    assert_eq!(result.reason, ValidationReason::NoMxOrDns);
    assert!(result.mx_hosts.is_empty());
    assert_eq!(lookup.get_call_count("mx"), 1);
    assert_eq!(lookup.get_call_count("a"), 1);
    assert_eq!(lookup.get_call_count("aaaa"), 1);
}

#[test]
fn test_mx_hosts_ordered_by_preference() {
    let lookup = MockDnsLookup::new().with_mx(
        "acme.com",
        &[(30, "mx3.acme.com."), (10, "mx1.acme.com."), (20, "mx2.acme.com.")],
    );
    let result = validator(&lookup).validate("jane.smith@acme.com");

    assert_eq!(result.status, ValidationStatus::Valid);
    assert_eq!(result.reason, ValidationReason::MxPresent);
    assert_eq!(
        result.mx_hosts,
        vec!["mx1.acme.com", "mx2.acme.com", "mx3.acme.com"]
    );
    // MX found, so no address lookups
    assert_eq!(lookup.get_call_count("a"), 0);
}

#[test]
fn test_a_record_fallback() {
    let lookup = MockDnsLookup::new().with_a("smallshop.com");
    let result = validator(&lookup).validate("owner@smallshop.com");

    assert_eq!(result.status, ValidationStatus::Valid);
    assert_eq!(result.reason, ValidationReason::ARecordFallback);
    assert_eq!(result.mx_hosts, vec!["smallshop.com"]);
    assert_eq!(lookup.get_call_count("aaaa"), 0);
}

#[test]
fn test_aaaa_only_fallback() {
    let lookup = MockDnsLookup::new().with_aaaa("v6only.net");
    let result = validator(&lookup).validate("ops@v6only.net");

    assert_eq!(result.reason, ValidationReason::ARecordFallback);
    assert_eq!(result.mx_hosts, vec!["v6only.net"]);
}

#[test]
fn test_null_mx_rejects_without_address_fallback() {
    let lookup = MockDnsLookup::new().with_mx("nomail.org", &[(0, ".")]);
    let result = validator(&lookup).validate("x@nomail.org");

    assert_eq!(result.status, ValidationStatus::Invalid);
    assert_eq!(result.reason, ValidationReason::NoMxOrDns);

    // A parked domain that resolves but publishes a null MX takes no mail
    let lookup = MockDnsLookup::new()
        .with_mx("parked.com", &[(0, ".")])
        .with_a("parked.com");
    let result = validator(&lookup).validate("jane@parked.com");

    assert_eq!(result.status, ValidationStatus::Invalid);
    assert_eq!(result.reason, ValidationReason::NoMxOrDns);
    assert!(result.mx_hosts.is_empty());
    assert_eq!(lookup.get_call_count("a"), 0);
    assert_eq!(lookup.get_call_count("aaaa"), 0);
}

#[test]
fn test_domain_lookups_cached_across_candidates() {
    let lookup = MockDnsLookup::new().with_mx("acme.com", &[(10, "mx.acme.com")]);
    let metrics = Metrics::new();
    let v = validator(&lookup).with_metrics(metrics.clone());

    v.validate("jane.smith@acme.com");
    v.validate("jsmith@acme.com");
    v.validate("jane@ACME.com");

    assert_eq!(lookup.get_call_count("mx"), 1);
    assert_eq!(metrics.dns_cache_hits_total(), 2);
    assert_eq!(metrics.emails_validated_total(), 3);
}

#[test]
fn test_zero_ttl_disables_cache() {
    let lookup = MockDnsLookup::new().with_mx("acme.com", &[(10, "mx.acme.com")]);
    let v = DnsValidator::new(Arc::new(lookup.clone()), 0);

    v.validate("a@acme.com");
    v.validate("b@acme.com");

    assert_eq!(lookup.get_call_count("mx"), 2);
}

#[test]
fn test_transport_failures_default_to_no_record() {
    let lookup = MockDnsLookup::new().failing("flaky.com", DnsError::Timeout);
    let metrics = Metrics::new();
    let result = validator(&lookup)
        .with_metrics(metrics.clone())
        .validate("a@flaky.com");

    assert_eq!(result.status, ValidationStatus::Invalid);
    assert_eq!(result.reason, ValidationReason::NoMxOrDns);
    assert_eq!(metrics.dns_failures_total(), 3);
}

#[test]
fn test_distinguished_failures() {
    let timeout = MockDnsLookup::new().failing("slow.com", DnsError::Timeout);
    let result = validator(&timeout)
        .with_distinguished_failures(true)
        .validate("a@slow.com");
    assert_eq!(result.status, ValidationStatus::Unknown);
    assert_eq!(result.reason, ValidationReason::DnsTimeout);

    let servfail =
        MockDnsLookup::new().failing("broken.com", DnsError::Resolver("SERVFAIL".into()));
    let result = validator(&servfail)
        .with_distinguished_failures(true)
        .validate("a@broken.com");
    assert_eq!(result.status, ValidationStatus::Unknown);
    assert_eq!(result.reason, ValidationReason::DnsError);
}

#[test]
fn test_distinguished_failures_still_trust_definitive_answers() {
    // Unknown domain: every query is a definitive NXDOMAIN
    let lookup = MockDnsLookup::new();
    let result = validator(&lookup)
        .with_distinguished_failures(true)
        .validate("a@gone.example");
    assert_eq!(result.reason, ValidationReason::NoMxOrDns);
}

#[tokio::test]
async fn test_hickory_validator_usable_and_dropped_inside_runtime() {
    let lookup = HickoryLookup::new(Duration::from_millis(500)).unwrap();
    let v = DnsValidator::new(Arc::new(lookup), 0);

    // Network-dependent outcome; the call must simply return
    let result = v.validate("jane@example.invalid");
    assert_ne!(result.reason, ValidationReason::BadSyntax);

    let clone = v.clone();
    drop(v);
    drop(clone);
}
