//! Basic metrics instrumentation for tracking performance.
//!
//! Counters for outbound HTTP (search, page fetches), DNS lookups and the
//! candidate pipeline. Cheap to clone; clones share the same counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by clients, validator and enricher.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    http_requests_total: Arc<AtomicU64>,
    http_errors_total: Arc<AtomicU64>,
    http_duration_total_ms: Arc<AtomicU64>,
    searches_total: Arc<AtomicU64>,
    dns_lookups_total: Arc<AtomicU64>,
    dns_failures_total: Arc<AtomicU64>,
    dns_cache_hits_total: Arc<AtomicU64>,
    candidates_generated_total: Arc<AtomicU64>,
    emails_validated_total: Arc<AtomicU64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_search(&self) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one DNS query and whether it ended in a transport failure.
    pub fn record_dns_lookup(&self, failed: bool) {
        self.dns_lookups_total.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.dns_failures_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_dns_cache_hit(&self) {
        self.dns_cache_hits_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_candidates_generated(&self, count: usize) {
        self.candidates_generated_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_email_validated(&self) {
        self.emails_validated_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms();
        let count = self.http_requests_total();
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn searches_total(&self) -> u64 {
        self.searches_total.load(Ordering::Relaxed)
    }

    pub fn dns_lookups_total(&self) -> u64 {
        self.dns_lookups_total.load(Ordering::Relaxed)
    }

    pub fn dns_failures_total(&self) -> u64 {
        self.dns_failures_total.load(Ordering::Relaxed)
    }

    pub fn dns_cache_hits_total(&self) -> u64 {
        self.dns_cache_hits_total.load(Ordering::Relaxed)
    }

    pub fn candidates_generated_total(&self) -> u64 {
        self.candidates_generated_total.load(Ordering::Relaxed)
    }

    pub fn emails_validated_total(&self) -> u64 {
        self.emails_validated_total.load(Ordering::Relaxed)
    }

    /// Snapshot of all counters.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            searches_total: self.searches_total(),
            dns_lookups_total: self.dns_lookups_total(),
            dns_failures_total: self.dns_failures_total(),
            dns_cache_hits_total: self.dns_cache_hits_total(),
            candidates_generated_total: self.candidates_generated_total(),
            emails_validated_total: self.emails_validated_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub searches_total: u64,
    pub dns_lookups_total: u64,
    pub dns_failures_total: u64,
    pub dns_cache_hits_total: u64,
    pub candidates_generated_total: u64,
    pub emails_validated_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn complete(self) {
        self.metrics.record_http_request(self.start.elapsed());
    }

    pub fn complete_with_error(self) {
        self.metrics.record_http_request(self.start.elapsed());
        self.metrics.record_http_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.http_requests_total(), 0);
        assert_eq!(metrics.dns_lookups_total(), 0);
        assert_eq!(metrics.http_duration_avg_ms(), 0.0);
    }

    #[test]
    fn test_average_duration() {
        let metrics = Metrics::new();
        metrics.record_http_request(Duration::from_millis(100));
        metrics.record_http_request(Duration::from_millis(200));
        assert_eq!(metrics.http_requests_total(), 2);
        assert_eq!(metrics.http_duration_total_ms(), 300);
        assert_eq!(metrics.http_duration_avg_ms(), 150.0);
    }

    #[test]
    fn test_dns_counters() {
        let metrics = Metrics::new();
        metrics.record_dns_lookup(false);
        metrics.record_dns_lookup(true);
        metrics.record_dns_cache_hit();

        let summary = metrics.summary();
        assert_eq!(summary.dns_lookups_total, 2);
        assert_eq!(summary.dns_failures_total, 1);
        assert_eq!(summary.dns_cache_hits_total, 1);
    }

    #[test]
    fn test_http_timer_with_error() {
        let metrics = Metrics::new();
        let timer = HttpTimer::new(metrics.clone());
        timer.complete_with_error();

        assert_eq!(metrics.http_requests_total(), 1);
        assert_eq!(metrics.http_errors_total(), 1);
    }

    #[test]
    fn test_concurrent_access() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let m = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        m.record_candidates_generated(3);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.candidates_generated_total(), 600);
    }
}
