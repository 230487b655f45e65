use lead_finder::dns::{DnsLookup, MxRecord};
use lead_finder::error::{DnsError, DnsResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory DNS for tests.
///
/// Unknown domains answer `NoRecords` to every query, like NXDOMAIN. Every
/// query is counted per record type.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockDnsLookup {
    mx: Arc<Mutex<HashMap<String, DnsResult<Vec<MxRecord>>>>>,
    ipv4: Arc<Mutex<HashMap<String, DnsResult<bool>>>>,
    ipv6: Arc<Mutex<HashMap<String, DnsResult<bool>>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockDnsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish MX records for a domain, as `(preference, exchange)` pairs.
    pub fn with_mx(self, domain: &str, records: &[(u16, &str)]) -> Self {
        let records = records
            .iter()
            .map(|(pref, host)| MxRecord::new(*pref, *host))
            .collect();
        self.mx.lock().unwrap().insert(domain.to_string(), Ok(records));
        self
    }

    /// Make the domain resolve to an IPv4 address.
    pub fn with_a(self, domain: &str) -> Self {
        self.ipv4.lock().unwrap().insert(domain.to_string(), Ok(true));
        self
    }

    /// Make the domain resolve to an IPv6 address.
    pub fn with_aaaa(self, domain: &str) -> Self {
        self.ipv6.lock().unwrap().insert(domain.to_string(), Ok(true));
        self
    }

    /// Fail every query for the domain with the given error.
    pub fn failing(self, domain: &str, error: DnsError) -> Self {
        self.mx
            .lock()
            .unwrap()
            .insert(domain.to_string(), Err(error.clone()));
        self.ipv4
            .lock()
            .unwrap()
            .insert(domain.to_string(), Err(error.clone()));
        self.ipv6.lock().unwrap().insert(domain.to_string(), Err(error));
        self
    }

    /// Number of queries of one kind (`mx`, `a`, `aaaa`).
    pub fn get_call_count(&self, kind: &str) -> usize {
        *self.call_counts.lock().unwrap().get(kind).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn record_call(&self, kind: &str) {
        *self
            .call_counts
            .lock()
            .unwrap()
            .entry(kind.to_string())
            .or_insert(0) += 1;
    }
}

impl DnsLookup for MockDnsLookup {
    fn mx(&self, domain: &str) -> DnsResult<Vec<MxRecord>> {
        self.record_call("mx");
        self.mx
            .lock()
            .unwrap()
            .get(domain)
            .cloned()
            .unwrap_or(Err(DnsError::NoRecords))
    }

    fn has_ipv4(&self, domain: &str) -> DnsResult<bool> {
        self.record_call("a");
        self.ipv4
            .lock()
            .unwrap()
            .get(domain)
            .cloned()
            .unwrap_or(Err(DnsError::NoRecords))
    }

    fn has_ipv6(&self, domain: &str) -> DnsResult<bool> {
        self.record_call("aaaa");
        self.ipv6
            .lock()
            .unwrap()
            .get(domain)
            .cloned()
            .unwrap_or(Err(DnsError::NoRecords))
    }
}
