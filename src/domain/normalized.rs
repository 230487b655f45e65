//! Registrable-domain normalization.

use super::public_suffix::registrable_domain;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lowercase registrable domain such as `acme.com` or `acme.co.uk`.
///
/// May be empty: normalizing blank input yields an empty domain rather than
/// an error, and downstream steps treat it as "no domain".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedDomain(String);

impl NormalizedDomain {
    /// Normalize any URL, host, or link into its registrable domain.
    pub fn parse(input: &str) -> Self {
        Self(normalize(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turn a URL, bare host, or search-result link into a registrable domain.
///
/// Strips scheme, userinfo, path, query, fragment, port and a trailing dot,
/// then collapses subdomains down to one label below the public suffix. Hosts
/// without a known suffix come back lowercased but otherwise untouched.
/// Idempotent, and never fails.
///
/// ```
/// use lead_finder::domain::normalize;
///
/// assert_eq!(normalize("https://careers.acme.co.uk/jobs?id=1"), "acme.co.uk");
/// assert_eq!(normalize("acme.co.uk"), "acme.co.uk");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let without_scheme = match trimmed.split_once("://") {
        Some((_, rest)) => rest,
        None => trimmed,
    };

    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = strip_port(host_port).trim_end_matches('.').to_ascii_lowercase();

    match registrable_domain(&host) {
        Some(registrable) => registrable.to_string(),
        None => host,
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literal, e.g. [::1]:8080; a lone '[' is left alone
    if let Some((literal, _)) = host.strip_prefix('[').and_then(|rest| rest.split_once(']')) {
        return literal;
    }
    // Bare IPv6 literal has no port to strip
    if host.matches(':').count() > 1 {
        return host;
    }
    match host.rsplit_once(':') {
        Some((h, port)) if port.chars().all(|c| c.is_ascii_digit()) => h,
        _ => host,
    }
}
