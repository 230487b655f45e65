//! DNS validation outcome for a single email address.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deliverability plausibility of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    Invalid,
    Unknown,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Machine-readable reason behind a [`ValidationStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    /// Address failed the strict grammar; no DNS query was made
    BadSyntax,
    /// Domain publishes at least one MX record
    MxPresent,
    /// No MX, but the bare domain has an A or AAAA record
    ARecordFallback,
    /// Neither MX nor address records resolved
    NoMxOrDns,
    /// Lookups timed out (only when DNS failures are distinguished)
    DnsTimeout,
    /// Resolver failure other than a timeout (only when distinguished)
    DnsError,
}

impl ValidationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadSyntax => "bad_syntax",
            Self::MxPresent => "mx_present",
            Self::ARecordFallback => "a_record_fallback",
            Self::NoMxOrDns => "no_mx_or_dns",
            Self::DnsTimeout => "dns_timeout",
            Self::DnsError => "dns_error",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Result of validating one address: `{email, status, reason, mx_hosts}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub email: String,
    pub status: ValidationStatus,
    pub reason: ValidationReason,
    /// Mail exchangers by ascending preference, or the bare domain when only
    /// an address record exists
    pub mx_hosts: Vec<String>,
}

impl ValidationResult {
    pub fn new(
        email: impl Into<String>,
        status: ValidationStatus,
        reason: ValidationReason,
        mx_hosts: Vec<String>,
    ) -> Self {
        Self {
            email: email.into(),
            status,
            reason,
            mx_hosts,
        }
    }

    pub fn bad_syntax(email: impl Into<String>) -> Self {
        Self::new(
            email,
            ValidationStatus::Invalid,
            ValidationReason::BadSyntax,
            Vec::new(),
        )
    }

    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Valid
    }

    /// Hosts joined with commas, for tabular output.
    pub fn mx_hosts_joined(&self) -> String {
        self.mx_hosts.join(",")
    }
}
