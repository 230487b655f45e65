//! Enriched output row, one per processed search result.

use super::validation::ValidationResult;
use serde::{Deserialize, Serialize};

/// Column order of the exported table.
pub const ROW_HEADER: [&str; 10] = [
    "name",
    "title",
    "company",
    "domain",
    "headcount",
    "email",
    "status",
    "reason",
    "mx_hosts",
    "source_url",
];

/// The durable per-person artifact. Every field may be empty; a row is
/// always produced even when enrichment found nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub name: String,
    pub title: String,
    pub company: String,
    pub domain: String,
    pub headcount: Option<u32>,
    pub email: String,
    pub status: String,
    pub reason: String,
    /// Comma-joined mail exchangers
    pub mx_hosts: String,
    pub source_url: String,
}

impl EnrichedRow {
    /// Copy the chosen address and its verdict into the row.
    pub fn with_best(mut self, best: Option<&ValidationResult>) -> Self {
        if let Some(best) = best {
            self.email = best.email.clone();
            self.status = best.status.to_string();
            self.reason = best.reason.to_string();
            self.mx_hosts = best.mx_hosts_joined();
        }
        self
    }

    /// Cells in [`ROW_HEADER`] order; a missing headcount renders empty.
    pub fn to_record(&self) -> [String; 10] {
        [
            self.name.clone(),
            self.title.clone(),
            self.company.clone(),
            self.domain.clone(),
            self.headcount.map(|h| h.to_string()).unwrap_or_default(),
            self.email.clone(),
            self.status.clone(),
            self.reason.clone(),
            self.mx_hosts.clone(),
            self.source_url.clone(),
        ]
    }
}
