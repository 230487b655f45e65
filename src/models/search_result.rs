//! Raw search-result record.

use serde::{Deserialize, Serialize};

/// One organic result returned by a search provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawResult {
    /// Result title as shown by the provider
    pub title: String,

    /// Result link
    pub url: String,

    /// Short description/snippet
    pub snippet: String,
}

impl RawResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }

    /// Whether the link points at a LinkedIn member profile.
    pub fn is_linkedin_profile(&self) -> bool {
        self.url.contains("linkedin.com/in")
    }
}
