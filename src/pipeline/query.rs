//! Search query construction from user filters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// What the search is looking for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTarget {
    #[default]
    People,
    Companies,
}

/// Which query family to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    #[default]
    LinkedIn,
    General,
    Both,
}

impl SearchSource {
    pub fn includes_linkedin(&self) -> bool {
        matches!(self, Self::LinkedIn | Self::Both)
    }

    pub fn includes_general(&self) -> bool {
        matches!(self, Self::General | Self::Both)
    }
}

impl FromStr for SearchTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "people" => Ok(Self::People),
            "companies" | "company" => Ok(Self::Companies),
            other => Err(format!("unknown target '{}'", other)),
        }
    }
}

impl FromStr for SearchSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linkedin" => Ok(Self::LinkedIn),
            "general" | "web" => Ok(Self::General),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown source '{}'", other)),
        }
    }
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::People => "people",
            Self::Companies => "companies",
        })
    }
}

/// Free-text filters narrowing a search. Empty fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub roles: Vec<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub area_code: String,
    pub country: String,
    pub industry: String,
}

impl SearchFilters {
    /// Non-empty location parts, deduplicated and sorted, joined with ` OR `.
    pub fn geo_terms(&self) -> String {
        let parts: BTreeSet<&str> = [
            &self.city,
            &self.state,
            &self.zip,
            &self.area_code,
            &self.country,
        ]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

        join_or(parts)
    }

    /// Non-empty roles joined with ` OR `, in the order given.
    pub fn role_terms(&self) -> String {
        join_or(self.roles.iter().map(|r| r.trim()).filter(|r| !r.is_empty()))
    }

    pub fn industry_terms(&self) -> String {
        self.industry.trim().to_string()
    }
}

fn join_or<'a>(terms: impl IntoIterator<Item = &'a str>) -> String {
    terms.into_iter().collect::<Vec<_>>().join(" OR ")
}

fn push_group(parts: &mut Vec<String>, terms: &str) {
    if !terms.is_empty() {
        parts.push(format!("({})", terms));
    }
}

/// LinkedIn member-profile query, excluding job postings.
pub fn build_people_query(filters: &SearchFilters) -> String {
    let mut parts = vec!["site:linkedin.com/in".to_string()];
    push_group(&mut parts, &filters.role_terms());
    push_group(&mut parts, &filters.geo_terms());
    push_group(&mut parts, &filters.industry_terms());
    parts.push("-jobs -hiring".to_string());
    parts.join(" ")
}

/// LinkedIn company-page query.
pub fn build_company_query(filters: &SearchFilters) -> String {
    let mut parts = vec!["site:linkedin.com/company".to_string()];
    push_group(&mut parts, &filters.geo_terms());
    push_group(&mut parts, &filters.industry_terms());
    parts.join(" ")
}

/// Open-web query for team and leadership pages.
pub fn build_general_query(filters: &SearchFilters, target: SearchTarget) -> String {
    let mut parts = Vec::new();
    if target == SearchTarget::People {
        parts.push("(team OR leadership OR about us OR staff OR directory)".to_string());
        push_group(&mut parts, &filters.role_terms());
    }
    push_group(&mut parts, &filters.geo_terms());
    push_group(&mut parts, &filters.industry_terms());

    if parts.is_empty() {
        "site:*.com".to_string()
    } else {
        parts.join(" ")
    }
}

/// LinkedIn query for the target: people profiles or company pages.
pub fn build_linkedin_query(filters: &SearchFilters, target: SearchTarget) -> String {
    match target {
        SearchTarget::People => build_people_query(filters),
        SearchTarget::Companies => build_company_query(filters),
    }
}
