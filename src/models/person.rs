//! People parsed out of search-result titles.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `Name - Title at Company`, with an en dash or hyphen as separator.
static TITLE_AT_COMPANY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<name>[^–\-|]+)[–\-]\s*(?P<title>.+?)\s+at\s+(?P<company>.+)$")
        .expect("Failed to compile title regex")
});

static TITLE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[–\-|]").expect("Failed to compile separator regex"));

/// Suffix LinkedIn appends to page titles.
const LINKEDIN_SUFFIX: &str = "| LinkedIn";

/// Strip the LinkedIn page-title suffix.
pub fn strip_linkedin_suffix(title: &str) -> String {
    title.replace(LINKEDIN_SUFFIX, "").trim().to_string()
}

/// Name, job title and company extracted from a result title.
///
/// Unparseable titles degrade to `name = <whole title>` with empty job title
/// and company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPerson {
    pub name: String,
    pub title: String,
    pub company: String,
}

impl ParsedPerson {
    /// Parse a LinkedIn-style title such as
    /// `Jane Smith - Benefits Manager at Acme Health | LinkedIn`.
    pub fn from_title(raw_title: &str) -> Self {
        let t = strip_linkedin_suffix(raw_title);

        if let Some(caps) = TITLE_AT_COMPANY.captures(&t) {
            return Self {
                name: caps["name"].trim().to_string(),
                title: caps["title"].trim().to_string(),
                company: caps["company"].trim().to_string(),
            };
        }

        let parts: Vec<&str> = TITLE_SEPARATORS
            .split(&t)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if let [name, job, company, ..] = parts.as_slice() {
            return Self {
                name: name.to_string(),
                title: job.to_string(),
                company: company.to_string(),
            };
        }

        Self {
            name: t,
            title: String::new(),
            company: String::new(),
        }
    }

    /// First and last name tokens, when the name has at least two words.
    pub fn name_parts(&self) -> Option<PersonName> {
        PersonName::split(&self.name)
    }
}

/// A person's first and last name tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// Take the first and last whitespace-separated tokens of a full name.
    /// Middle names are ignored; single-word names yield `None`.
    pub fn split(full_name: &str) -> Option<Self> {
        let tokens: Vec<&str> = full_name.split_whitespace().collect();
        match tokens.as_slice() {
            [first, .., last] => Some(Self::new(*first, *last)),
            _ => None,
        }
    }
}
