//! Email candidate generation.

use super::conventions::{NamingConvention, CONVENTIONS};
use crate::domain::is_valid_email;
use std::collections::HashSet;
use std::fmt;

/// A syntactically valid address together with the convention that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailCandidate {
    pub address: String,
    pub convention: NamingConvention,
}

impl EmailCandidate {
    pub fn as_str(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for EmailCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// Lowercase and keep only characters that are legal in every convention's
/// local part: ASCII letters, digits, apostrophes and hyphens.
pub fn normalize_name_token(token: &str) -> String {
    token
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '\'' || *c == '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Generate ranked email candidates for a person at a domain.
///
/// Pure and deterministic. Returns an empty list when the first name, last
/// name or domain is empty after normalization. Renders that fail the strict
/// email grammar are dropped, and repeated addresses keep only their first
/// (highest priority) occurrence.
pub fn generate(first: &str, last: &str, domain: &str) -> Vec<EmailCandidate> {
    let f = normalize_name_token(first);
    let l = normalize_name_token(last);
    let domain = domain.trim().to_ascii_lowercase();

    if f.is_empty() || l.is_empty() || domain.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(CONVENTIONS.len());

    for (convention, render) in CONVENTIONS {
        let address = format!("{}@{}", render(&f, &l), domain);
        if !is_valid_email(&address) {
            continue;
        }
        if seen.insert(address.clone()) {
            out.push(EmailCandidate {
                address,
                convention: *convention,
            });
        }
    }

    tracing::debug!(
        first = %f,
        last = %l,
        domain = %domain,
        count = out.len(),
        "Generated email candidates"
    );

    out
}

/// Same as [`generate`], addresses only.
pub fn generate_addresses(first: &str, last: &str, domain: &str) -> Vec<String> {
    generate(first, last, domain)
        .into_iter()
        .map(|c| c.address)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidate_is_first_dot_last() {
        let candidates = generate_addresses("Jane", "Smith", "example.com");
        assert_eq!(candidates[0], "jane.smith@example.com");
        assert_eq!(candidates.len(), 11);
    }

    #[test]
    fn test_empty_inputs_yield_nothing() {
        assert!(generate("", "Smith", "example.com").is_empty());
        assert!(generate("Jane", "  ", "example.com").is_empty());
        assert!(generate("Jane", "Smith", "").is_empty());
        assert!(generate("Jane", "Smith", "   ").is_empty());
        // Nothing survives token normalization
        assert!(generate("!!!", "Smith", "example.com").is_empty());
    }

    #[test]
    fn test_one_letter_surname_deduplicates() {
        let candidates = generate_addresses("Ana", "O", "acme.com");

        let unique: HashSet<&String> = candidates.iter().collect();
        assert_eq!(unique.len(), candidates.len());

        assert_eq!(
            candidates.iter().filter(|c| *c == "ana.o@acme.com").count(),
            1
        );
        assert_eq!(
            candidates.iter().filter(|c| *c == "o.ana@acme.com").count(),
            1
        );
        // first.last and first.l collapse, last.first and l.first collapse
        assert_eq!(candidates.len(), 9);
    }

    #[test]
    fn test_one_letter_first_and_last() {
        let candidates = generate("A", "O", "acme.com");
        let addresses: Vec<&str> = candidates.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            addresses.iter().filter(|a| **a == "a.o@acme.com").count(),
            1
        );
        // Duplicate keeps the highest-priority convention
        let first = &candidates[0];
        assert_eq!(first.address, "a.o@acme.com");
        assert_eq!(first.convention, NamingConvention::FirstDotLast);
    }

    #[test]
    fn test_invalid_domain_drops_everything() {
        assert!(generate("Jane", "Smith", "localhost").is_empty());
        assert!(generate("Jane", "Smith", "acme.c0m").is_empty());
    }

    #[test]
    fn test_name_normalization() {
        assert_eq!(normalize_name_token("  O'Brien "), "o'brien");
        assert_eq!(normalize_name_token("Smith-Jones"), "smith-jones");
        assert_eq!(normalize_name_token("José"), "jos");
        assert_eq!(normalize_name_token("Dr."), "dr");
    }

    #[test]
    fn test_all_candidates_match_grammar() {
        let names = [
            ("Jane", "Smith"),
            ("Ana", "O"),
            ("Mary-Kate", "O'Neil"),
            ("x", "y"),
        ];
        for (first, last) in names {
            for candidate in generate(first, last, "acme.co.uk") {
                assert!(is_valid_email(candidate.as_str()));
                assert_eq!(candidate.as_str().matches('@').count(), 1);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = generate_addresses("Jane", "Smith", "example.com");
        let b = generate_addresses("Jane", "Smith", "example.com");
        assert_eq!(a, b);
    }
}
