//! Choosing the most plausible address for a person.

use crate::candidates::{generate, EmailCandidate};
use crate::dns::DnsValidator;
use crate::models::ValidationResult;
use tracing::debug;

/// Validate candidates in generation order and return the first `valid`
/// one, or the first candidate's result when none is valid.
///
/// Stops querying DNS at the first valid address. Returns `None` when no
/// candidate can be generated (empty name parts or domain).
pub fn select_best(
    validator: &DnsValidator,
    first: &str,
    last: &str,
    domain: &str,
) -> Option<ValidationResult> {
    let candidates = generate(first, last, domain);
    validator
        .metrics()
        .record_candidates_generated(candidates.len());

    let mut fallback = None;
    for candidate in &candidates {
        let result = validator.validate(candidate.as_str());
        if result.is_valid() {
            debug!("Selected {} ({})", result.email, candidate.convention);
            return Some(result);
        }
        fallback.get_or_insert(result);
    }

    fallback
}

/// A candidate together with its validation outcome.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: EmailCandidate,
    pub result: ValidationResult,
}

/// Validate every candidate without short-circuiting.
pub fn validate_all(
    validator: &DnsValidator,
    first: &str,
    last: &str,
    domain: &str,
) -> Vec<ScoredCandidate> {
    let candidates = generate(first, last, domain);
    validator
        .metrics()
        .record_candidates_generated(candidates.len());

    candidates
        .into_iter()
        .map(|candidate| {
            let result = validator.validate(candidate.as_str());
            ScoredCandidate { candidate, result }
        })
        .collect()
}

/// Index of the entry [`select_best`] would pick from a fully validated list.
pub fn best_index(scored: &[ScoredCandidate]) -> Option<usize> {
    if scored.is_empty() {
        return None;
    }
    Some(
        scored
            .iter()
            .position(|s| s.result.is_valid())
            .unwrap_or(0),
    )
}
