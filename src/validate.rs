//! Input normalization for case form values.
//!
//! Issue types and session statuses are validated at the store
//! boundary (case add, session edit, CSV import). Three-tier
//! resolution: exact match → synonym lookup → error with suggestion.

use crate::error::Error;
use crate::model::{IssueType, SessionStatus};
use std::collections::HashMap;
use std::sync::LazyLock;

// ── Synonym maps (typo and shorthand recovery) ───────────────

static ISSUE_TYPE_SYNONYMS: LazyLock<HashMap<&str, IssueType>> = LazyLock::new(|| {
    [
        ("defect", IssueType::Bug),
        ("problem", IssueType::Bug),
        ("fr", IssueType::FeatureRequest),
        ("feature", IssueType::FeatureRequest),
        ("enhancement", IssueType::FeatureRequest),
        ("request", IssueType::FeatureRequest),
        ("question", IssueType::Support),
        ("help", IssueType::Support),
        ("misc", IssueType::Other),
    ]
    .into_iter()
    .collect()
});

static STATUS_SYNONYMS: LazyLock<HashMap<&str, SessionStatus>> = LazyLock::new(|| {
    [
        ("new", SessionStatus::Open),
        ("wip", SessionStatus::InProgress),
        ("working", SessionStatus::InProgress),
        ("active", SessionStatus::InProgress),
        ("customer", SessionStatus::PendingCustomer),
        ("waiting", SessionStatus::PendingCustomer),
        ("dev", SessionStatus::PendingDevelopment),
        ("development", SessionStatus::PendingDevelopment),
        ("qa", SessionStatus::PendingQa),
        ("testing", SessionStatus::PendingQa),
        ("fixed", SessionStatus::Resolved),
        ("done", SessionStatus::Closed),
        ("complete", SessionStatus::Closed),
        ("completed", SessionStatus::Closed),
        ("misc", SessionStatus::Other),
    ]
    .into_iter()
    .collect()
});

/// Normalize an issue type string via exact match or synonym lookup.
///
/// Empty input is the blank form value and stays `Unset`; required
/// fields are not enforced on the add-case form.
///
/// # Errors
///
/// Returns `Error::InvalidIssueType` (with a closest-match suggestion
/// when one exists) for unrecognized non-empty input.
pub fn normalize_issue_type(input: &str) -> Result<IssueType, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(IssueType::Unset);
    }

    let lower = trimmed.to_lowercase();

    // Tier 1: exact match on the canonical display string
    for ty in IssueType::ALL {
        if ty.as_str().to_lowercase() == lower {
            return Ok(ty);
        }
    }

    // Tier 2: synonym lookup
    if let Some(&ty) = ISSUE_TYPE_SYNONYMS.get(lower.as_str()) {
        return Ok(ty);
    }

    // Tier 3: closest canonical value
    let suggestion = closest(&lower, IssueType::ALL.iter().map(IssueType::as_str));
    Err(Error::InvalidIssueType {
        input: trimmed.to_string(),
        suggestion,
    })
}

/// Normalize a session status string via exact match or synonym lookup.
///
/// # Errors
///
/// Returns `Error::InvalidStatus` for unrecognized input.
pub fn normalize_status(input: &str) -> Result<SessionStatus, Error> {
    let lower = input.trim().to_lowercase();

    for status in SessionStatus::ALL {
        if status.as_str().to_lowercase() == lower {
            return Ok(status);
        }
    }

    if let Some(&status) = STATUS_SYNONYMS.get(lower.as_str()) {
        return Ok(status);
    }

    let suggestion = closest(&lower, SessionStatus::ALL.iter().map(SessionStatus::as_str));
    Err(Error::InvalidStatus {
        input: input.trim().to_string(),
        suggestion,
    })
}

/// Find the closest canonical value within edit distance 3.
fn closest<'a>(input: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;

    for candidate in candidates {
        let dist = levenshtein_distance(input, &candidate.to_lowercase());
        if dist <= 3 && best.is_none_or(|(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }

    best.map(|(v, _)| v.to_string())
}

/// Compute the Levenshtein edit distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Single-row optimization (O(min(m,n)) space)
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}
