//! Intent classification
//!
//! Decides whether a free-text request wants individual matching records
//! (search) or rolled-up statistics (summary). Gate for which compiler runs.

use crate::models::Intent;

/// Keywords that indicate a statistics/rollup request. Any single match
/// classifies the text as a summary request; ordering carries no meaning.
const SUMMARY_KEYWORDS: &[&str] = &[
    "summary",
    "total",
    "sum",
    "how much",
    "spending",
    "spent",
    "breakdown",
    "analysis",
    "statistics",
    "stats",
    "overview",
];

/// Classify raw text as a search or summary request
///
/// Case-insensitive substring check against a fixed keyword set. Empty or
/// whitespace-only input defaults to search. Never fails, no side effects.
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();

    if SUMMARY_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        Intent::Summary
    } else {
        Intent::Search
    }
}
