//! Heuristic commit-message classification.
//!
//! Presentation-layer decoration, independent of the aggregation contract:
//! a pure keyword scan over the lowercased message, first match wins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitKind {
    Feature,
    Fix,
    Docs,
    Refactor,
    Test,
    Other,
}

/// Classify a commit message by keyword.
pub fn classify(message: &str) -> CommitKind {
    let m = message.to_lowercase();
    let any = |words: &[&str]| words.iter().any(|w| m.contains(w));

    if any(&["add", "feature", "implement"]) {
        CommitKind::Feature
    } else if any(&["fix", "bug", "issue"]) {
        CommitKind::Fix
    } else if any(&["doc", "readme"]) {
        CommitKind::Docs
    } else if any(&["refactor", "clean", "improve"]) {
        CommitKind::Refactor
    } else if m.contains("test") {
        CommitKind::Test
    } else {
        CommitKind::Other
    }
}
