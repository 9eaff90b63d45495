// src/evaluation/mod.rs

//! Questionnaire evaluation: answer normalization, per-respondent scoring and
//! per-group aggregation. Everything here is pure computation over
//! caller-owned collections.

pub mod group;
pub mod normalize;
pub mod score;

use std::cmp::Ordering;

pub use group::{DuplicatePolicy, GroupKey, GroupStatus, GroupSummary, MemberResult, aggregate};
pub use normalize::normalize;
pub use score::{ScoreCard, score, score_card};

/// Rounds half up, matching how percentages are presented to users.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Human-oriented string ordering: case-insensitive first, lowercase before
/// uppercase when the strings differ only by case.
///
/// Only returns `Equal` for identical strings, so it is safe inside `Ord`.
/// Not full locale collation: accented letters and punctuation sort by code
/// point after lowercasing.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
