#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::Serialize;

use super::{
    mismatch::MismatchThresholds,
    normalize::word_count,
    scoring::{RelevanceScorer, length_ratio},
};

/// Every heuristic signal for one submission, as logged by the feedback
/// pipeline and printed by `graddy score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Enhanced relevance in `[0, 1]`.
    pub relevance:     f64,
    /// Plain Jaccard similarity, for diagnostics only.
    pub jaccard:       f64,
    /// Whether the submission plus file content reads as code.
    pub is_code:       bool,
    /// Submission words (plus file words) over description words.
    pub length_ratio:  f64,
    /// Whether file content was available.
    pub file_ok:       bool,
    /// Thresholds picked for this submission.
    pub thresholds:    MismatchThresholds,
    /// Whether the submission is judged unrelated to the assignment.
    pub mismatch:      bool,
    /// Fallback grade, computed without the file content.
    pub derived_grade: i32,
}

impl ScoreReport {
    /// Computes all signals. `file_content` is `Some` only when the file was
    /// fetched successfully.
    pub fn compute<'a>(
        scorer: &RelevanceScorer,
        title: &str,
        description: &str,
        submission: impl Into<Option<&'a str>>,
        file_content: Option<&str>,
    ) -> Self {
        let submission = submission.into();
        let text = submission.unwrap_or_default();
        let breakdown = scorer.assess(title, description, text, file_content);

        let words = word_count(text) + file_content.map_or(0, word_count);
        let ratio = length_ratio(words, description);

        let file_ok = file_content.is_some();
        let thresholds = MismatchThresholds::select(file_ok, breakdown.is_code);

        Self {
            relevance: breakdown.relevance,
            jaccard: breakdown.jaccard,
            is_code: breakdown.is_code,
            length_ratio: ratio,
            file_ok,
            thresholds,
            mismatch: thresholds.is_mismatch(breakdown.relevance, ratio),
            derived_grade: scorer.derive_grade(title, description, submission),
        }
    }
}
