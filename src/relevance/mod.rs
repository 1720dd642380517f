#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Local relevance heuristic for graded submissions.
//!
//! Everything in here is pure: no I/O, no shared state. The free functions
//! use the default [`Tunables`]; build a [`RelevanceScorer`] to override them.

/// Code detection over raw text.
pub mod code;
/// Mismatch thresholds and the score gate.
pub mod mismatch;
/// Tokenization shared by every score.
pub mod normalize;
/// All heuristic signals for one submission.
pub mod report;
/// Enhanced relevance and fallback grading.
pub mod scoring;
/// Set similarity.
pub mod similarity;

pub use code::is_code;
pub use mismatch::{GatedScore, MismatchThresholds, ScoreSource, gate_score, is_mismatch};
pub use normalize::{normalize, token_set, word_count};
pub use report::ScoreReport;
pub use scoring::{
    MAX_GRADE, MIN_GRADE, RelevanceBreakdown, RelevanceScorer, Tunables, length_ratio,
};
pub use similarity::jaccard;

/// Enhanced relevance of a submission (plus optional fetched file content) to
/// an assignment, in `[0, 1]`.
pub fn relevance(
    title: &str,
    description: &str,
    submission: &str,
    file_content: Option<&str>,
) -> f64 {
    RelevanceScorer::default().relevance(title, description, submission, file_content)
}

/// Fallback grade in `[MIN_GRADE, MAX_GRADE]` for when the model reported
/// none.
pub fn derive_grade<'a>(
    title: &str,
    description: &str,
    submission: impl Into<Option<&'a str>>,
) -> i32 {
    RelevanceScorer::default().derive_grade(title, description, submission)
}
