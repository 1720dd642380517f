#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use bon::Builder;
use serde::Serialize;

use super::{
    code::{is_code, structural_keyword_count},
    normalize::{normalize, word_count},
    similarity::jaccard,
};

/// Lowest grade the heuristic can produce.
pub const MIN_GRADE: i32 = -5;
/// Highest grade the heuristic can produce.
pub const MAX_GRADE: i32 = 10;

/// Empirically chosen weights behind the relevance heuristic.
///
/// None of these are load-bearing invariants; they are kept at the values the
/// grading service has always used so scores stay comparable.
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct Tunables {
    /// Multiplier applied to the base similarity of code submissions.
    #[builder(default = 1.5)]
    pub code_multiplier:         f64,
    /// Bonus per structural keyword occurrence in a code submission.
    #[builder(default = 0.02)]
    pub structural_bonus_step:   f64,
    /// Cap on the accumulated structural keyword bonus.
    #[builder(default = 0.10)]
    pub structural_bonus_cap:    f64,
    /// Submission token count at which the length bonus starts.
    #[builder(default = 20)]
    pub length_bonus_min_tokens: usize,
    /// Divisor turning the token count into a length bonus.
    #[builder(default = 1000.0)]
    pub length_bonus_divisor:    f64,
    /// Cap on the length bonus.
    #[builder(default = 0.05)]
    pub length_bonus_cap:        f64,
    /// Trimmed character count below which a submission counts as empty.
    #[builder(default = 10)]
    pub min_submission_chars:    usize,
    /// Lower bounds of the base grade bands, in ascending order.
    #[builder(default = [(0.02, -2), (0.05, 0), (0.10, 2), (0.20, 4), (0.40, 6)])]
    pub grade_bands:             [(f64, i32); 5],
    /// Length ratio below which two points are deducted.
    #[builder(default = 0.05)]
    pub severe_length_ratio:     f64,
    /// Length ratio below which one point is deducted.
    #[builder(default = 0.10)]
    pub mild_length_ratio:       f64,
}

impl Tunables {
    /// Weights used by the grading service.
    pub const DEFAULT: Tunables = Tunables {
        code_multiplier:         1.5,
        structural_bonus_step:   0.02,
        structural_bonus_cap:    0.10,
        length_bonus_min_tokens: 20,
        length_bonus_divisor:    1000.0,
        length_bonus_cap:        0.05,
        min_submission_chars:    10,
        grade_bands:             [(0.02, -2), (0.05, 0), (0.10, 2), (0.20, 4), (0.40, 6)],
        severe_length_ratio:     0.05,
        mild_length_ratio:       0.10,
    };
}

impl Default for Tunables {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Intermediate values behind a relevance score, useful for logging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelevanceBreakdown {
    /// Plain Jaccard similarity between assignment and submission tokens.
    pub jaccard:           f64,
    /// Final relevance in `[0, 1]`.
    pub relevance:         f64,
    /// Whether the submission (plus file content) was classified as code.
    pub is_code:           bool,
    /// Number of tokens on the submission side.
    pub submission_tokens: usize,
}

/// Estimates topical overlap between an assignment and a submission, and
/// derives a fallback grade from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceScorer {
    /// Weights in effect for this scorer.
    tunables: Tunables,
}

impl RelevanceScorer {
    /// Creates a scorer with custom weights.
    pub fn new(tunables: Tunables) -> Self {
        Self { tunables }
    }

    /// Returns the weights in effect.
    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    /// Computes the enhanced relevance score along with the values it was
    /// built from.
    pub fn assess(
        &self,
        title: &str,
        description: &str,
        submission: &str,
        file_content: Option<&str>,
    ) -> RelevanceBreakdown {
        let t = &self.tunables;

        let mut assignment_tokens = normalize(title);
        assignment_tokens.extend(normalize(description));

        let combined = format!("{submission} {}", file_content.unwrap_or_default());
        let submission_tokens = normalize(combined.as_str());

        let base = jaccard(&assignment_tokens, &submission_tokens);
        let code = is_code(&combined);

        let mut score = base;
        if code {
            score *= t.code_multiplier;
            let structural = structural_keyword_count(&submission_tokens) as f64;
            score += (structural * t.structural_bonus_step).min(t.structural_bonus_cap);
        }

        let token_count = submission_tokens.len();
        if token_count >= t.length_bonus_min_tokens {
            score += (token_count as f64 / t.length_bonus_divisor).min(t.length_bonus_cap);
        }

        RelevanceBreakdown {
            jaccard:           base,
            relevance:         score.clamp(0.0, 1.0),
            is_code:           code,
            submission_tokens: token_count,
        }
    }

    /// Enhanced relevance score in `[0, 1]`.
    pub fn relevance(
        &self,
        title: &str,
        description: &str,
        submission: &str,
        file_content: Option<&str>,
    ) -> f64 {
        self.assess(title, description, submission, file_content)
            .relevance
    }

    /// Maps a relevance score onto the base grade bands.
    pub fn base_grade(&self, relevance: f64) -> i32 {
        self.tunables
            .grade_bands
            .iter()
            .rev()
            .find(|(lower, _)| relevance >= *lower)
            .map(|(_, grade)| *grade)
            .unwrap_or(MIN_GRADE)
    }

    /// Combines relevance, length ratio and code status into a grade in
    /// `[MIN_GRADE, MAX_GRADE]`.
    pub fn grade_from_signals(&self, relevance: f64, length_ratio: f64, is_code: bool) -> i32 {
        let t = &self.tunables;
        let mut grade = self.base_grade(relevance);

        if length_ratio < t.severe_length_ratio {
            grade -= 2;
        } else if length_ratio < t.mild_length_ratio {
            grade -= 1;
        }

        if is_code {
            grade += 1;
        }

        grade.clamp(MIN_GRADE, MAX_GRADE)
    }

    /// Derives a grade for a submission when the model did not report one.
    ///
    /// File content is not considered here; submissions that are
    /// missing or shorter than the configured minimum get [`MIN_GRADE`].
    pub fn derive_grade<'a>(
        &self,
        title: &str,
        description: &str,
        submission: impl Into<Option<&'a str>>,
    ) -> i32 {
        let Some(submission) = submission.into() else {
            return MIN_GRADE;
        };
        if submission.trim().chars().count() < self.tunables.min_submission_chars {
            return MIN_GRADE;
        }

        let relevance = self.relevance(title, description, submission, None);
        let ratio = length_ratio(word_count(submission), description);
        self.grade_from_signals(relevance, ratio, is_code(submission))
    }
}

/// Ratio of submission words to assignment description words.
pub fn length_ratio(submission_words: usize, description: &str) -> f64 {
    submission_words as f64 / word_count(description).max(1) as f64
}
