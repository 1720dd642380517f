#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};

/// Relevance and length-ratio cut-offs for a mismatch decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MismatchThresholds {
    /// Relevance below which the submission may be off-topic.
    pub relevance:    f64,
    /// Length ratio below which the submission may be off-topic.
    pub length_ratio: f64,
}

impl MismatchThresholds {
    /// Picks the thresholds for a submission. Fetched file content and code
    /// both make the gate more lenient.
    pub fn select(file_ok: bool, is_code: bool) -> Self {
        let (relevance, length_ratio) = match (file_ok, is_code) {
            (true, true) => (0.02, 0.02),
            (true, false) => (0.04, 0.03),
            (false, true) => (0.05, 0.04),
            (false, false) => (0.06, 0.05),
        };
        Self {
            relevance,
            length_ratio,
        }
    }

    /// True when both signals fall below their cut-offs.
    pub fn is_mismatch(&self, relevance: f64, length_ratio: f64) -> bool {
        relevance < self.relevance && length_ratio < self.length_ratio
    }
}

/// Decides whether a submission is too unrelated to its assignment to trust
/// the model's narrative as-is.
///
/// A submission that is short but on-topic, or long but off-topic, is not a
/// mismatch.
pub fn is_mismatch(relevance: f64, length_ratio: f64, file_ok: bool, is_code: bool) -> bool {
    MismatchThresholds::select(file_ok, is_code).is_mismatch(relevance, length_ratio)
}

/// Where the final score of a feedback response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// The model's own score, untouched.
    Model,
    /// The model's score, pulled down by the mismatch gate.
    Gated,
    /// The local heuristic; the model reported no usable score.
    Heuristic,
}

/// Final score after the mismatch gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GatedScore {
    /// Score reported to the caller.
    pub score:  i32,
    /// Origin of `score`.
    pub source: ScoreSource,
}

/// Applies the mismatch policy to the model's score.
///
/// Missing scores are always replaced by `derive`. An existing score is only
/// lowered on a mismatch when the file content could not be fetched; with the
/// file in hand the model saw everything and its score stands.
pub fn gate_score(
    upstream: Option<i32>,
    mismatch: bool,
    file_ok: bool,
    is_code: bool,
    derive: impl FnOnce() -> i32,
) -> GatedScore {
    let Some(score) = upstream else {
        return GatedScore {
            score:  derive(),
            source: ScoreSource::Heuristic,
        };
    };

    if !mismatch || file_ok {
        return GatedScore {
            score,
            source: ScoreSource::Model,
        };
    }

    let gated = if score > 8 && !is_code {
        score.clamp(3, 6)
    } else if score > 9 {
        8
    } else {
        score
    };

    GatedScore {
        score:  gated,
        source: if gated == score {
            ScoreSource::Model
        } else {
            ScoreSource::Gated
        },
    }
}
