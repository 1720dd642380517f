#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Request and response bodies exchanged with the Spring backend.
//!
//! Field names are snake_case on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::relevance::ScoreSource;

/// Kind of assignment to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    /// A general study task.
    #[default]
    General,
    /// A quiz.
    Quiz,
    /// A project-based task.
    Project,
    /// A review and summary task.
    Review,
}

impl AssignmentKind {
    /// Korean label used inside prompts.
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentKind::General => "일반적인 학습 과제",
            AssignmentKind::Quiz => "퀴즈 형태의 과제",
            AssignmentKind::Project => "프로젝트 기반 과제",
            AssignmentKind::Review => "복습 및 정리 과제",
        }
    }
}

/// Fallback for `type_check`.
fn default_type_check() -> String {
    "study".to_string()
}

/// Description of a study or project, sent for curriculum and assignment
/// generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyRequest {
    /// Identifier of the study or project.
    pub study_project_id:    i64,
    /// Display name.
    pub study_project_name:  String,
    /// Headline.
    pub study_project_title: String,
    /// Free-text description.
    pub study_project_desc:  String,
    /// Difficulty level, 1 to 3.
    pub study_level:         i32,
    /// Interest tags attached to the study.
    #[serde(default)]
    pub interest_tags:       Vec<String>,
    /// Start date as sent by the caller.
    pub study_project_start: String,
    /// End date as sent by the caller.
    pub study_project_end:   String,
    /// `study` or `project`.
    #[serde(default = "default_type_check")]
    pub type_check:          String,
    /// Kind of assignment to generate; ignored for curricula.
    #[serde(default)]
    pub assignment_type:     AssignmentKind,
}

/// Generated curriculum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumResponse {
    /// Identifier echoed from the request.
    pub study_project_id: i64,
    /// Markdown curriculum.
    pub curriculum:       String,
    /// Human-readable status message.
    pub message:          String,
    /// Whether generation succeeded.
    pub success:          bool,
    /// Generation timestamp.
    pub generated_at:     String,
}

/// Generated assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentGenerationResponse {
    /// Identifier echoed from the request.
    pub study_project_id: i64,
    /// Assignment objects as produced by the model.
    pub assignments:      Vec<Value>,
    /// Human-readable status message.
    pub message:          String,
    /// Whether generation succeeded.
    pub success:          bool,
    /// Generation timestamp.
    pub generated_at:     String,
}

/// A submission to grade against its assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackRequest {
    /// Assignment title.
    #[serde(default)]
    pub assignment_title:       String,
    /// Assignment description.
    #[serde(default)]
    pub assignment_description: String,
    /// Inline submission text or code.
    #[serde(default)]
    pub submission_content:     Option<String>,
    /// URL of an attached submission file.
    #[serde(default)]
    pub submission_file_url:    Option<String>,
}

/// Graded feedback for a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    /// Final score in `[-5, 10]`.
    pub score:             i32,
    /// One-line summary.
    pub comment:           String,
    /// Full narrative feedback.
    pub detailed_feedback: String,
    /// Heuristic relevance of the submission to the assignment.
    pub relevance:         f64,
    /// Whether the submission was judged unrelated to the assignment.
    pub mismatch:          bool,
    /// Where `score` came from.
    pub score_source:      ScoreSource,
}
