#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Submission grading: file fetch, model call, score parsing and the
//! relevance gate.

/// Submission file download.
pub mod fetch;
/// Parsing of the model's free-text reply.
pub mod parse;

use tracing::Instrument;
use uuid::Uuid;

pub use self::{
    fetch::fetch_file_content,
    parse::{detailed_feedback, parse_comment, parse_score},
};
use crate::{
    config::ConfigState,
    llm::{ChatBackend, ChatRequest},
    prompts::{FEEDBACK_SYSTEM, feedback_prompt},
    relevance::{ScoreReport, gate_score},
    types::{FeedbackRequest, FeedbackResponse},
};

/// Comment used when the model gave none.
pub const DEFAULT_COMMENT: &str = "피드백이 생성되었습니다.";

/// Comment used when the model could not be reached.
pub const FALLBACK_COMMENT: &str = "AI 피드백 생성에 실패하여 기본 피드백을 제공합니다.";

/// Detailed feedback used when the model gave none.
pub const DEFAULT_DETAIL: &str = "과제 제출이 확인되었습니다.";

/// Prefix added to the comment of a submission judged unrelated.
pub const MISMATCH_NOTICE: &str = "[주의] 제출물이 과제 내용과 관련이 적은 것으로 보입니다.";

/// Grades a submission.
///
/// Never fails: an unreachable file or model is logged and the local
/// heuristic fills in the score.
pub async fn evaluate(
    config: &ConfigState,
    llm: Option<&dyn ChatBackend>,
    request: &FeedbackRequest,
) -> FeedbackResponse {
    let span = tracing::info_span!("feedback", request_id = %Uuid::new_v4());
    evaluate_inner(config, llm, request).instrument(span).await
}

/// Body of [`evaluate`], run inside the request span.
async fn evaluate_inner(
    config: &ConfigState,
    llm: Option<&dyn ChatBackend>,
    request: &FeedbackRequest,
) -> FeedbackResponse {
    let title = request.assignment_title.as_str();
    let description = request.assignment_description.as_str();
    let submission = request.submission_content.as_deref().unwrap_or_default();

    let file_content = match request
        .submission_file_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
    {
        Some(url) => {
            match fetch_file_content(&config.http_client(), url, config.fetch_timeout()).await {
                Ok(content) => Some(content),
                Err(e) => {
                    tracing::warn!("Could not fetch submission file: {e:#}");
                    None
                }
            }
        }
        None => None,
    };
    let file_ok = file_content.is_some();

    let reply = match llm {
        Some(backend) => {
            let models = config.models();
            let chat = ChatRequest::with_settings(
                models,
                &models.model,
                FEEDBACK_SYSTEM,
                feedback_prompt(title, description, submission, file_content.as_deref()),
            );
            match backend.complete(chat).await {
                Ok(reply) => Some(reply),
                Err(e) => {
                    tracing::warn!("Feedback generation failed, using heuristic score: {e:#}");
                    None
                }
            }
        }
        None => None,
    };

    let report = ScoreReport::compute(
        config.scorer(),
        title,
        description,
        request.submission_content.as_deref(),
        file_content.as_deref(),
    );

    let upstream = reply.as_deref().and_then(parse_score);
    let gated = gate_score(upstream, report.mismatch, file_ok, report.is_code, || {
        report.derived_grade
    });

    tracing::info!(
        relevance = report.relevance,
        jaccard = report.jaccard,
        length_ratio = report.length_ratio,
        is_code = report.is_code,
        file_ok,
        relevance_threshold = report.thresholds.relevance,
        length_threshold = report.thresholds.length_ratio,
        mismatch = report.mismatch,
        upstream = ?upstream,
        score = gated.score,
        source = ?gated.source,
        "Graded submission"
    );

    let mut comment = match &reply {
        Some(reply) => parse_comment(reply).unwrap_or_else(|| DEFAULT_COMMENT.to_string()),
        None => FALLBACK_COMMENT.to_string(),
    };
    if report.mismatch && !file_ok {
        comment = format!("{MISMATCH_NOTICE} {comment}");
    }

    let detailed = reply
        .as_deref()
        .map(detailed_feedback)
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| DEFAULT_DETAIL.to_string());

    FeedbackResponse {
        score: gated.score,
        comment,
        detailed_feedback: detailed,
        relevance: report.relevance,
        mismatch: report.mismatch,
        score_source: gated.source,
    }
}
