#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::Result;
use serde_json::{Value, json};

use crate::{
    config::ConfigState,
    llm::{ChatBackend, ChatRequest},
    prompts::{ASSIGNMENT_SYSTEM, CURRICULUM_SYSTEM, assignment_prompt, curriculum_prompt},
    types::{AssignmentGenerationResponse, CurriculumResponse, StudyRequest},
};

/// Current local time, formatted for `generated_at` fields.
fn timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}

/// Generates a markdown curriculum for a study or project.
pub async fn generate_curriculum(
    llm: &dyn ChatBackend,
    config: &ConfigState,
    request: &StudyRequest,
) -> Result<CurriculumResponse> {
    let models = config.models();
    let chat = ChatRequest::with_settings(
        models,
        &models.model,
        CURRICULUM_SYSTEM,
        curriculum_prompt(request),
    );
    let curriculum = llm.complete(chat).await?;

    tracing::info!(
        study_project_id = request.study_project_id,
        length = curriculum.chars().count(),
        "Generated curriculum"
    );

    Ok(CurriculumResponse {
        study_project_id: request.study_project_id,
        curriculum,
        message: "커리큘럼이 성공적으로 생성되었습니다.".to_string(),
        success: true,
        generated_at: timestamp(),
    })
}

/// Generates assignments for a study or project.
///
/// Replies that are not valid JSON become a single assignment carrying the
/// raw text.
pub async fn generate_assignments(
    llm: &dyn ChatBackend,
    config: &ConfigState,
    request: &StudyRequest,
) -> Result<AssignmentGenerationResponse> {
    let models = config.models();
    let chat = ChatRequest::with_settings(
        models,
        &models.assignment_model,
        ASSIGNMENT_SYSTEM,
        assignment_prompt(request),
    );
    let reply = llm.complete(chat).await?;

    let assignments = match parse_assignments(&reply) {
        Some(assignments) => assignments,
        None => {
            tracing::warn!(
                study_project_id = request.study_project_id,
                "Assignment reply was not JSON, returning it as plain text"
            );
            vec![fallback_assignment(&reply, request)]
        }
    };

    tracing::info!(
        study_project_id = request.study_project_id,
        count = assignments.len(),
        "Generated assignments"
    );

    Ok(AssignmentGenerationResponse {
        study_project_id: request.study_project_id,
        assignments,
        message: "과제가 성공적으로 생성되었습니다.".to_string(),
        success: true,
        generated_at: timestamp(),
    })
}

/// Removes a surrounding markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string (e.g. `json`) on the opening line
    let inner = inner.split_once('\n').map_or("", |(_, rest)| rest);
    inner.trim_end().strip_suffix("```").unwrap_or(inner).trim()
}

/// Parses the model's assignment reply.
///
/// Accepts a single object, an array of objects, or an object with an
/// `assignments` array. Non-object array entries are dropped.
pub fn parse_assignments(reply: &str) -> Option<Vec<Value>> {
    let value: Value = serde_json::from_str(strip_code_fence(reply)).ok()?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("assignments") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                map.insert("assignments".to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        _ => return None,
    };

    let objects: Vec<Value> = items.into_iter().filter(Value::is_object).collect();
    (!objects.is_empty()).then_some(objects)
}

/// Assignment returned when the reply could not be parsed as JSON.
pub fn fallback_assignment(reply: &str, request: &StudyRequest) -> Value {
    json!({
        "title": "AI 생성 과제",
        "description": reply,
        "learning_objectives": ["AI가 생성한 과제입니다."],
        "requirements": ["과제 내용을 확인하세요."],
        "submission_format": "자유 형식",
        "evaluation_criteria": ["과제 완성도"],
        "estimated_duration": "1-2주",
        "difficulty_level": format!("레벨 {}", request.study_level),
        "tags": request.interest_tags,
        "additional_resources": [],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_json_object_is_parsed() {
        let reply = "```json\n{\"title\": \"HTML 구조 실습\", \"description\": \"...\"}\n```";
        let parsed = parse_assignments(reply).expect("parse fenced reply");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["title"], "HTML 구조 실습");
    }

    #[test]
    fn wrapped_and_bare_arrays_are_parsed() {
        let wrapped = r#"{"assignments": [{"title": "a"}, {"title": "b"}]}"#;
        assert_eq!(parse_assignments(wrapped).map(|v| v.len()), Some(2));

        let bare = r#"[{"title": "a"}, 3, {"title": "c"}]"#;
        assert_eq!(parse_assignments(bare).map(|v| v.len()), Some(2));
    }

    #[test]
    fn prose_is_rejected() {
        assert!(parse_assignments("과제를 만들 수 없습니다.").is_none());
        assert!(parse_assignments("[]").is_none());
    }
}
