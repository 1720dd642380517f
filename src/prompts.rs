#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use itertools::Itertools;

use crate::{config::PROMPT_TRUNCATE, types::StudyRequest};

/// System prompt for curriculum generation.
pub const CURRICULUM_SYSTEM: &str = "당신은 교육 전문가이자 커리큘럼 설계 전문가입니다. 체계적이고 \
                                     실용적인 학습 커리큘럼을 설계하는 것이 특기입니다.";

/// System prompt for assignment generation.
pub const ASSIGNMENT_SYSTEM: &str = "당신은 교육 전문가이자 과제 설계 전문가입니다. 체계적이고 \
                                     실용적인 학습 과제를 설계하는 것이 특기입니다. 항상 요청된 \
                                     JSON 형식으로 응답해주세요.";

/// System prompt for submission feedback.
pub const FEEDBACK_SYSTEM: &str = "당신은 공정하고 꼼꼼한 과제 평가자입니다. 제출물이 과제와 얼마나 \
                                   관련 있는지 먼저 판단하고, 요청된 형식을 정확히 지켜 \
                                   응답해주세요.";

/// Korean description of a study level; unknown levels read as intermediate.
pub fn level_description(level: i32) -> &'static str {
    match level {
        1 => "초급자 (기초 개념 학습)",
        2 => "중급자 (기본 실습 및 응용)",
        3 => "고급자 (심화 학습 및 프로젝트)",
        _ => "중급자",
    }
}

/// Upper-cases the first character of `word`.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cuts `text` down to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Builds the curriculum prompt for a study or project.
pub fn curriculum_prompt(request: &StudyRequest) -> String {
    let tags = request.interest_tags.iter().join(", ");
    let kind = &request.type_check;
    let level = request.study_level;

    format!(
        r#"다음 정보를 바탕으로 {name} {kind}를 위한 상세한 커리큘럼을 생성해주세요.

**{kind_title} 정보:**
- 이름: {name}
- 제목: {title}
- 설명: {desc}
- 수준: {level_desc} (레벨 {level})
- 관심 분야: {tags}
- 기간: {start} ~ {end}

**요구사항:**
1. {kind} 기간에 맞는 주차별 커리큘럼을 작성해주세요
2. 각 주차별로 학습 목표, 주요 내용, 실습 과제를 포함해주세요
3. {tags} 분야의 핵심 개념들을 체계적으로 학습할 수 있도록 구성해주세요
4. 레벨 {level}에 맞는 적절한 난이도로 구성해주세요
5. 실무 적용 가능한 실습과 프로젝트를 포함해주세요

**출력 형식:**
- 마크다운 형식으로 작성
- 주차별로 명확하게 구분
- 각 주차마다 학습 목표, 주요 내용, 실습 과제 포함
- 마지막에 전체 학습 성과 평가 방법 제시

한국어로 작성해주세요."#,
        name = request.study_project_name,
        kind_title = capitalize(kind),
        title = request.study_project_title,
        desc = request.study_project_desc,
        level_desc = level_description(level),
        start = request.study_project_start,
        end = request.study_project_end,
    )
}

/// Builds the assignment prompt; the model is asked to answer in JSON.
pub fn assignment_prompt(request: &StudyRequest) -> String {
    let tags = request.interest_tags.iter().join(", ");
    let level = request.study_level;

    format!(
        r#"다음 정보를 바탕으로 {name} {kind}를 위한 {kind_label}를 생성해주세요.

**{kind_title} 정보:**
- 이름: {name}
- 제목: {title}
- 설명: {desc}
- 수준: {level_desc} (레벨 {level})
- 관심 분야: {tags}
- 기간: {start} ~ {end}

**과제 요구사항:**
1. 레벨 {level}에 맞는 적절한 난이도로 구성
2. {tags} 분야의 핵심 개념을 포함
3. 실무 적용 가능한 실습 요소 포함
4. 팀워크와 협업을 고려한 과제 설계
5. 명확한 평가 기준과 마감일 제시

**출력 형식 (JSON):**
{{
    "title": "과제 제목",
    "description": "상세한 과제 설명",
    "learning_objectives": ["학습 목표 1", "학습 목표 2", "학습 목표 3"],
    "requirements": ["요구사항 1", "요구사항 2", "요구사항 3"],
    "submission_format": "제출 형식 설명",
    "evaluation_criteria": ["평가 기준 1", "평가 기준 2", "평가 기준 3"],
    "estimated_duration": "예상 소요 시간",
    "difficulty_level": "난이도 설명",
    "tags": ["관련 태그 1", "관련 태그 2"],
    "additional_resources": ["추가 자료 1", "추가 자료 2"]
}}

한국어로 작성하고, JSON 형식을 정확히 지켜주세요."#,
        name = request.study_project_name,
        kind = request.type_check,
        kind_title = capitalize(&request.type_check),
        kind_label = request.assignment_type.label(),
        title = request.study_project_title,
        desc = request.study_project_desc,
        level_desc = level_description(level),
        start = request.study_project_start,
        end = request.study_project_end,
    )
}

/// Builds the grading prompt for a submission.
///
/// Submission and file content are truncated to [`PROMPT_TRUNCATE`]
/// characters each.
pub fn feedback_prompt(
    title: &str,
    description: &str,
    submission: &str,
    file_content: Option<&str>,
) -> String {
    let submission = truncate_chars(submission, PROMPT_TRUNCATE);
    let file_section = match file_content {
        Some(content) => format!(
            "\n**첨부 파일 내용:**\n{}\n",
            truncate_chars(content, PROMPT_TRUNCATE)
        ),
        None => String::new(),
    };

    format!(
        r#"다음 과제에 대한 제출물을 평가해주세요.

**과제 제목:** {title}
**과제 설명:**
{description}

**제출 내용:**
{submission}
{file_section}
**평가 기준:**
1. 제출물이 과제 주제와 관련이 있는지 가장 먼저 확인하세요. 관련이 없다면 낮은 점수를 주세요.
2. 요구사항 충족도, 완성도, 정확성을 평가하세요.
3. 코드라면 구조, 가독성, 동작 가능성을 함께 평가하세요.

**출력 형식:**
score: <-5에서 10 사이의 정수>
comment: <한 줄 요약>
이후 줄부터 상세 피드백(잘한 점, 개선할 점, 다음 학습 제안)을 작성해주세요.

한국어로 작성해주세요."#
    )
}
