#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::relevance::{MAX_GRADE, MIN_GRADE};

/// Labels introducing the score line.
const SCORE_LABELS: &[&str] = &["score", "점수"];

/// Labels introducing the one-line comment.
const COMMENT_LABELS: &[&str] = &["comment", "코멘트", "한줄평"];

/// Returns the text after `<label>:` if `line` starts with one of `labels`.
///
/// Leading list markers and markdown emphasis are ignored, so
/// `**Score:** 7` and `- 점수: 7` both match.
fn labelled_value<'a>(line: &'a str, labels: &[&str]) -> Option<&'a str> {
    let line =
        line.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '#' | '-' | '>'));

    labels.iter().find_map(|label| {
        let head = line.get(..label.len())?;
        if !head.eq_ignore_ascii_case(label) {
            return None;
        }
        let rest = line[label.len()..].trim_start_matches(|c: char| c == '*' || c == ' ');
        let rest = rest.strip_prefix(':').or_else(|| rest.strip_prefix('：'))?;
        Some(rest.trim_matches(|c: char| c.is_whitespace() || c == '*'))
    })
}

/// Parses a leading signed integer, ignoring anything after the digits.
fn leading_int(value: &str) -> Option<i32> {
    let (sign, rest) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i32>().ok().map(|n| sign * n)
}

/// Extracts the model's score from a `score:` line, clamped to the grade
/// range.
pub fn parse_score(text: &str) -> Option<i32> {
    text.lines()
        .find_map(|line| labelled_value(line, SCORE_LABELS))
        .and_then(leading_int)
        .map(|score| score.clamp(MIN_GRADE, MAX_GRADE))
}

/// Extracts the model's one-line comment, if it gave a non-empty one.
pub fn parse_comment(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| labelled_value(line, COMMENT_LABELS))
        .filter(|comment| !comment.is_empty())
        .map(str::to_owned)
}

/// The response with its score and comment lines removed.
pub fn detailed_feedback(text: &str) -> String {
    text.lines()
        .filter(|line| {
            labelled_value(line, SCORE_LABELS).is_none()
                && labelled_value(line, COMMENT_LABELS).is_none()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_line_variants() {
        assert_eq!(parse_score("score: 7"), Some(7));
        assert_eq!(parse_score("Score: -3\n좋아요"), Some(-3));
        assert_eq!(parse_score("**점수:** 8점"), Some(8));
        assert_eq!(parse_score("intro\n- SCORE： 9/10"), Some(9));
    }

    #[test]
    fn score_is_clamped_and_requires_colon() {
        assert_eq!(parse_score("score: 42"), Some(10));
        assert_eq!(parse_score("score: -40"), Some(-5));
        assert_eq!(parse_score("scores are not given"), None);
        assert_eq!(parse_score("score: excellent"), None);
    }

    #[test]
    fn comment_and_details_are_split() {
        let reply = "score: 6\ncomment: 구조가 잘 잡혀 있습니다\n\n잘한 점: 함수 분리\n개선할 점: 테스트 추가";
        assert_eq!(parse_comment(reply).as_deref(), Some("구조가 잘 잡혀 있습니다"));
        assert_eq!(detailed_feedback(reply), "잘한 점: 함수 분리\n개선할 점: 테스트 추가");
    }

    #[test]
    fn empty_comment_is_absent() {
        assert_eq!(parse_comment("comment:   "), None);
    }
}
