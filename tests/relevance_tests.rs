mod support;

use graddy::relevance::{
    GatedScore, MismatchThresholds, RelevanceScorer, ScoreReport, ScoreSource, Tunables,
    derive_grade, gate_score, is_code, is_mismatch, jaccard, normalize, relevance,
};

fn numbered_tokens(prefix: &str, count: usize) -> String {
    (1..=count)
        .map(|i| format!("{prefix}{i:02}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn normalize_empty_and_absent_input() {
    assert!(normalize("").is_empty());
    assert!(normalize(None::<&str>).is_empty());
    assert!(normalize("   \n\t ").is_empty());
}

#[test]
fn normalize_lowercases_and_strips_punctuation() {
    assert_eq!(normalize("Hello, World!! 123"), vec!["hello", "world", "123"]);
    assert_eq!(normalize("a b cd"), vec!["cd"]);
}

#[test]
fn normalize_keeps_code_like_tokens_and_hangul() {
    assert_eq!(normalize("my_var = file.py - x"), vec!["my_var", "file.py"]);
    assert_eq!(
        normalize("HTML, CSS 기본 구조를 설명하라"),
        vec!["html", "css", "기본", "구조를", "설명하라"]
    );
}

#[test]
fn jaccard_basic_properties() {
    let a = normalize("alpha beta gamma");
    let b = normalize("beta gamma delta");
    let empty: Vec<String> = Vec::new();

    assert_eq!(jaccard(&a, &b), 0.5);
    assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    assert_eq!(jaccard(&a, &a), 1.0);
    assert_eq!(jaccard(&a, &empty), 0.0);
    assert_eq!(jaccard(&empty, &a), 0.0);
    assert_eq!(jaccard(&a, &normalize("epsilon zeta")), 0.0);
}

#[test]
fn jaccard_collapses_duplicates() {
    let a = normalize("alpha alpha beta");
    let b = normalize("beta alpha");
    assert_eq!(jaccard(&a, &b), 1.0);
}

#[test]
fn is_code_detects_fences_and_keywords() {
    assert!(is_code("```\nx=1\n```"));
    assert!(is_code("use `println!` here"));
    assert!(is_code("def foo(): return true if x == 1 else None"));
    assert!(is_code("public class Main { void run() {} }"));
}

#[test]
fn is_code_rejects_prose() {
    assert!(!is_code("오늘은 HTML 문서의 기본 구조에 대해 배웠습니다."));
    assert!(!is_code("I went to the park and read a book."));
    assert!(!is_code(""));
}

#[test]
fn relevance_is_always_bounded() {
    let long = numbered_tokens("word", 40);
    let cases = [
        ("", "", "", None),
        ("웹 개발", "", "", Some("")),
        ("", "HTML 구조", "```", None),
        ("title", &long as &str, &long as &str, Some(&long as &str)),
        ("class def import", "class def import", "```class def import public private```", None),
    ];

    for (title, description, submission, file) in cases {
        let score = relevance(title, description, submission, file);
        assert!((0.0..=1.0).contains(&score), "{score} out of range");
    }
}

#[test]
fn identical_long_texts_clamp_to_one() {
    let text = numbered_tokens("word", 30);
    assert_eq!(relevance("", &text, &text, None), 1.0);
}

#[test]
fn code_submission_scores_above_plain_jaccard() {
    let description = "구현 아키텍처 리뷰";
    let submission = "```\nclass Foo: def run(self): import os\n```";

    let plain = jaccard(&normalize(description), &normalize(submission));
    let enhanced = relevance("", description, submission, None);

    assert_eq!(plain, 0.0);
    assert!(enhanced > plain);
    // three structural keywords: class, def, import
    assert!((enhanced - 0.06).abs() < 1e-9);
}

#[test]
fn code_multiplier_lifts_overlapping_submissions() {
    let description = "python class design review";
    let prose = relevance("", description, "class design python", None);
    let code = relevance("", description, "```\nclass design python\n```", None);

    assert!((prose - 0.75).abs() < 1e-9);
    assert!(code > prose);
}

#[test]
fn custom_tunables_change_the_code_weighting() {
    let scorer = RelevanceScorer::new(
        Tunables::builder()
            .code_multiplier(1.0)
            .structural_bonus_step(0.0)
            .build(),
    );
    let description = "python class design review";
    let submission = "```\nclass design python\n```";

    assert_eq!(Tunables::builder().build(), Tunables::default());
    assert!((scorer.relevance("", description, submission, None) - 0.75).abs() < 1e-9);
}

#[test]
fn structural_bonus_is_capped() {
    // eight structural keywords would earn 0.16 uncapped
    let submission = "```\nclass def import public private package function class\n```";
    let score = relevance("웹 개발", "페이지 구조 설명", submission, None);
    assert!((score - 0.10).abs() < 1e-12, "{score}");
}

#[test]
fn length_bonus_is_capped() {
    let submission = numbered_tokens("tok", 60);
    let score = relevance("웹 개발", "기초", &submission, None);
    assert!((score - 0.05).abs() < 1e-12, "{score}");
}

#[test]
fn length_bonus_needs_twenty_tokens() {
    let long = numbered_tokens("tok", 25);
    let short = numbered_tokens("tok", 19);

    assert!((relevance("웹 개발", "기초", &long, None) - 0.025).abs() < 1e-9);
    assert_eq!(relevance("웹 개발", "기초", &short, None), 0.0);
}

#[test]
fn file_content_counts_towards_relevance() {
    let without = relevance("파이썬 정렬", "버블 정렬 구현", "첨부합니다", None);
    let with = relevance("파이썬 정렬", "버블 정렬 구현", "첨부합니다", Some("버블 정렬 구현 결과"));
    assert!(with > without);
}

#[test]
fn derive_grade_rejects_empty_or_short_submissions() {
    assert_eq!(derive_grade("웹 개발 기초", "HTML 구조", None::<&str>), -5);
    assert_eq!(derive_grade("웹 개발 기초", "HTML 구조", ""), -5);
    assert_eq!(derive_grade("웹 개발 기초", "HTML 구조", "   short   "), -5);
    assert_eq!(derive_grade("웹 개발 기초", "HTML 구조", "123456789"), -5);
}

#[test]
fn derive_grade_rewards_on_topic_submissions() {
    let grade = derive_grade(
        "웹 개발 기초",
        "HTML, CSS 기본 구조를 설명하라",
        "HTML 기본 구조는 head와 body로 나뉘고 CSS로 스타일을 입힌다",
    );
    assert_eq!(grade, 2);
}

#[test]
fn base_grade_bands_at_boundaries() {
    let scorer = RelevanceScorer::default();
    let expected = [
        (0.0, -5),
        (0.0199, -5),
        (0.02, -2),
        (0.0499, -2),
        (0.05, 0),
        (0.0999, 0),
        (0.10, 2),
        (0.1999, 2),
        (0.20, 4),
        (0.3999, 4),
        (0.40, 6),
        (1.0, 6),
    ];
    for (relevance, grade) in expected {
        assert_eq!(scorer.base_grade(relevance), grade, "relevance {relevance}");
    }
}

#[test]
fn grade_is_monotonic_in_relevance() {
    let scorer = RelevanceScorer::default();
    let points = [
        0.0, 0.0199, 0.02, 0.0499, 0.05, 0.0999, 0.10, 0.1999, 0.20, 0.3999, 0.40, 0.9,
    ];

    for ratio in [0.01, 0.07, 0.5] {
        for code in [false, true] {
            let grades: Vec<i32> = points
                .iter()
                .map(|r| scorer.grade_from_signals(*r, ratio, code))
                .collect();
            assert!(
                grades.windows(2).all(|w| w[0] <= w[1]),
                "ratio {ratio}, code {code}: {grades:?}"
            );
        }
    }
}

#[test]
fn length_penalty_and_code_bonus() {
    let scorer = RelevanceScorer::default();
    assert_eq!(scorer.grade_from_signals(0.5, 0.01, false), 4);
    assert_eq!(scorer.grade_from_signals(0.5, 0.07, false), 5);
    assert_eq!(scorer.grade_from_signals(0.5, 0.5, true), 7);
    assert_eq!(scorer.grade_from_signals(0.0, 0.0, false), -5);
}

#[test]
fn mismatch_threshold_table() {
    let cases = [
        (true, true, 0.02, 0.02),
        (true, false, 0.04, 0.03),
        (false, true, 0.05, 0.04),
        (false, false, 0.06, 0.05),
    ];
    for (file_ok, code, relevance, length_ratio) in cases {
        assert_eq!(
            MismatchThresholds::select(file_ok, code),
            MismatchThresholds {
                relevance,
                length_ratio
            }
        );
    }
}

#[test]
fn mismatch_requires_both_signals() {
    assert!(is_mismatch(0.01, 0.01, true, true));
    assert!(!is_mismatch(0.03, 0.01, true, true));

    assert!(is_mismatch(0.05, 0.04, false, false));
    // off-topic but long
    assert!(!is_mismatch(0.0, 0.75, false, false));
    // short but on-topic
    assert!(!is_mismatch(0.5, 0.0, false, false));
}

#[test]
fn gate_derives_missing_scores() {
    assert_eq!(gate_score(None, false, false, false, || 3), GatedScore {
        score:  3,
        source: ScoreSource::Heuristic,
    });
    assert_eq!(gate_score(None, true, true, true, || -5).source, ScoreSource::Heuristic);
}

#[test]
fn gate_pulls_down_high_scores_without_file() {
    let gated = gate_score(Some(9), true, false, false, || 0);
    assert_eq!(gated.score, 6);
    assert_eq!(gated.source, ScoreSource::Gated);

    let gated = gate_score(Some(10), true, false, true, || 0);
    assert_eq!(gated.score, 8);
    assert_eq!(gated.source, ScoreSource::Gated);

    let gated = gate_score(Some(9), true, false, true, || 0);
    assert_eq!(gated.score, 9);
    assert_eq!(gated.source, ScoreSource::Model);

    let gated = gate_score(Some(7), true, false, false, || 0);
    assert_eq!(gated.score, 7);
    assert_eq!(gated.source, ScoreSource::Model);
}

#[test]
fn gate_never_overrides_when_file_was_fetched() {
    let gated = gate_score(Some(10), true, true, false, || 0);
    assert_eq!(gated.score, 10);
    assert_eq!(gated.source, ScoreSource::Model);

    let gated = gate_score(Some(10), false, false, false, || 0);
    assert_eq!(gated.score, 10);
}

#[test]
fn unrelated_prose_end_to_end() {
    let title = "웹 개발 기초";
    let description = "HTML, CSS 기본 구조를 설명하라";
    let submission = "오늘 날씨가 좋네요";

    assert!(relevance(title, description, submission, None) < 0.01);
    assert!(matches!(derive_grade(title, description, submission), -5 | -2));

    let report =
        ScoreReport::compute(&RelevanceScorer::default(), title, description, submission, None);
    assert_eq!(report.thresholds, MismatchThresholds::select(false, false));
    assert!(report.relevance < report.thresholds.relevance);
    // three words against a five-word description is not short enough
    assert!((report.length_ratio - 0.6).abs() < 1e-9);
    assert!(!report.mismatch);
}

#[test]
fn unrelated_and_short_submission_is_a_mismatch() {
    let description = support::long_description();
    let report = ScoreReport::compute(
        &RelevanceScorer::default(),
        "웹 개발 기초",
        &description,
        "오늘 날씨가 좋네요",
        None,
    );

    assert!(report.length_ratio < 0.05);
    assert!(report.mismatch);
    assert_eq!(report.derived_grade, -5);
}
