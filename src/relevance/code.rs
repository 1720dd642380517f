#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::HashSet;

/// Markers that always indicate a code submission. A backtick covers both
/// inline code and fenced blocks.
pub const CODE_MARKERS: &[char] = &['`'];

/// File extensions recognised inside `(<ext> 파일)` style annotations.
pub const CODE_EXTENSIONS: &[&str] = &[
    "py", "java", "js", "ts", "jsx", "tsx", "c", "cpp", "cs", "go", "rb", "php", "kt", "swift",
    "rs", "html", "css", "sql", "sh",
];

/// Lower-cased keywords and operators scanned for by [`is_code`].
pub const CODE_KEYWORDS: &[&str] = &[
    // conditionals and loops
    "if ",
    "else",
    "elif ",
    "for ",
    "while ",
    "switch",
    // declarations
    "def ",
    "function",
    "var ",
    "let ",
    "const ",
    "return",
    "import ",
    "#include",
    "lambda",
    // object-oriented
    "class ",
    "public ",
    "private ",
    "protected ",
    "static ",
    "void ",
    "extends ",
    "implements ",
    "new ",
    "self.",
    "this.",
    // output
    "print(",
    "println",
    "printf",
    "console.log",
    "system.out",
    // operators
    "==",
    "!=",
    "&&",
    "||",
    "=>",
    "->",
    // literals
    "none",
    "null",
    "true",
    "false",
];

/// Number of distinct [`CODE_KEYWORDS`] needed to classify text as code.
pub const MIN_KEYWORD_HITS: usize = 3;

/// Keywords whose occurrences earn a structural bonus in
/// [`crate::relevance::RelevanceScorer::assess`].
pub const STRUCTURAL_KEYWORDS: &[&str] =
    &["class", "function", "def", "public", "private", "import", "package"];

/// Returns true when `text` carries an `(<ext> 파일)` annotation for a known
/// language.
fn has_extension_marker(lowered: &str) -> bool {
    CODE_EXTENSIONS.iter().any(|ext| {
        lowered.contains(&format!("({ext} 파일)")) || lowered.contains(&format!("({ext}파일)"))
    })
}

/// Counts how many distinct vocabulary entries occur in `lowered`.
fn keyword_hits(lowered: &str) -> usize {
    CODE_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(**kw))
        .collect::<HashSet<_>>()
        .len()
}

/// Decides whether `text` is predominantly source code.
///
/// Fenced blocks, backticks and extension annotations short-circuit to
/// `true`; otherwise at least [`MIN_KEYWORD_HITS`] distinct keywords must
/// appear (case-insensitively).
pub fn is_code(text: &str) -> bool {
    if text.contains(CODE_MARKERS) {
        return true;
    }

    let lowered = text.to_lowercase();
    if has_extension_marker(&lowered) {
        return true;
    }

    keyword_hits(&lowered) >= MIN_KEYWORD_HITS
}

/// Counts whole-token occurrences of [`STRUCTURAL_KEYWORDS`].
pub fn structural_keyword_count(tokens: &[String]) -> usize {
    tokens
        .iter()
        .filter(|token| STRUCTURAL_KEYWORDS.contains(&token.as_str()))
        .count()
}
