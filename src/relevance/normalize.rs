#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::HashSet;

/// Returns true for characters in the precomposed Hangul syllable block.
fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Characters that survive normalization. Dots, underscores and hyphens are
/// kept so that tokens like `file.py` or `my_var` stay intact.
fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || is_hangul_syllable(c)
        || c.is_whitespace()
        || matches!(c, '.' | '_' | '-')
}

/// Lower-cases `text`, blanks out punctuation and splits it into tokens longer
/// than one character.
///
/// Accepts either a `&str` or an `Option<&str>`; an absent or empty body
/// yields no tokens.
///
/// ```
/// let tokens = graddy::relevance::normalize("Hello, World!! 123");
/// assert_eq!(tokens, vec!["hello", "world", "123"]);
/// assert!(graddy::relevance::normalize(None::<&str>).is_empty());
/// ```
pub fn normalize<'a>(text: impl Into<Option<&'a str>>) -> Vec<String> {
    let Some(text) = text.into() else {
        return Vec::new();
    };

    text.to_lowercase()
        .chars()
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(str::to_owned)
        .collect()
}

/// Collapses a token sequence into a set, dropping duplicates.
pub fn token_set(tokens: &[String]) -> HashSet<&str> {
    tokens.iter().map(String::as_str).collect()
}

/// Number of whitespace-separated words in `text`, before any normalization.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
