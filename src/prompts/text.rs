//! Prompt text normalization for keyword statistics.
//!
//! Prompts are lowercased, stripped of URLs, digits, and punctuation,
//! whitespace-collapsed, and filtered against an embedded English
//! stopword list before being tokenized into keywords.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("pattern compiles"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("pattern compiles"));
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("pattern compiles"));
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").expect("pattern compiles"));

/// Common English stopwords, excluded from keyword statistics.
///
/// Includes the bare contraction fragments ("don", "t", ...) left behind
/// once punctuation is stripped.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "can", "will",
    "just", "should", "now", "s", "t", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn", "don",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Check whether a token is a stopword.
#[must_use]
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Normalize prompt text for keyword extraction.
///
/// Lowercases, removes URLs, digits, punctuation, and underscores,
/// collapses whitespace, and drops stopwords. The result is a
/// space-joined token string (possibly empty).
#[must_use]
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_urls = URL.replace_all(&lowered, " ");
    let no_digits = DIGITS.replace_all(&no_urls, " ");
    let words_only = NON_WORD.replace_all(&no_digits, " ");
    let cleaned = UNDERSCORES.replace_all(&words_only, " ");

    cleaned
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("How Do I Sort a Vec?!"), "sort vec");
    }

    #[test]
    fn test_strips_urls_and_digits() {
        assert_eq!(
            normalize("check https://example.com/page?id=42 again in 10 minutes"),
            "check minutes"
        );
    }

    #[test]
    fn test_strips_underscores() {
        assert_eq!(normalize("snake_case naming"), "snake case naming");
    }

    #[test]
    fn test_removes_stopwords() {
        assert_eq!(
            normalize("what is the best way to learn rust"),
            "best way learn rust"
        );
    }

    #[test]
    fn test_contraction_fragments_are_dropped() {
        assert_eq!(normalize("don't panic"), "panic");
    }

    #[test]
    fn test_empty_and_stopword_only_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("is it not"), "");
    }

    #[test]
    fn test_is_stopword() {
        assert!(is_stopword("the"));
        assert!(is_stopword("t"));
        assert!(!is_stopword("rust"));
    }
}
