//! Keyword extraction.
//!
//! Messages are split into alphanumeric tokens; English stop-words are
//! removed (case-insensitively) and the rest counted as written, so `Deploy`
//! and `deploy` are different keywords.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::core::models::ExportRow;

/// English stop-words (the NLTK list).
pub const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOP_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

// Letters and digits, no underscores.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\W_]+").expect("token pattern is valid"));

/// Returns `true` if `word` is an English stop-word, ignoring case.
pub fn is_stop_word(word: &str) -> bool {
    STOP_SET.contains(word.to_lowercase().as_str())
}

/// Splits text into alphanumeric tokens.
///
/// ```rust
/// use slackpack::stats::keywords::tokenize;
///
/// let tokens: Vec<_> = tokenize("Deploy v2.1 to prod_east, ok?").collect();
/// assert_eq!(tokens, ["Deploy", "v2", "1", "to", "prod", "east", "ok"]);
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN.find_iter(text).map(|m| m.as_str())
}

/// Most frequent non-stop-word tokens across all messages.
///
/// Sorted by count, descending; ties keep first-seen order.
pub fn top_keywords(rows: &[ExportRow], limit: usize) -> Vec<(String, usize)> {
    // word -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut position = 0;

    for row in rows {
        for word in tokenize(&row.message).filter(|w| !is_stop_word(w)) {
            counts
                .entry(word)
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, position));
            position += 1;
        }
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by_key(|(_, (count, first))| (std::cmp::Reverse(*count), *first));
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, (count, _))| (word.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn rows(texts: &[&str]) -> Vec<ExportRow> {
        texts
            .iter()
            .map(|t| ExportRow::new(NaiveDateTime::default(), "general", "alice", *t))
            .collect()
    }

    #[test]
    fn test_stop_words_case_insensitive() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("The"));
        assert!(is_stop_word("DON"));
        assert!(!is_stop_word("deploy"));
    }

    #[test]
    fn test_tokenize_drops_punctuation() {
        let tokens: Vec<_> = tokenize("don't <@U123> :tada: héllo").collect();
        assert_eq!(tokens, ["don", "t", "U123", "tada", "héllo"]);
    }

    #[test]
    fn test_top_keywords_counts_and_order() {
        let data = rows(&[
            "The deploy failed",
            "deploy again, the build is green",
            "Build the deploy",
        ]);
        let top = top_keywords(&data, 3);
        assert_eq!(
            top,
            vec![
                ("deploy".to_string(), 3),
                ("failed".to_string(), 1),
                ("build".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_keywords_case_sensitive_counts() {
        let data = rows(&["Rust rust RUST rust"]);
        let top = top_keywords(&data, 20);
        assert_eq!(top[0], ("rust".to_string(), 2));
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn test_top_keywords_empty() {
        assert!(top_keywords(&rows(&["the a an", ""]), 20).is_empty());
        assert!(top_keywords(&[], 20).is_empty());
    }
}
