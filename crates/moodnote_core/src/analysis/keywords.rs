//! Frequency-ranked keyword extraction.
//!
//! # Invariants
//! - Stop words and tokens of 2 characters or fewer are never returned.
//! - At most `MAX_KEYWORDS` unique tokens, most frequent first.
//! - Equal frequencies keep first-occurrence order.

use crate::analysis::lexicon::Lexicons;
use crate::model::analysis::MAX_KEYWORDS;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation regex"));

const MIN_KEYWORD_CHARS: usize = 3;

/// Returns the top keywords of `text`.
pub fn extract_keywords(lexicons: &Lexicons, text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION_RE.replace_all(&lowered, " ");
    let terms = stripped.split_whitespace().filter(|token| {
        token.chars().count() >= MIN_KEYWORD_CHARS && !lexicons.is_stop_word(token)
    });

    rank_by_frequency(terms)
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(term, _)| term)
        .collect()
}

/// Counts terms and sorts them by descending count.
///
/// Equal counts keep first-occurrence order.
pub(crate) fn rank_by_frequency<'t>(
    terms: impl IntoIterator<Item = &'t str>,
) -> Vec<(String, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for term in terms {
        match positions.get(term) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(term, counts.len());
                counts.push((term.to_string(), 1));
            }
        }
    }

    // `sort_by` is stable.
    counts.sort_by(|(_, left), (_, right)| right.cmp(left));
    counts
}

#[cfg(test)]
mod tests {
    use super::{extract_keywords, rank_by_frequency};
    use crate::analysis::lexicon::Lexicons;

    #[test]
    fn rank_keeps_first_occurrence_order_for_ties() {
        let ranked = rank_by_frequency(["b", "a", "c", "a", "b", "d"]);
        assert_eq!(
            ranked,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
    }

    #[test]
    fn ranks_by_frequency_and_caps_at_five() {
        let text = "rust rust rust cargo cargo crate crate borrow trait trait trait trait macro";
        let keywords = extract_keywords(Lexicons::builtin(), text);
        assert_eq!(keywords, vec!["trait", "rust", "cargo", "crate", "borrow"]);
    }

    #[test]
    fn drops_stop_words_short_tokens_and_punctuation() {
        let text = "The cat, the CAT! and it is on a mat; ve bir için";
        let keywords = extract_keywords(Lexicons::builtin(), text);
        assert_eq!(keywords, vec!["cat", "mat"]);
    }

    #[test]
    fn keeps_turkish_letters_inside_tokens() {
        let keywords = extract_keywords(Lexicons::builtin(), "güzel şehir, güzel gün");
        assert_eq!(keywords, vec!["güzel", "şehir", "gün"]);
    }

    #[test]
    fn empty_text_has_no_keywords() {
        assert!(extract_keywords(Lexicons::builtin(), "").is_empty());
    }
}
