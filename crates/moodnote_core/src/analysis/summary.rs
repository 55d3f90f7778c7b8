//! First-sentence summary generation.
//!
//! # Invariants
//! - Content shorter than `MIN_SUMMARY_SOURCE_CHARS` has no summary.
//! - A summary never exceeds `MAX_SUMMARY_CHARS` characters.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));

/// Minimum content length, in characters, before a summary is produced.
pub const MIN_SUMMARY_SOURCE_CHARS: usize = 100;
/// Longest summary returned, including the ellipsis.
pub const MAX_SUMMARY_CHARS: usize = 150;
const ELLIPSIS: &str = "...";

/// Summarizes note content by its first sentence.
pub fn generate_summary(content: &str) -> Option<String> {
    let length = content.chars().count();
    if length < MIN_SUMMARY_SOURCE_CHARS {
        return None;
    }

    if let Some(sentence) = SENTENCE_END_RE
        .split(content)
        .map(str::trim)
        .find(|sentence| !sentence.is_empty())
    {
        return Some(truncate_with_ellipsis(sentence));
    }

    if length > MAX_SUMMARY_CHARS {
        Some(truncate_with_ellipsis(content))
    } else {
        None
    }
}

fn truncate_with_ellipsis(text: &str) -> String {
    if text.chars().count() <= MAX_SUMMARY_CHARS {
        return text.to_string();
    }
    let keep = MAX_SUMMARY_CHARS - ELLIPSIS.len();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::{generate_summary, MAX_SUMMARY_CHARS};

    #[test]
    fn short_content_has_no_summary() {
        assert_eq!(generate_summary(&"a".repeat(99)), None);
    }

    #[test]
    fn takes_first_non_empty_sentence() {
        let content = format!("...  First sentence here! {}", "tail ".repeat(30));
        assert_eq!(generate_summary(&content).as_deref(), Some("First sentence here"));
    }

    #[test]
    fn long_first_sentence_is_truncated() {
        let content = format!("{}. rest", "word ".repeat(60));
        let summary = generate_summary(&content).expect("summary should exist");
        assert_eq!(summary.chars().count(), MAX_SUMMARY_CHARS);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn terminator_only_content_falls_back_to_length_rule() {
        assert_eq!(generate_summary(&".".repeat(120)), None);
        let summary = generate_summary(&"!".repeat(200)).expect("summary should exist");
        assert_eq!(summary.chars().count(), MAX_SUMMARY_CHARS);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 60 two-byte characters: 120 bytes but below the character threshold.
        assert_eq!(generate_summary(&"ş".repeat(60)), None);
    }
}
