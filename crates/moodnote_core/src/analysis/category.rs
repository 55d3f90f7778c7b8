//! Taxonomy-based category inference.
//!
//! # Invariants
//! - The result is always a taxonomy bucket name or `GENERAL_CATEGORY`.
//! - Equal scores resolve to the bucket declared first.

use crate::analysis::lexicon::{category_match, Lexicons};
use crate::model::analysis::GENERAL_CATEGORY;

/// Picks the best-matching taxonomy bucket for `text`.
///
/// Every (keyword, token) pair that matches adds one to the bucket score.
pub fn infer_category(lexicons: &Lexicons, text: &str) -> String {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    let mut best: Option<(&str, usize)> = None;
    for bucket in &lexicons.categories {
        let score: usize = bucket
            .keywords
            .iter()
            .map(|keyword| {
                tokens
                    .iter()
                    .filter(|token| category_match(token, keyword))
                    .count()
            })
            .sum();

        if score > best.map_or(0, |(_, top)| top) {
            best = Some((bucket.name.as_str(), score));
        }
    }

    best.map_or_else(|| GENERAL_CATEGORY.to_string(), |(name, _)| name.to_string())
}
