//! Deterministic content analysis for notes.
//!
//! # Responsibility
//! - Turn a `(title, content)` pair into an `AnalysisResult`.
//! - Keep every pass pure: no I/O, no clock, no shared mutable state.
//!
//! # Invariants
//! - Sentiment, category and keywords read `title + " " + content`.
//! - Summary reads `content` only.
//! - Identical inputs always produce identical results.

pub mod category;
pub mod keywords;
pub mod lexicon;
pub mod sentiment;
pub mod summary;

use crate::model::analysis::{AnalysisResult, Sentiment};
use lexicon::Lexicons;

pub use category::infer_category;
pub use keywords::extract_keywords;
pub use sentiment::{score_sentiment, score_sentiment_with};
pub use summary::generate_summary;

/// Analyzes note text with the builtin lexicons.
pub fn analyze_content(title: &str, content: &str) -> AnalysisResult {
    Analyzer::builtin().analyze(title, content)
}

/// Analysis entry point bound to one immutable set of lexicons.
///
/// Cheap to copy and safe to share across threads; callers fanning out a
/// reanalysis sweep can use one instance per worker or a shared reference.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    lexicons: &'a Lexicons,
}

impl Analyzer<'static> {
    pub fn builtin() -> Self {
        Self::new(Lexicons::builtin())
    }
}

impl Default for Analyzer<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> Analyzer<'a> {
    pub fn new(lexicons: &'a Lexicons) -> Self {
        Self { lexicons }
    }

    pub fn lexicons(&self) -> &'a Lexicons {
        self.lexicons
    }

    /// Runs every pass and assembles the result.
    pub fn analyze(&self, title: &str, content: &str) -> AnalysisResult {
        let full_text = format!("{title} {content}");

        AnalysisResult {
            sentiment: self.score_sentiment(&full_text),
            category: infer_category(self.lexicons, &full_text),
            keywords: extract_keywords(self.lexicons, &full_text),
            summary: generate_summary(content),
        }
    }

    pub fn score_sentiment(&self, text: &str) -> Sentiment {
        score_sentiment_with(self.lexicons, text)
    }
}
