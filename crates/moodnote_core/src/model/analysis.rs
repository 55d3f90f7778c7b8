//! Analysis result model attached to notes.
//!
//! # Responsibility
//! - Define the structured annotation produced by the analysis pipeline.
//! - Keep the serialized shape stable for storage and HTTP callers.
//!
//! # Invariants
//! - `Sentiment::score` is within `[-1, 1]`.
//! - `Sentiment::confidence` is within `[0, 1]` and rounded to 2 decimals.
//! - `category` is never empty; `GENERAL_CATEGORY` is the fallback.
//! - `keywords` holds at most 5 unique entries, most frequent first.

use serde::{Deserialize, Serialize};

/// Category assigned when no taxonomy bucket matches.
pub const GENERAL_CATEGORY: &str = "general";

/// Maximum number of keywords kept per analysis.
pub const MAX_KEYWORDS: usize = 5;

/// Polarity label derived from the raw accumulated sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Stable lowercase name used in storage and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Parses a stored label value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// Sentiment annotation for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Normalized score clamped to `[-1, 1]`.
    pub score: f64,
    pub label: SentimentLabel,
    /// Label confidence in `[0, 1]`, two decimals.
    pub confidence: f64,
}

/// Full annotation computed from a note's title and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub category: String,
    pub keywords: Vec<String>,
    /// Present only when content has at least 100 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
