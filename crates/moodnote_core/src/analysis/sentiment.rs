//! Lexicon-based sentiment scoring.
//!
//! # Responsibility
//! - Map raw text to a signed score, a polarity label and a confidence value.
//!
//! # Invariants
//! - The label is derived from the raw accumulated score, never from the
//!   normalized one; a single strong word in a short note crosses the bound.
//! - `score` is clamped to `[-1, 1]`; `confidence` is rounded to 2 decimals.
//! - Scoring is total: every string input yields a result.

use crate::analysis::lexicon::{fuzzy_match, Lexicons};
use crate::model::analysis::{Sentiment, SentimentLabel};

const OVERRIDE_WEIGHT: f64 = 2.0;
const NORMALIZATION_DIVISOR: f64 = 5.0;
const LABEL_THRESHOLD: f64 = 0.5;

/// Scores text with the builtin lexicons.
pub fn score_sentiment(text: &str) -> Sentiment {
    score_sentiment_with(Lexicons::builtin(), text)
}

/// Scores text with caller-provided lexicons.
pub fn score_sentiment_with(lexicons: &Lexicons, text: &str) -> Sentiment {
    let raw = raw_score(lexicons, text);
    let score = (raw / NORMALIZATION_DIVISOR).clamp(-1.0, 1.0);

    let (label, confidence) = if raw > LABEL_THRESHOLD {
        (SentimentLabel::Positive, polar_confidence(score))
    } else if raw < -LABEL_THRESHOLD {
        (SentimentLabel::Negative, polar_confidence(score))
    } else {
        (
            SentimentLabel::Neutral,
            (0.8 - score.abs() * 0.4).max(0.4),
        )
    };

    Sentiment {
        score,
        label,
        confidence: round_two_decimals(confidence),
    }
}

/// Accumulated unnormalized score: base lexicon pass plus override pass.
pub(crate) fn raw_score(lexicons: &Lexicons, text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let mut total = 0.0;

    for token in lowered.split_whitespace() {
        let bare = token.trim_matches(|c: char| !c.is_alphanumeric());
        if let Some(weight) = lexicons.polarity.get(bare) {
            total += weight;
        }

        // Runs on every token, independently of base-lexicon hits.
        if lexicons
            .positive_overrides
            .iter()
            .any(|word| fuzzy_match(token, word))
        {
            total += OVERRIDE_WEIGHT;
        }
        if lexicons
            .negative_overrides
            .iter()
            .any(|word| fuzzy_match(token, word))
        {
            total -= OVERRIDE_WEIGHT;
        }
    }

    total
}

fn polar_confidence(score: f64) -> f64 {
    (0.6 + score.abs() * 0.35).min(0.95)
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
