//! Analytics fold and batch reanalysis.
//!
//! # Invariants
//! - Notes without sentiment are excluded from the sentiment distribution
//!   and from the average score.
//! - `this_week` and `this_month` are independent trailing windows.
//! - `top_keywords` holds at most `TOP_KEYWORDS_LIMIT` entries; ties keep
//!   first-encountered order.

use crate::analysis::keywords::rank_by_frequency;
use crate::analysis::Analyzer;
use crate::clock::now_epoch_ms;
use crate::model::analysis::SentimentLabel;
use crate::model::note::Note;
use serde::Serialize;
use std::collections::BTreeMap;

/// Maximum number of keywords reported in a snapshot.
pub const TOP_KEYWORDS_LIMIT: usize = 10;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;

/// Note counts per sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// Keyword with its occurrence count across a note collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Notes modified inside the trailing 7 and 30 day windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub this_week: usize,
    pub this_month: usize,
}

/// Summary statistics for one note collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_notes: usize,
    pub sentiment_distribution: SentimentDistribution,
    pub category_distribution: BTreeMap<String, usize>,
    /// Mean score over notes with sentiment; `0.0` when there are none.
    pub average_sentiment_score: f64,
    pub top_keywords: Vec<KeywordCount>,
    pub recent_activity: RecentActivity,
}

/// Folds `notes` into a snapshot using the system clock as "now".
pub fn compute_analytics_now(notes: &[Note]) -> AnalyticsSnapshot {
    compute_analytics(notes, now_epoch_ms())
}

/// Folds `notes` into a snapshot relative to `now_ms` (epoch milliseconds).
pub fn compute_analytics(notes: &[Note], now_ms: i64) -> AnalyticsSnapshot {
    let mut sentiment_distribution = SentimentDistribution::default();
    let mut category_distribution = BTreeMap::new();
    let mut recent_activity = RecentActivity::default();
    let mut score_sum = 0.0;
    let mut scored = 0usize;
    let week_start = now_ms.saturating_sub(WEEK_MS);
    let month_start = now_ms.saturating_sub(MONTH_MS);

    for note in notes {
        if let Some(sentiment) = note.sentiment.as_ref() {
            match sentiment.label {
                SentimentLabel::Positive => sentiment_distribution.positive += 1,
                SentimentLabel::Negative => sentiment_distribution.negative += 1,
                SentimentLabel::Neutral => sentiment_distribution.neutral += 1,
            }
            score_sum += sentiment.score;
            scored += 1;
        }

        if let Some(category) = note.category.as_deref().filter(|value| !value.is_empty()) {
            *category_distribution
                .entry(category.to_string())
                .or_insert(0) += 1;
        }

        if note.updated_at >= week_start {
            recent_activity.this_week += 1;
        }
        if note.updated_at >= month_start {
            recent_activity.this_month += 1;
        }
    }

    let top_keywords = rank_by_frequency(
        notes
            .iter()
            .flat_map(|note| note.keywords().iter().map(String::as_str)),
    )
    .into_iter()
    .take(TOP_KEYWORDS_LIMIT)
    .map(|(keyword, count)| KeywordCount { keyword, count })
    .collect();

    AnalyticsSnapshot {
        total_notes: notes.len(),
        sentiment_distribution,
        category_distribution,
        average_sentiment_score: if scored == 0 {
            0.0
        } else {
            score_sum / scored as f64
        },
        top_keywords,
        recent_activity,
    }
}

/// Recomputes analysis for every note, stamping `processed_at` with the clock.
pub fn reanalyze(notes: &[Note]) -> Vec<Note> {
    reanalyze_at(&Analyzer::builtin(), notes, now_epoch_ms())
}

/// Recomputes analysis for every note unconditionally.
///
/// Returns updated copies; writing them back is the caller's job. Each note
/// is independent, so callers may split the slice across workers.
pub fn reanalyze_at(analyzer: &Analyzer<'_>, notes: &[Note], processed_at: i64) -> Vec<Note> {
    notes
        .iter()
        .map(|note| {
            let mut updated = note.clone();
            updated.apply_analysis(analyzer.analyze(&note.title, &note.content), processed_at);
            updated
        })
        .collect()
}
