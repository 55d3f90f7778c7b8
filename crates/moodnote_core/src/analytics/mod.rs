//! Corpus-level statistics over analyzed notes.
//!
//! # Responsibility
//! - Fold persisted analysis attributes into an `AnalyticsSnapshot`.
//! - Recompute analysis for a batch of notes without touching storage.
//!
//! # Invariants
//! - Aggregation never runs the analyzer; it only reads stored attributes.
//! - Snapshots are derived on demand and never persisted.

pub mod aggregate;

pub use aggregate::{
    compute_analytics, compute_analytics_now, reanalyze, reanalyze_at, AnalyticsSnapshot,
    KeywordCount, RecentActivity, SentimentDistribution,
};
