//! Core domain logic for moodnote.
//! This crate is the single source of truth for note analysis semantics.

pub mod analysis;
pub mod analytics;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use analysis::lexicon::{CategoryBucket, Lexicons};
pub use analysis::{analyze_content, score_sentiment, Analyzer};
pub use analytics::{
    compute_analytics, compute_analytics_now, reanalyze, reanalyze_at, AnalyticsSnapshot,
    KeywordCount, RecentActivity, SentimentDistribution,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::analysis::{AnalysisResult, Sentiment, SentimentLabel, GENERAL_CATEGORY};
pub use model::note::{AiAnalysis, Note, NoteDraft, NoteId, NotePatch, NoteValidationError};
pub use repo::note_repo::{
    NoteListQuery, NoteRepository, RepoError, RepoResult, SqliteNoteRepository,
};
pub use service::note_service::{NoteService, NoteServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
