//! Note use-case service.
//!
//! # Responsibility
//! - Run content analysis on the write path and persist it with the note.
//! - Provide reanalysis sweeps and on-demand analytics for one user.
//!
//! # Invariants
//! - Create always analyzes; update re-analyzes only when title or content
//!   changed, otherwise the stored analysis is kept as is.
//! - Reanalysis overwrites analysis unconditionally and leaves `updated_at`
//!   untouched.
//! - Note text never reaches the logs; only ids, lengths and counts do.

use crate::analysis::Analyzer;
use crate::analytics::{compute_analytics, reanalyze_at, AnalyticsSnapshot};
use crate::clock::{now_epoch_ms, Clock};
use crate::model::note::{Note, NoteDraft, NoteId, NotePatch, NoteValidationError};
use crate::repo::note_repo::{NoteListQuery, NoteRepository, RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Caller supplied unusable input. Never retried.
    InvalidInput(NoteValidationError),
    NoteNotFound(NoteId),
    Repo(RepoError),
    /// Write succeeded but read-back disagrees.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

/// Note service facade over a repository implementation.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    analyzer: Analyzer<'static>,
    clock: Clock,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service with builtin lexicons and the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, now_epoch_ms)
    }

    /// Creates a service with a custom time source.
    pub fn with_clock(repo: R, clock: Clock) -> Self {
        Self {
            repo,
            analyzer: Analyzer::builtin(),
            clock,
        }
    }

    /// Replaces the analyzer used on write paths.
    pub fn with_analyzer(mut self, analyzer: Analyzer<'static>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Validates, analyzes and persists a new note owned by `owner`.
    pub fn create_note(&self, owner: &str, draft: NoteDraft) -> Result<Note, NoteServiceError> {
        draft.validate()?;

        let now = (self.clock)();
        let mut note = Note::from_draft(owner, draft, now);
        let started_at = Instant::now();
        note.apply_analysis(self.analyzer.analyze(&note.title, &note.content), now);

        let id = self.repo.create_note(&note)?;
        info!(
            "event=note_create module=service status=ok note_id={} content_chars={} category={} keywords={} analysis_us={}",
            id,
            note.content.chars().count(),
            note.category.as_deref().unwrap_or_default(),
            note.keywords().len(),
            started_at.elapsed().as_micros()
        );

        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Applies a partial update.
    ///
    /// Analysis is recomputed only when the title or content value changes.
    pub fn update_note(&self, id: NoteId, patch: NotePatch) -> Result<Note, NoteServiceError> {
        let mut note = self
            .repo
            .get_note(id)?
            .ok_or(NoteServiceError::NoteNotFound(id))?;

        let mut text_changed = false;
        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(NoteValidationError::BlankTitle.into());
            }
            text_changed |= title != note.title;
            note.title = title;
        }
        if let Some(content) = patch.content {
            if content.trim().is_empty() {
                return Err(NoteValidationError::BlankContent.into());
            }
            text_changed |= content != note.content;
            note.content = content;
        }
        if patch.image_url.is_some() {
            note.image_url = patch.image_url;
        }
        if patch.icon.is_some() {
            note.icon = patch.icon;
        }

        let now = (self.clock)();
        note.updated_at = now;
        if text_changed {
            note.apply_analysis(self.analyzer.analyze(&note.title, &note.content), now);
        }

        self.repo.update_note(&note)?;
        info!(
            "event=note_update module=service status=ok note_id={} reanalyzed={}",
            id, text_changed
        );

        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "updated note not found in read-back",
            ))
    }

    pub fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.repo.get_note(id)
    }

    /// Lists notes owned by or shared with the query viewer.
    pub fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<Note>> {
        self.repo.list_notes(query)
    }

    pub fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(id)?;
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }

    /// Makes a note visible to `user`.
    pub fn share_note(&self, id: NoteId, user: &str) -> Result<Note, NoteServiceError> {
        if user.trim().is_empty() {
            warn!("event=note_share module=service status=error note_id={id} error_code=blank_user");
            return Err(NoteValidationError::BlankShareTarget.into());
        }
        self.repo.share_note(id, user)?;
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "shared note not found in read-back",
            ))
    }

    /// Recomputes analysis for every note owned by `owner`.
    ///
    /// Returns the number of notes rewritten. Stops at the first storage
    /// failure; notes written before it keep their new analysis.
    pub fn reanalyze_all(&self, owner: &str) -> Result<usize, NoteServiceError> {
        let started_at = Instant::now();
        let owned: Vec<Note> = self
            .repo
            .list_notes(&NoteListQuery::all_for(owner))?
            .into_iter()
            .filter(|note| note.owner == owner)
            .collect();

        let refreshed = reanalyze_at(&self.analyzer, &owned, (self.clock)());
        for note in &refreshed {
            self.repo.save_analysis(note)?;
        }

        info!(
            "event=notes_reanalyze module=service status=ok count={} duration_ms={}",
            refreshed.len(),
            started_at.elapsed().as_millis()
        );
        Ok(refreshed.len())
    }

    /// Computes analytics over notes owned by or shared with `viewer`.
    pub fn analytics(&self, viewer: &str) -> Result<AnalyticsSnapshot, NoteServiceError> {
        let notes = self.repo.list_notes(&NoteListQuery::all_for(viewer))?;
        Ok(compute_analytics(&notes, (self.clock)()))
    }
}
