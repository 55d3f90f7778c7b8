//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its embedded analysis attributes.
//! - Validate user-provided drafts before they reach analysis or storage.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `sentiment`, `category` and `ai_analysis` are written together, either
//!   at creation, when title/content change, or during a reanalysis sweep.
//! - `title` and `content` are never blank.

use crate::model::analysis::{AnalysisResult, Sentiment};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Analysis metadata persisted next to the note body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// Unix epoch milliseconds, assigned by the caller of the analyzer.
    pub processed_at: i64,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Persisted note record.
///
/// Serialized with camelCase field names to match the HTTP wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Opaque owner identity issued by the auth layer.
    pub owner: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub icon: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub category: Option<String>,
    pub ai_analysis: Option<AiAnalysis>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Last-modified timestamp used by analytics.
    pub updated_at: i64,
}

impl Note {
    /// Builds an unanalyzed note from a validated draft.
    pub fn from_draft(owner: impl Into<String>, draft: NoteDraft, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            title: draft.title,
            content: draft.content,
            image_url: draft.image_url,
            icon: draft.icon,
            sentiment: None,
            category: None,
            ai_analysis: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Overwrites all analysis attributes from one analyzer result.
    pub fn apply_analysis(&mut self, result: AnalysisResult, processed_at: i64) {
        self.sentiment = Some(result.sentiment);
        self.category = Some(result.category);
        self.ai_analysis = Some(AiAnalysis {
            processed_at,
            keywords: result.keywords,
            summary: result.summary,
        });
    }

    /// Keywords from the embedded analysis, empty when not analyzed yet.
    pub fn keywords(&self) -> &[String] {
        self.ai_analysis
            .as_ref()
            .map(|analysis| analysis.keywords.as_slice())
            .unwrap_or(&[])
    }
}

/// User input for creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_url: None,
            icon: None,
        }
    }

    /// Checks required fields.
    ///
    /// # Errors
    /// - `BlankTitle` when title is empty after trimming.
    /// - `BlankContent` when content is empty after trimming.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::BlankTitle);
        }
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::BlankContent);
        }
        Ok(())
    }
}

/// Partial update for an existing note. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Caller-side input error for note writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    BlankTitle,
    BlankContent,
    /// Share request without a target user.
    BlankShareTarget,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "note title must not be blank"),
            Self::BlankContent => write!(f, "note content must not be blank"),
            Self::BlankShareTarget => write!(f, "share target user must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}
