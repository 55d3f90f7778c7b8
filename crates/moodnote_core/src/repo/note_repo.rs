//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist notes together with their embedded analysis attributes.
//! - Answer "notes visible to a user" queries (owned or shared).
//!
//! # Invariants
//! - Analysis columns are written as one unit; a row never carries a
//!   sentiment label without its score and confidence.
//! - `save_analysis` does not touch `updated_at`.
//! - Visible-note lists are sorted by `updated_at DESC, id ASC`.

use crate::db::DbError;
use crate::model::analysis::{Sentiment, SentimentLabel};
use crate::model::note::{AiAnalysis, Note, NoteId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTES_DEFAULT_LIMIT: u32 = 20;
const NOTES_LIMIT_MAX: u32 = 200;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    owner,
    title,
    content,
    image_url,
    icon,
    sentiment_score,
    sentiment_label,
    sentiment_confidence,
    category,
    analysis_processed_at,
    analysis_keywords,
    analysis_summary,
    created_at,
    updated_at
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(NoteId),
    /// Storage is missing a table this repository needs.
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing notes visible to one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListQuery {
    /// Notes owned by or shared with this user.
    pub viewer: String,
    /// `None` returns every visible note; otherwise clamped by
    /// `normalize_note_limit`.
    pub limit: Option<u32>,
    pub offset: u32,
}

impl NoteListQuery {
    /// Unpaginated query over everything `viewer` can see.
    pub fn all_for(viewer: impl Into<String>) -> Self {
        Self {
            viewer: viewer.into(),
            limit: None,
            offset: 0,
        }
    }
}

/// Persistence boundary used by `NoteService`.
pub trait NoteRepository {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces every mutable column, analysis included.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    /// Replaces analysis columns only.
    fn save_analysis(&self, note: &Note) -> RepoResult<()>;
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<Note>>;
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    /// Grants `user` read visibility on a note. Idempotent.
    fn share_note(&self, id: NoteId, user: &str) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in ["notes", "note_shares"] {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        let columns = AnalysisColumns::from_note(note)?;
        self.conn.execute(
            "INSERT INTO notes (
                id,
                owner,
                title,
                content,
                image_url,
                icon,
                sentiment_score,
                sentiment_label,
                sentiment_confidence,
                category,
                analysis_processed_at,
                analysis_keywords,
                analysis_summary,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15);",
            params![
                note.id.to_string(),
                note.owner.as_str(),
                note.title.as_str(),
                note.content.as_str(),
                note.image_url.as_deref(),
                note.icon.as_deref(),
                columns.score,
                columns.label,
                columns.confidence,
                columns.category,
                columns.processed_at,
                columns.keywords,
                columns.summary,
                note.created_at,
                note.updated_at,
            ],
        )?;
        Ok(note.id)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        let columns = AnalysisColumns::from_note(note)?;
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?2,
                content = ?3,
                image_url = ?4,
                icon = ?5,
                sentiment_score = ?6,
                sentiment_label = ?7,
                sentiment_confidence = ?8,
                category = ?9,
                analysis_processed_at = ?10,
                analysis_keywords = ?11,
                analysis_summary = ?12,
                updated_at = ?13
             WHERE id = ?1;",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.content.as_str(),
                note.image_url.as_deref(),
                note.icon.as_deref(),
                columns.score,
                columns.label,
                columns.confidence,
                columns.category,
                columns.processed_at,
                columns.keywords,
                columns.summary,
                note.updated_at,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }
        Ok(())
    }

    fn save_analysis(&self, note: &Note) -> RepoResult<()> {
        let columns = AnalysisColumns::from_note(note)?;
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                sentiment_score = ?2,
                sentiment_label = ?3,
                sentiment_confidence = ?4,
                category = ?5,
                analysis_processed_at = ?6,
                analysis_keywords = ?7,
                analysis_summary = ?8
             WHERE id = ?1;",
            params![
                note.id.to_string(),
                columns.score,
                columns.label,
                columns.confidence,
                columns.category,
                columns.processed_at,
                columns.keywords,
                columns.summary,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }
        Ok(())
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<Note>> {
        let mut sql = format!(
            "{NOTE_SELECT_SQL}
             WHERE owner = ?
                OR EXISTS (
                    SELECT 1
                    FROM note_shares s
                    WHERE s.note_id = notes.id
                      AND s.user_id = ?
                )
             ORDER BY updated_at DESC, id ASC"
        );
        let mut bind_values: Vec<Value> = vec![
            Value::Text(query.viewer.clone()),
            Value::Text(query.viewer.clone()),
        ];

        match query.limit {
            Some(limit) => {
                sql.push_str(" LIMIT ?");
                bind_values.push(Value::Integer(i64::from(normalize_note_limit(Some(limit)))));
                if query.offset > 0 {
                    sql.push_str(" OFFSET ?");
                    bind_values.push(Value::Integer(i64::from(query.offset)));
                }
            }
            None if query.offset > 0 => {
                sql.push_str(" LIMIT -1 OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
            None => {}
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        // note_shares rows go with it through ON DELETE CASCADE.
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn share_note(&self, id: NoteId, user: &str) -> RepoResult<()> {
        let id_text = id.to_string();
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM notes WHERE id = ?1);",
            [id_text.as_str()],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::NotFound(id));
        }

        self.conn.execute(
            "INSERT OR IGNORE INTO note_shares (note_id, user_id) VALUES (?1, ?2);",
            params![id_text, user],
        )?;
        Ok(())
    }
}

/// Normalizes a requested page size.
pub fn normalize_note_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => NOTES_DEFAULT_LIMIT,
        Some(value) if value > NOTES_LIMIT_MAX => NOTES_LIMIT_MAX,
        Some(value) => value,
    }
}

/// Flattened analysis attributes in column form.
struct AnalysisColumns<'a> {
    score: Option<f64>,
    label: Option<&'static str>,
    confidence: Option<f64>,
    category: Option<&'a str>,
    processed_at: Option<i64>,
    keywords: Option<String>,
    summary: Option<&'a str>,
}

impl<'a> AnalysisColumns<'a> {
    fn from_note(note: &'a Note) -> RepoResult<Self> {
        let keywords = match note.ai_analysis.as_ref() {
            Some(analysis) => Some(serde_json::to_string(&analysis.keywords).map_err(|err| {
                RepoError::InvalidData(format!("cannot encode keywords: {err}"))
            })?),
            None => None,
        };

        Ok(Self {
            score: note.sentiment.map(|sentiment| sentiment.score),
            label: note.sentiment.map(|sentiment| sentiment.label.as_str()),
            confidence: note.sentiment.map(|sentiment| sentiment.confidence),
            category: note.category.as_deref(),
            processed_at: note.ai_analysis.as_ref().map(|analysis| analysis.processed_at),
            keywords,
            summary: note
                .ai_analysis
                .as_ref()
                .and_then(|analysis| analysis.summary.as_deref()),
        })
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{id_text}` in notes.id")))?;

    let score: Option<f64> = row.get("sentiment_score")?;
    let label: Option<String> = row.get("sentiment_label")?;
    let confidence: Option<f64> = row.get("sentiment_confidence")?;
    let sentiment = match (score, label, confidence) {
        (Some(score), Some(label), Some(confidence)) => {
            let label = SentimentLabel::parse(&label).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid sentiment label `{label}` in notes.sentiment_label"
                ))
            })?;
            Some(Sentiment {
                score,
                label,
                confidence,
            })
        }
        (None, None, None) => None,
        _ => {
            return Err(RepoError::InvalidData(format!(
                "partial sentiment columns for note {id}"
            )));
        }
    };

    let processed_at: Option<i64> = row.get("analysis_processed_at")?;
    let ai_analysis = match processed_at {
        Some(processed_at) => {
            let raw_keywords: Option<String> = row.get("analysis_keywords")?;
            let keywords = match raw_keywords {
                Some(raw) => serde_json::from_str(&raw).map_err(|err| {
                    RepoError::InvalidData(format!(
                        "invalid keywords json in notes.analysis_keywords: {err}"
                    ))
                })?,
                None => Vec::new(),
            };
            Some(AiAnalysis {
                processed_at,
                keywords,
                summary: row.get("analysis_summary")?,
            })
        }
        None => None,
    };

    Ok(Note {
        id,
        owner: row.get("owner")?,
        title: row.get("title")?,
        content: row.get("content")?,
        image_url: row.get("image_url")?,
        icon: row.get("icon")?,
        sentiment,
        category: row.get("category")?,
        ai_analysis,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::normalize_note_limit;

    #[test]
    fn limit_defaults_and_caps() {
        assert_eq!(normalize_note_limit(None), 20);
        assert_eq!(normalize_note_limit(Some(0)), 20);
        assert_eq!(normalize_note_limit(Some(5)), 5);
        assert_eq!(normalize_note_limit(Some(1_000)), 200);
    }
}
