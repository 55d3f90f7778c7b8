use moodnote_core::db::open_db_in_memory;
use moodnote_core::{
    Note, NoteDraft, NoteListQuery, NotePatch, NoteRepository, NoteService, NoteServiceError,
    NoteValidationError, SentimentLabel, SqliteNoteRepository,
};
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

static TICK: AtomicI64 = AtomicI64::new(1_700_000_000_000);

fn ticking_clock() -> i64 {
    TICK.fetch_add(1_000, Ordering::SeqCst)
}

#[test]
fn create_note_persists_analysis() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::with_clock(SqliteNoteRepository::try_new(&conn).unwrap(), ticking_clock);

    let note = service
        .create_note(
            "alice",
            NoteDraft::new("Trip", "Flight and hotel booked for the vacation"),
        )
        .unwrap();

    assert_eq!(note.owner, "alice");
    assert_eq!(note.category.as_deref(), Some("travel"));
    assert!(note.sentiment.is_some());
    let analysis = note.ai_analysis.as_ref().expect("analysis should be stored");
    assert_eq!(analysis.processed_at, note.created_at);
    assert!(analysis.keywords.iter().any(|keyword| keyword == "flight"));
    assert_eq!(analysis.summary, None);
    assert_eq!(service.get_note(note.id).unwrap(), Some(note));
}

#[test]
fn create_note_rejects_blank_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::with_clock(SqliteNoteRepository::try_new(&conn).unwrap(), ticking_clock);

    let err = service
        .create_note("alice", NoteDraft::new("   ", "body"))
        .unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::InvalidInput(NoteValidationError::BlankTitle)
    ));

    let err = service
        .create_note("alice", NoteDraft::new("title", ""))
        .unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::InvalidInput(NoteValidationError::BlankContent)
    ));
    assert!(service
        .list_notes(&NoteListQuery::all_for("alice"))
        .unwrap()
        .is_empty());
}

#[test]
fn update_without_text_change_keeps_analysis() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::with_clock(SqliteNoteRepository::try_new(&conn).unwrap(), ticking_clock);
    let created = service
        .create_note("alice", NoteDraft::new("Trip", "Flight and hotel booked"))
        .unwrap();

    let updated = service
        .update_note(
            created.id,
            NotePatch {
                icon: Some("plane".to_string()),
                title: Some("Trip".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.icon.as_deref(), Some("plane"));
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.ai_analysis, created.ai_analysis);
    assert_eq!(updated.category, created.category);
}

#[test]
fn update_with_new_content_reanalyzes() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::with_clock(SqliteNoteRepository::try_new(&conn).unwrap(), ticking_clock);
    let created = service
        .create_note("alice", NoteDraft::new("Trip", "Flight and hotel booked"))
        .unwrap();

    let updated = service
        .update_note(
            created.id,
            NotePatch {
                title: Some("Checkup".to_string()),
                content: Some("Doctor visit, medicine and exercise plan".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.category.as_deref(), Some("health"));
    let before = created.ai_analysis.unwrap().processed_at;
    let after = updated.ai_analysis.unwrap().processed_at;
    assert!(after > before);
    assert_eq!(after, updated.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn update_rejects_blank_patch_and_missing_note() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::with_clock(SqliteNoteRepository::try_new(&conn).unwrap(), ticking_clock);
    let created = service
        .create_note("alice", NoteDraft::new("Trip", "Flight booked"))
        .unwrap();

    let err = service
        .update_note(
            created.id,
            NotePatch {
                content: Some("  ".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::InvalidInput(NoteValidationError::BlankContent)
    ));

    let missing = Uuid::new_v4();
    let err = service
        .update_note(missing, NotePatch::default())
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(id) if id == missing));
}

#[test]
fn reanalyze_all_fills_missing_analysis_without_touching_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let raw_repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::with_clock(SqliteNoteRepository::try_new(&conn).unwrap(), ticking_clock);

    let bare = Note::from_draft("alice", NoteDraft::new("Diary", "Bugün harika bir gün"), 42);
    raw_repo.create_note(&bare).unwrap();
    let other = Note::from_draft("carol", NoteDraft::new("Lunch", "Pasta recipe"), 43);
    raw_repo.create_note(&other).unwrap();

    assert_eq!(service.reanalyze_all("alice").unwrap(), 1);

    let refreshed = service.get_note(bare.id).unwrap().unwrap();
    assert_eq!(
        refreshed.sentiment.map(|sentiment| sentiment.label),
        Some(SentimentLabel::Positive)
    );
    assert!(refreshed.ai_analysis.is_some());
    assert_eq!(refreshed.updated_at, 42);

    let untouched = service.get_note(other.id).unwrap().unwrap();
    assert!(untouched.ai_analysis.is_none());
}

#[test]
fn shared_notes_count_in_analytics_but_not_in_reanalysis() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::with_clock(SqliteNoteRepository::try_new(&conn).unwrap(), ticking_clock);
    let note = service
        .create_note("alice", NoteDraft::new("Trip", "Flight and hotel booked"))
        .unwrap();

    assert_eq!(service.analytics("bob").unwrap().total_notes, 0);

    service.share_note(note.id, "bob").unwrap();
    service.share_note(note.id, "bob").unwrap();

    let snapshot = service.analytics("bob").unwrap();
    assert_eq!(snapshot.total_notes, 1);
    assert_eq!(snapshot.category_distribution.get("travel"), Some(&1));
    assert_eq!(snapshot.recent_activity.this_week, 1);
    assert_eq!(service.reanalyze_all("bob").unwrap(), 0);
    assert_eq!(
        service.list_notes(&NoteListQuery::all_for("bob")).unwrap().len(),
        1
    );
}

#[test]
fn share_rejects_blank_user_and_unknown_note() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::with_clock(SqliteNoteRepository::try_new(&conn).unwrap(), ticking_clock);
    let note = service
        .create_note("alice", NoteDraft::new("Trip", "Flight booked"))
        .unwrap();

    assert!(matches!(
        service.share_note(note.id, " ").unwrap_err(),
        NoteServiceError::InvalidInput(NoteValidationError::BlankShareTarget)
    ));
    assert!(matches!(
        service.share_note(Uuid::new_v4(), "bob").unwrap_err(),
        NoteServiceError::NoteNotFound(_)
    ));
}

#[test]
fn list_orders_by_most_recent_update() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::with_clock(SqliteNoteRepository::try_new(&conn).unwrap(), ticking_clock);
    let first = service
        .create_note("alice", NoteDraft::new("First", "one"))
        .unwrap();
    let second = service
        .create_note("alice", NoteDraft::new("Second", "two"))
        .unwrap();
    service
        .update_note(
            first.id,
            NotePatch {
                icon: Some("pin".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap();

    let ids: Vec<_> = service
        .list_notes(&NoteListQuery::all_for("alice"))
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let page = NoteListQuery {
        limit: Some(1),
        offset: 1,
        ..NoteListQuery::all_for("alice")
    };
    let ids: Vec<_> = service
        .list_notes(&page)
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(ids, vec![second.id]);
}

#[test]
fn delete_removes_note_and_reports_missing() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::with_clock(SqliteNoteRepository::try_new(&conn).unwrap(), ticking_clock);
    let note = service
        .create_note("alice", NoteDraft::new("Trip", "Flight booked"))
        .unwrap();
    service.share_note(note.id, "bob").unwrap();

    service.delete_note(note.id).unwrap();
    assert_eq!(service.get_note(note.id).unwrap(), None);
    assert!(service
        .list_notes(&NoteListQuery::all_for("bob"))
        .unwrap()
        .is_empty());
    assert!(matches!(
        service.delete_note(note.id).unwrap_err(),
        NoteServiceError::NoteNotFound(_)
    ));
}
