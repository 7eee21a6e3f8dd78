//! Scoring Write Path Tests
//!
//! Exercises the strength score through the real store write paths:
//! interaction logging, direct last-interaction writes, and cascade
//! deletion.

use chrono::{Duration, Utc};

use kinkeeper::models::interaction::{InteractionType, NewInteraction};
use kinkeeper::models::relationship::{NewRelationship, RelationshipType};
use kinkeeper::models::suggestion::NewSuggestion;
use kinkeeper::services::relationships::RelationshipStore;
use kinkeeper::services::suggestions::SuggestionStore;
use kinkeeper::Database;
use kinkeeper::SuggestionType;

fn setup() -> (Database, RelationshipStore) {
    let db = Database::new_in_memory().unwrap();
    let store = RelationshipStore::from_database(&db);
    (db, store)
}

fn new_relationship(name: &str) -> NewRelationship {
    NewRelationship {
        display_name: name.into(),
        relationship_type: RelationshipType::Friend,
        important_dates: Default::default(),
        preferences: Default::default(),
    }
}

fn interaction(relationship_id: &str, days_ago: i64) -> NewInteraction {
    NewInteraction {
        relationship_id: relationship_id.into(),
        timestamp: Some(Utc::now() - Duration::days(days_ago)),
        interaction_type: InteractionType::MessageSent,
        description: "checked in".into(),
    }
}

#[test]
fn score_evolves_through_interaction_sequence() {
    let (_db, store) = setup();
    let rel = store.create("user-1", new_relationship("Alice")).unwrap();
    assert_eq!(rel.strength_score, 50);

    // Fresh interaction: +10
    let (_, rel) = store
        .record_interaction("user-1", interaction(&rel.id, 0))
        .unwrap();
    assert_eq!(rel.strength_score, 60);

    // Another fresh one: +10 again
    let (_, rel) = store
        .record_interaction("user-1", interaction(&rel.id, 1))
        .unwrap();
    assert_eq!(rel.strength_score, 70);

    // A backdated log far in the past decays the score
    let (_, rel) = store
        .record_interaction("user-1", interaction(&rel.id, 60))
        .unwrap();
    assert_eq!(rel.strength_score, 55);

    // Clearing the interaction history resets to baseline
    let rel = store.set_last_interaction("user-1", &rel.id, None).unwrap();
    assert_eq!(rel.strength_score, 30);
    assert!(rel.last_interaction_date.is_none());
}

#[test]
fn score_never_leaves_bounds_through_write_path() {
    let (_db, store) = setup();
    let rel = store.create("user-1", new_relationship("Alice")).unwrap();

    // Push upward well past the cap
    for _ in 0..10 {
        let (_, updated) = store
            .record_interaction("user-1", interaction(&rel.id, 0))
            .unwrap();
        assert!(updated.strength_score <= 100);
    }
    assert_eq!(store.get("user-1", &rel.id).unwrap().strength_score, 100);

    // Push downward well past the floor
    for _ in 0..10 {
        let updated = store
            .set_last_interaction("user-1", &rel.id, Some(Utc::now() - Duration::days(90)))
            .unwrap();
        assert!(updated.strength_score >= 0);
    }
    assert_eq!(store.get("user-1", &rel.id).unwrap().strength_score, 0);
}

#[test]
fn no_passive_decay_without_writes() {
    let (db, store) = setup();
    let rel = store.create("user-1", new_relationship("Alice")).unwrap();
    let (_, rel) = store
        .record_interaction("user-1", interaction(&rel.id, 0))
        .unwrap();
    assert_eq!(rel.strength_score, 60);

    // Simulate the stored interaction date aging far into the past
    // without any new write to it
    let conn = db.conn().unwrap();
    conn.execute(
        "UPDATE relationships SET last_interaction_date = ?2 WHERE id = ?1",
        rusqlite::params![
            rel.id,
            (Utc::now() - Duration::days(200)).to_rfc3339()
        ],
    )
    .unwrap();
    drop(conn);

    // Reads do not recompute; the score stays stale by design
    assert_eq!(store.get("user-1", &rel.id).unwrap().strength_score, 60);

    // The next write to last_interaction_date finally applies the decay
    let updated = store
        .set_last_interaction(
            "user-1",
            &rel.id,
            Some(Utc::now() - Duration::days(200)),
        )
        .unwrap();
    assert_eq!(updated.strength_score, 45);
}

#[test]
fn deleting_relationship_cascades_logs_and_suggestions() {
    let (db, store) = setup();
    let suggestions = SuggestionStore::from_database(&db);

    let rel = store.create("user-1", new_relationship("Alice")).unwrap();
    store
        .record_interaction("user-1", interaction(&rel.id, 1))
        .unwrap();
    suggestions
        .insert(NewSuggestion {
            owner_id: "user-1".into(),
            relationship_id: Some(rel.id.clone()),
            suggestion_type: SuggestionType::Gift,
            suggestion_text: "A book by their favorite author".into(),
        })
        .unwrap();

    store.delete("user-1", &rel.id).unwrap();

    let conn = db.conn().unwrap();
    let logs: i64 = conn
        .query_row("SELECT COUNT(*) FROM interaction_logs", [], |r| r.get(0))
        .unwrap();
    let suggs: i64 = conn
        .query_row("SELECT COUNT(*) FROM ai_suggestions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(logs, 0);
    assert_eq!(suggs, 0);
}
