//! Notification Feed Tests
//!
//! Derives feeds over real stored state, including the combined
//! scenario of a strong, neglected relationship with an upcoming
//! birthday and an exact milestone day.

use chrono::{Duration, Utc};
use rusqlite::params;

use kinkeeper::models::relationship::{NewRelationship, RelationshipType};
use kinkeeper::services::notifications::NotificationService;
use kinkeeper::services::relationships::store::string_map;
use kinkeeper::services::relationships::RelationshipStore;
use kinkeeper::services::suggestions::SuggestionStore;
use kinkeeper::{Database, NotificationKind, Priority};

fn setup() -> (Database, RelationshipStore, NotificationService) {
    let db = Database::new_in_memory().unwrap();
    let relationships = RelationshipStore::from_database(&db);
    let suggestions = SuggestionStore::from_database(&db);
    let service = NotificationService::new(relationships.clone(), suggestions, 30);
    (db, relationships, service)
}

#[test]
fn combined_scenario_orders_by_priority_then_event_date() {
    let (db, relationships, service) = setup();
    let now = Utc::now();
    let today = now.date_naive();

    let birthday = (today + Duration::days(5)).format("%Y-%m-%d").to_string();
    let rel = relationships
        .create(
            "user-1",
            NewRelationship {
                display_name: "Sam".into(),
                relationship_type: RelationshipType::Family,
                important_dates: string_map(&[("Birthday", birthday.as_str())]),
                preferences: Default::default(),
            },
        )
        .unwrap();

    // Shape the stored state directly: strong score, created exactly
    // 100 days ago, last interaction 40 days ago
    let conn = db.conn().unwrap();
    conn.execute(
        "UPDATE relationships SET strength_score = 85, created_at = ?2, \
         last_interaction_date = ?3 WHERE id = ?1",
        params![
            rel.id,
            (now - Duration::days(100)).to_rfc3339(),
            (now - Duration::days(40)).to_rfc3339(),
        ],
    )
    .unwrap();
    drop(conn);

    let feed = service.feed_for("user-1", today).unwrap();
    assert_eq!(feed.len(), 3);

    // Reminder is high (40 quiet days), the rest are medium; among the
    // mediums the milestone (event date today) precedes the birthday
    // (event date in 5 days)
    assert_eq!(feed[0].kind, NotificationKind::Reminder);
    assert_eq!(feed[0].priority, Priority::High);
    assert_eq!(feed[1].kind, NotificationKind::Milestone);
    assert_eq!(feed[1].priority, Priority::Medium);
    assert_eq!(feed[2].kind, NotificationKind::Birthday);
    assert_eq!(feed[2].priority, Priority::Medium);
    assert_eq!(feed[2].event_date, today + Duration::days(5));
}

#[test]
fn rerunning_a_pass_never_double_counts() {
    let (_db, relationships, service) = setup();
    let today = Utc::now().date_naive();

    let birthday = (today + Duration::days(2)).format("%Y-%m-%d").to_string();
    relationships
        .create(
            "user-1",
            NewRelationship {
                display_name: "Sam".into(),
                relationship_type: RelationshipType::Friend,
                important_dates: string_map(&[("Birthday", birthday.as_str())]),
                preferences: Default::default(),
            },
        )
        .unwrap();

    let first = service.feed_for("user-1", today).unwrap();
    let second = service.feed_for("user-1", today).unwrap();
    assert_eq!(first, second);

    let mut ids: Vec<&String> = first.iter().map(|n| &n.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), first.len());
}

#[test]
fn malformed_stored_date_degrades_that_entry_only() {
    let (_db, relationships, service) = setup();
    let now = Utc::now();
    let today = now.date_naive();

    let anniversary = (today + Duration::days(1)).format("%Y-%m-%d").to_string();
    relationships
        .create(
            "user-1",
            NewRelationship {
                display_name: "Sam".into(),
                relationship_type: RelationshipType::Friend,
                important_dates: string_map(&[
                    ("Birthday", "not-a-date"),
                    ("Anniversary", anniversary.as_str()),
                ]),
                preferences: Default::default(),
            },
        )
        .unwrap();

    let feed = service.feed_for("user-1", today).unwrap();

    // The bad entry is skipped; the good anniversary and the
    // never-interacted reminder still come through
    let kinds: Vec<NotificationKind> = feed.iter().map(|n| n.kind).collect();
    assert!(kinds.contains(&NotificationKind::Anniversary));
    assert!(kinds.contains(&NotificationKind::Reminder));
    assert!(!kinds.contains(&NotificationKind::Birthday));
}

#[test]
fn owners_see_only_their_own_feed() {
    let (_db, relationships, service) = setup();
    let today = Utc::now().date_naive();

    relationships
        .create(
            "user-1",
            NewRelationship {
                display_name: "Sam".into(),
                relationship_type: RelationshipType::Friend,
                important_dates: Default::default(),
                preferences: Default::default(),
            },
        )
        .unwrap();

    assert!(!service.feed_for("user-1", today).unwrap().is_empty());
    assert!(service.feed_for("user-2", today).unwrap().is_empty());
}
