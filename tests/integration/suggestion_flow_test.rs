//! Suggestion Flow Tests
//!
//! Generation through the service (fallback path), acted-on state, and
//! how suggestions surface in the notification feed.

use chrono::Utc;

use kinkeeper::models::relationship::{NewRelationship, RelationshipType};
use kinkeeper::services::notifications::NotificationService;
use kinkeeper::services::relationships::store::string_map;
use kinkeeper::services::relationships::RelationshipStore;
use kinkeeper::services::suggestions::{SuggestionService, SuggestionStore};
use kinkeeper::{AppConfig, Database, NotificationKind, Priority, SuggestionType};

struct Fixture {
    relationships: RelationshipStore,
    suggestions: SuggestionStore,
    service: SuggestionService,
    feed: NotificationService,
}

fn setup(cap: u32) -> Fixture {
    let db = Database::new_in_memory().unwrap();
    let relationships = RelationshipStore::from_database(&db);
    let suggestions = SuggestionStore::from_database(&db);
    let config = AppConfig {
        daily_suggestion_cap: cap,
        ..Default::default()
    };
    Fixture {
        relationships: relationships.clone(),
        suggestions: suggestions.clone(),
        // No remote endpoint configured: the local fallback generator
        // handles everything
        service: SuggestionService::new(
            suggestions.clone(),
            relationships.clone(),
            None,
            config,
        ),
        feed: NotificationService::new(relationships, suggestions, 30),
    }
}

#[tokio::test]
async fn generated_suggestion_surfaces_in_feed_at_low_priority() {
    let fixture = setup(10);
    let rel = fixture
        .relationships
        .create(
            "user-1",
            NewRelationship {
                display_name: "Alice".into(),
                relationship_type: RelationshipType::Friend,
                important_dates: Default::default(),
                preferences: string_map(&[("likes", "jazz")]),
            },
        )
        .unwrap();

    let suggestion = fixture
        .service
        .generate_for("user-1", Some(&rel.id), SuggestionType::Activity)
        .await
        .unwrap();
    assert!(suggestion.suggestion_text.contains("Alice"));

    let feed = fixture
        .feed
        .feed_for("user-1", Utc::now().date_naive())
        .unwrap();
    let entry = feed
        .iter()
        .find(|n| n.kind == NotificationKind::Suggestion)
        .unwrap();
    assert_eq!(entry.priority, Priority::Low);
    assert_eq!(entry.id, format!("suggestion-{}", suggestion.id));
    assert_eq!(entry.related_relationship_id, Some(rel.id));
}

#[tokio::test]
async fn acted_on_suggestions_leave_the_feed() {
    let fixture = setup(10);

    let suggestion = fixture
        .service
        .generate_for("user-1", None, SuggestionType::MessagePrompt)
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let before = fixture.feed.feed_for("user-1", today).unwrap();
    assert!(before
        .iter()
        .any(|n| n.kind == NotificationKind::Suggestion));

    fixture
        .suggestions
        .mark_acted_on("user-1", &suggestion.id)
        .unwrap();

    let after = fixture.feed.feed_for("user-1", today).unwrap();
    assert!(!after.iter().any(|n| n.kind == NotificationKind::Suggestion));
}

#[tokio::test]
async fn cap_applies_per_owner_per_day() {
    let fixture = setup(1);

    fixture
        .service
        .generate_for("user-1", None, SuggestionType::Gift)
        .await
        .unwrap();

    assert!(fixture
        .service
        .generate_for("user-1", None, SuggestionType::Gift)
        .await
        .is_err());
    assert!(fixture
        .service
        .generate_for("user-2", None, SuggestionType::Gift)
        .await
        .is_ok());
}
