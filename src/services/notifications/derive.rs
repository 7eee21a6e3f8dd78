//! Notification Derivation
//!
//! Builds the unranked candidate list for one user's notification
//! feed: upcoming important dates, re-engagement reminders, milestone
//! markers, and recent AI suggestions. Pure over its inputs; a single
//! `today` is captured once per pass so every sub-computation sees the
//! same reference date.
//!
//! Candidate identities are deterministic per underlying event, so a
//! re-run over the same snapshot never double-counts anything.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::notification::{Notification, NotificationKind, Priority};
use crate::models::relationship::Relationship;
use crate::models::suggestion::AiSuggestion;

/// Days-since value standing in for "never interacted"
const NO_INTERACTION_DAYS: i64 = 999;
/// A re-engagement reminder fires from this many quiet days
const REENGAGE_MIN_DAYS: i64 = 7;
/// Milestones only surface for strong relationships
const MILESTONE_MIN_SCORE: i64 = 80;
/// Relationship ages (in days) that count as milestones, exact match
const MILESTONE_DAYS: [i64; 3] = [30, 100, 365];
/// Suggestions older than this many days are not surfaced
const SUGGESTION_MAX_AGE_DAYS: i64 = 3;
/// At most this many suggestion notifications per pass
const SUGGESTION_CAP: usize = 3;
/// Suggestion text preview length in characters
const PREVIEW_CHARS: usize = 100;

/// Derive the full unranked candidate list for one user.
///
/// `window_days` bounds how far ahead important dates are surfaced
/// (the feed uses 30). Ranking happens separately.
pub fn derive_notifications(
    today: NaiveDate,
    relationships: &[Relationship],
    suggestions: &[AiSuggestion],
    window_days: i64,
) -> Vec<Notification> {
    let mut candidates = Vec::new();

    for relationship in relationships {
        candidates.extend(date_candidates(today, relationship, window_days));
        candidates.extend(reengagement_candidate(today, relationship));
        candidates.extend(milestone_candidate(today, relationship));
    }

    candidates.extend(suggestion_candidates(today, suggestions));
    candidates
}

/// Upcoming important-date candidates for one relationship.
///
/// Unparseable stored dates are skipped with a warning; one bad entry
/// never aborts the pass.
fn date_candidates(
    today: NaiveDate,
    relationship: &Relationship,
    window_days: i64,
) -> Vec<Notification> {
    let mut out = Vec::new();

    for (label, raw) in &relationship.important_dates {
        let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                warn!(
                    "Skipping unparseable important date '{}' = '{}' on relationship {}: {}",
                    label, raw, relationship.id, e
                );
                continue;
            }
        };

        let (next, days_until) = super::dates::resolve_next_occurrence(date, today);
        if !(0..=window_days).contains(&days_until) {
            continue;
        }

        let kind = if label.to_lowercase().contains("birthday") {
            NotificationKind::Birthday
        } else {
            NotificationKind::Anniversary
        };
        let priority = if days_until <= 3 {
            Priority::High
        } else if days_until <= 7 {
            Priority::Medium
        } else {
            Priority::Low
        };
        let when = match days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {} days", n),
        };

        out.push(Notification {
            id: format!("date-{}-{}", relationship.id, label),
            kind,
            title: format!("{}: {}", relationship.display_name, label),
            message: format!(
                "{}'s {} is {} ({})",
                relationship.display_name, label, when, next
            ),
            related_relationship_id: Some(relationship.id.clone()),
            event_date: next,
            priority,
            is_read: false,
        });
    }

    out
}

/// One re-engagement reminder once a relationship has gone quiet
fn reengagement_candidate(today: NaiveDate, relationship: &Relationship) -> Option<Notification> {
    let days_since = relationship
        .last_interaction_date
        .map(|last| (today - last.date_naive()).num_days())
        .unwrap_or(NO_INTERACTION_DAYS);

    if days_since < REENGAGE_MIN_DAYS {
        return None;
    }

    let priority = if days_since >= 30 {
        Priority::High
    } else if days_since >= 14 {
        Priority::Medium
    } else {
        Priority::Low
    };
    let message = if relationship.last_interaction_date.is_some() {
        format!(
            "It's been {} days since you connected with {}",
            days_since, relationship.display_name
        )
    } else {
        format!(
            "You haven't logged an interaction with {} yet",
            relationship.display_name
        )
    };

    Some(Notification {
        id: format!("reminder-{}", relationship.id),
        kind: NotificationKind::Reminder,
        title: format!("Time to reconnect with {}", relationship.display_name),
        message,
        related_relationship_id: Some(relationship.id.clone()),
        event_date: today,
        priority,
        is_read: false,
    })
}

/// Milestone marker when a strong relationship hits an exact age.
///
/// Exact-day matching means the milestone only surfaces if a pass runs
/// on that day; a missed day is missed for good. Known limitation,
/// kept as designed.
fn milestone_candidate(today: NaiveDate, relationship: &Relationship) -> Option<Notification> {
    if relationship.strength_score < MILESTONE_MIN_SCORE {
        return None;
    }

    let days_since_created = (today - relationship.created_at.date_naive()).num_days();
    if !MILESTONE_DAYS.contains(&days_since_created) {
        return None;
    }

    Some(Notification {
        id: format!("milestone-{}-{}", relationship.id, days_since_created),
        kind: NotificationKind::Milestone,
        title: format!(
            "{} days with {}",
            days_since_created, relationship.display_name
        ),
        message: format!(
            "You and {} have been connected for {} days. Keep it going!",
            relationship.display_name, days_since_created
        ),
        related_relationship_id: Some(relationship.id.clone()),
        event_date: today,
        priority: Priority::Medium,
        is_read: false,
    })
}

/// Recent unacted suggestions, newest first, capped
fn suggestion_candidates(today: NaiveDate, suggestions: &[AiSuggestion]) -> Vec<Notification> {
    let mut recent: Vec<&AiSuggestion> = suggestions
        .iter()
        .filter(|s| {
            if s.is_acted_on {
                return false;
            }
            let age = (today - s.generated_at.date_naive()).num_days();
            (0..=SUGGESTION_MAX_AGE_DAYS).contains(&age)
        })
        .collect();
    recent.sort_by(|a, b| b.generated_at.cmp(&a.generated_at).then(a.id.cmp(&b.id)));
    recent.truncate(SUGGESTION_CAP);

    recent
        .into_iter()
        .map(|s| Notification {
            id: format!("suggestion-{}", s.id),
            kind: NotificationKind::Suggestion,
            title: format!("New {} suggestion", s.suggestion_type),
            message: preview(&s.suggestion_text),
            related_relationship_id: s.relationship_id.clone(),
            event_date: s.generated_at.date_naive(),
            priority: Priority::Low,
            is_read: false,
        })
        .collect()
}

/// Character-safe preview of the suggestion text
fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", truncated)
}
