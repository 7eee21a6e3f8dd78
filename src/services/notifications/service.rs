//! Notification Feed Service
//!
//! Runs one derivation pass for a user: fetch the relationship and
//! suggestion snapshots, derive candidates, rank them. Read-only and
//! idempotent; safe to invoke repeatedly or concurrently.
//!
//! A store read failure aborts the whole pass. A partial feed is never
//! returned: the caller either gets the full ranked list (possibly
//! legitimately empty) or an error.

use chrono::NaiveDate;
use tracing::debug;

use super::derive::derive_notifications;
use super::ranking::rank_notifications;
use crate::models::notification::Notification;
use crate::services::relationships::RelationshipStore;
use crate::services::suggestions::SuggestionStore;
use crate::utils::error::AppResult;

/// How many days back suggestion candidates are considered
const SUGGESTION_LOOKBACK_DAYS: i64 = 3;
/// Upper bound on suggestions fetched per pass
const SUGGESTION_FETCH_LIMIT: usize = 50;

/// Service producing the ranked notification feed
pub struct NotificationService {
    relationships: RelationshipStore,
    suggestions: SuggestionStore,
    window_days: i64,
}

impl NotificationService {
    /// Create a feed service. `window_days` bounds how far ahead
    /// important dates are surfaced (config default 30).
    pub fn new(
        relationships: RelationshipStore,
        suggestions: SuggestionStore,
        window_days: i64,
    ) -> Self {
        Self {
            relationships,
            suggestions,
            window_days,
        }
    }

    /// Produce the ranked feed for one owner as of `today`.
    ///
    /// `today` is captured once by the caller so every sub-computation
    /// of the pass shares the same reference date.
    pub fn feed_for(&self, owner_id: &str, today: NaiveDate) -> AppResult<Vec<Notification>> {
        let relationships = self.relationships.list(owner_id)?;
        let suggestions =
            self.suggestions
                .list_recent(owner_id, SUGGESTION_LOOKBACK_DAYS, SUGGESTION_FETCH_LIMIT)?;

        let candidates =
            derive_notifications(today, &relationships, &suggestions, self.window_days);
        let feed = rank_notifications(candidates);

        debug!(
            "Derived {} notifications for owner {} across {} relationships",
            feed.len(),
            owner_id,
            relationships.len()
        );
        Ok(feed)
    }
}
