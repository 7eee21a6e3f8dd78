//! Notification Models
//!
//! Derived, ephemeral notification feed entries. These are never
//! persisted: every feed is recomputed from relationship and
//! suggestion state for a single rendering pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Notification urgency. Ordering matters: the feed sorts by priority
/// descending before anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric rank used by the feed comparator (High=3, Medium=2, Low=1)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Birthday,
    Anniversary,
    Reminder,
    Suggestion,
    Milestone,
}

/// One entry of the derived notification feed.
///
/// `id` is deterministic per underlying event (relationship + date
/// label, suggestion id, ...) so re-running a derivation pass never
/// double-counts the same event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related_relationship_id: Option<String>,
    pub event_date: NaiveDate,
    pub priority: Priority,
    /// Session-local UI state; always derived as false
    pub is_read: bool,
}
