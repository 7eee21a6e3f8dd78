//! Interaction Models
//!
//! Data structures for logged interactions between the owner and a
//! relationship.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// Kinds of logged interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    GiftSent,
    MessageSent,
    DatePlanned,
    Conversation,
    ReminderReceived,
    Other,
}

impl InteractionType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::GiftSent => "gift_sent",
            InteractionType::MessageSent => "message_sent",
            InteractionType::DatePlanned => "date_planned",
            InteractionType::Conversation => "conversation",
            InteractionType::ReminderReceived => "reminder_received",
            InteractionType::Other => "other",
        }
    }

    /// Parse from database string representation
    pub fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "gift_sent" => Ok(InteractionType::GiftSent),
            "message_sent" => Ok(InteractionType::MessageSent),
            "date_planned" => Ok(InteractionType::DatePlanned),
            "conversation" => Ok(InteractionType::Conversation),
            "reminder_received" => Ok(InteractionType::ReminderReceived),
            "other" => Ok(InteractionType::Other),
            _ => Err(AppError::validation(format!(
                "Invalid interaction type: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded interaction. Cascade-deleted with its relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionLog {
    /// Unique log identifier
    pub id: String,
    /// Owning relationship identifier
    pub relationship_id: String,
    /// When the interaction happened
    pub timestamp: DateTime<Utc>,
    /// Kind of interaction
    pub interaction_type: InteractionType,
    /// Free-text description (non-empty)
    pub description: String,
}

/// Input for logging a new interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInteraction {
    pub relationship_id: String,
    /// Defaults to the write time when absent
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub interaction_type: InteractionType,
    pub description: String,
}

impl NewInteraction {
    /// Validate the input before it reaches the store
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }
        Ok(())
    }
}
