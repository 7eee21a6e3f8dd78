//! Suggestion Models
//!
//! Data structures for AI-generated recommendations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// Kinds of generated suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    Gift,
    Activity,
    MessagePrompt,
    ConversationStarter,
    CommunicationFeedback,
}

impl SuggestionType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionType::Gift => "gift",
            SuggestionType::Activity => "activity",
            SuggestionType::MessagePrompt => "message_prompt",
            SuggestionType::ConversationStarter => "conversation_starter",
            SuggestionType::CommunicationFeedback => "communication_feedback",
        }
    }

    /// Parse from database string representation
    pub fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "gift" => Ok(SuggestionType::Gift),
            "activity" => Ok(SuggestionType::Activity),
            "message_prompt" => Ok(SuggestionType::MessagePrompt),
            "conversation_starter" => Ok(SuggestionType::ConversationStarter),
            "communication_feedback" => Ok(SuggestionType::CommunicationFeedback),
            _ => Err(AppError::validation(format!(
                "Invalid suggestion type: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A generated recommendation. Only `is_acted_on` and `feedback_score`
/// are mutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSuggestion {
    /// Unique suggestion identifier
    pub id: String,
    /// Identifier of the owning user
    pub owner_id: String,
    /// Optional target relationship; unset for general suggestions
    pub relationship_id: Option<String>,
    /// Kind of suggestion
    pub suggestion_type: SuggestionType,
    /// Generated text, treated as opaque
    pub suggestion_text: String,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Whether the user acted on the suggestion
    pub is_acted_on: bool,
    /// Optional user rating, 1 through 5
    pub feedback_score: Option<i64>,
}

/// Input for persisting a freshly generated suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSuggestion {
    pub owner_id: String,
    pub relationship_id: Option<String>,
    pub suggestion_type: SuggestionType,
    pub suggestion_text: String,
}
