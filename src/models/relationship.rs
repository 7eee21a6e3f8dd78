//! Relationship Models
//!
//! Data structures for tracked relationships and their profile data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// Strength score assigned to a relationship at creation time
pub const INITIAL_STRENGTH_SCORE: i64 = 50;

/// Categories of tracked relationships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Romantic,
    Family,
    Friend,
    Professional,
    Other,
}

impl RelationshipType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Romantic => "romantic",
            RelationshipType::Family => "family",
            RelationshipType::Friend => "friend",
            RelationshipType::Professional => "professional",
            RelationshipType::Other => "other",
        }
    }

    /// Parse from database string representation
    pub fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "romantic" => Ok(RelationshipType::Romantic),
            "family" => Ok(RelationshipType::Family),
            "friend" => Ok(RelationshipType::Friend),
            "professional" => Ok(RelationshipType::Professional),
            "other" => Ok(RelationshipType::Other),
            _ => Err(AppError::validation(format!(
                "Invalid relationship type: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One tracked connection owned by a user.
///
/// `strength_score` is mutated only by the scoring engine; every other
/// field is profile data owned by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Unique relationship identifier
    pub id: String,
    /// Identifier of the owning user; every query is scoped to it
    pub owner_id: String,
    /// Display name (non-empty)
    pub display_name: String,
    /// Relationship category
    pub relationship_type: RelationshipType,
    /// Health metric in [0, 100]
    pub strength_score: i64,
    /// Timestamp of the most recent logged interaction, if any
    pub last_interaction_date: Option<DateTime<Utc>>,
    /// Label -> ISO date string (YYYY-MM-DD). Recurrence is annual;
    /// the stored year is a storage artifact.
    pub important_dates: BTreeMap<String, String>,
    /// Opaque string -> string context passed through to the AI
    /// provider, never interpreted here
    pub preferences: BTreeMap<String, String>,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new relationship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRelationship {
    pub display_name: String,
    pub relationship_type: RelationshipType,
    #[serde(default)]
    pub important_dates: BTreeMap<String, String>,
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

impl NewRelationship {
    /// Validate the input before it reaches the store
    pub fn validate(&self) -> Result<(), String> {
        if self.display_name.trim().is_empty() {
            return Err("display name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Partial profile update. The strength score is deliberately absent:
/// it can only change through the scoring engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipUpdate {
    pub display_name: Option<String>,
    pub relationship_type: Option<RelationshipType>,
    pub important_dates: Option<BTreeMap<String, String>>,
    pub preferences: Option<BTreeMap<String, String>>,
}

impl RelationshipUpdate {
    /// Validate the update before it reaches the store
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.display_name {
            if name.trim().is_empty() {
                return Err("display name must not be empty".to_string());
            }
        }
        Ok(())
    }
}
