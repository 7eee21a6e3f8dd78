//! Suggestion Store
//!
//! Owner-scoped persistence for AI suggestions. After creation only
//! `is_acted_on` and `feedback_score` are mutable; suggestions are
//! never deleted here (the relationship cascade handles cleanup).

use chrono::{DateTime, Duration, Utc};
use rusqlite::params;
use tracing::debug;
use uuid::Uuid;

use crate::models::suggestion::{AiSuggestion, NewSuggestion, SuggestionType};
use crate::storage::database::{Database, DbPool};
use crate::utils::error::{AppError, AppResult};

const SUGGESTION_COLUMNS: &str = "id, owner_id, relationship_id, suggestion_type, \
     suggestion_text, generated_at, is_acted_on, feedback_score";

/// Store for AI suggestions
#[derive(Clone)]
pub struct SuggestionStore {
    pool: DbPool,
}

struct SuggestionRow {
    id: String,
    owner_id: String,
    relationship_id: Option<String>,
    suggestion_type: String,
    suggestion_text: String,
    generated_at: String,
    is_acted_on: bool,
    feedback_score: Option<i64>,
}

impl SuggestionRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            relationship_id: row.get(2)?,
            suggestion_type: row.get(3)?,
            suggestion_text: row.get(4)?,
            generated_at: row.get(5)?,
            is_acted_on: row.get(6)?,
            feedback_score: row.get(7)?,
        })
    }

    fn into_suggestion(self) -> AppResult<AiSuggestion> {
        let generated_at = DateTime::parse_from_rfc3339(&self.generated_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                AppError::database(format!("Invalid timestamp '{}': {}", self.generated_at, e))
            })?;
        Ok(AiSuggestion {
            id: self.id,
            owner_id: self.owner_id,
            relationship_id: self.relationship_id,
            suggestion_type: SuggestionType::from_str(&self.suggestion_type)?,
            suggestion_text: self.suggestion_text,
            generated_at,
            is_acted_on: self.is_acted_on,
            feedback_score: self.feedback_score,
        })
    }
}

impl SuggestionStore {
    /// Create a store backed by the given database
    pub fn from_database(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    fn conn(&self) -> AppResult<r2d2::PooledConnection<r2d2_sqlite::SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Persist a freshly generated suggestion
    pub fn insert(&self, input: NewSuggestion) -> AppResult<AiSuggestion> {
        let suggestion = AiSuggestion {
            id: Uuid::new_v4().to_string(),
            owner_id: input.owner_id,
            relationship_id: input.relationship_id,
            suggestion_type: input.suggestion_type,
            suggestion_text: input.suggestion_text,
            generated_at: Utc::now(),
            is_acted_on: false,
            feedback_score: None,
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO ai_suggestions (id, owner_id, relationship_id, suggestion_type, \
             suggestion_text, generated_at, is_acted_on, feedback_score) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, NULL)",
            params![
                suggestion.id,
                suggestion.owner_id,
                suggestion.relationship_id,
                suggestion.suggestion_type.as_str(),
                suggestion.suggestion_text,
                suggestion.generated_at.to_rfc3339(),
            ],
        )?;

        debug!(
            "Stored {} suggestion {} for owner {}",
            suggestion.suggestion_type, suggestion.id, suggestion.owner_id
        );
        Ok(suggestion)
    }

    /// Fetch one suggestion, scoped to its owner
    pub fn get(&self, owner_id: &str, id: &str) -> AppResult<AiSuggestion> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!(
                    "SELECT {} FROM ai_suggestions WHERE id = ?1 AND owner_id = ?2",
                    SUGGESTION_COLUMNS
                ),
                params![id, owner_id],
                SuggestionRow::from_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    AppError::not_found(format!("suggestion {}", id))
                }
                other => AppError::Sqlite(other),
            })?;
        row.into_suggestion()
    }

    /// List an owner's suggestions generated within the last
    /// `within_days` days, newest first
    pub fn list_recent(
        &self,
        owner_id: &str,
        within_days: i64,
        limit: usize,
    ) -> AppResult<Vec<AiSuggestion>> {
        let cutoff = Utc::now() - Duration::days(within_days);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM ai_suggestions \
             WHERE owner_id = ?1 AND generated_at >= ?2 \
             ORDER BY generated_at DESC, id ASC LIMIT ?3",
            SUGGESTION_COLUMNS
        ))?;

        let rows: Vec<SuggestionRow> = stmt
            .query_map(
                params![owner_id, cutoff.to_rfc3339(), limit as i64],
                SuggestionRow::from_row,
            )?
            .collect::<rusqlite::Result<_>>()?;

        rows.into_iter()
            .map(SuggestionRow::into_suggestion)
            .collect()
    }

    /// Count suggestions generated since the given instant, for cap
    /// enforcement
    pub fn count_generated_since(
        &self,
        owner_id: &str,
        since: DateTime<Utc>,
    ) -> AppResult<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM ai_suggestions \
             WHERE owner_id = ?1 AND generated_at >= ?2",
            params![owner_id, since.to_rfc3339()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Mark a suggestion as acted on
    pub fn mark_acted_on(&self, owner_id: &str, id: &str) -> AppResult<AiSuggestion> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE ai_suggestions SET is_acted_on = 1 \
             WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if updated == 0 {
            return Err(AppError::not_found(format!("suggestion {}", id)));
        }
        drop(conn); // release before re-reading through the pool
        self.get(owner_id, id)
    }

    /// Record a 1-5 feedback score
    pub fn set_feedback(&self, owner_id: &str, id: &str, score: i64) -> AppResult<AiSuggestion> {
        if !(1..=5).contains(&score) {
            return Err(AppError::validation(format!(
                "feedback score must be between 1 and 5, got {}",
                score
            )));
        }

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE ai_suggestions SET feedback_score = ?3 \
             WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id, score],
        )?;
        if updated == 0 {
            return Err(AppError::not_found(format!("suggestion {}", id)));
        }
        drop(conn); // release before re-reading through the pool
        self.get(owner_id, id)
    }
}
