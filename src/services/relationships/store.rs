//! Relationship Store
//!
//! Owner-scoped CRUD for relationships and their interaction logs.
//! Every query filters on `owner_id`; a relationship belonging to a
//! different owner is indistinguishable from a missing one.
//!
//! The strength scoring transition is wired into the write paths here:
//! any write of `last_interaction_date` computes the new score and
//! persists both in the same transaction. There is no other path that
//! mutates the score.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rusqlite::params;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::interaction::{InteractionLog, InteractionType, NewInteraction};
use crate::models::relationship::{
    NewRelationship, Relationship, RelationshipType, RelationshipUpdate,
    INITIAL_STRENGTH_SCORE,
};
use crate::services::relationships::scoring::next_score;
use crate::storage::database::{Database, DbPool};
use crate::utils::error::{AppError, AppResult};

const RELATIONSHIP_COLUMNS: &str = "id, owner_id, display_name, relationship_type, \
     strength_score, last_interaction_date, important_dates, preferences, \
     created_at, updated_at";

/// Store for relationships and interaction logs
#[derive(Clone)]
pub struct RelationshipStore {
    pool: DbPool,
}

/// Raw relationship row as read from SQLite
struct RelationshipRow {
    id: String,
    owner_id: String,
    display_name: String,
    relationship_type: String,
    strength_score: i64,
    last_interaction_date: Option<String>,
    important_dates: String,
    preferences: String,
    created_at: String,
    updated_at: String,
}

impl RelationshipRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            display_name: row.get(2)?,
            relationship_type: row.get(3)?,
            strength_score: row.get(4)?,
            last_interaction_date: row.get(5)?,
            important_dates: row.get(6)?,
            preferences: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    fn into_relationship(self) -> AppResult<Relationship> {
        let last_interaction_date = match self.last_interaction_date {
            Some(ref s) => Some(parse_timestamp(s)?),
            None => None,
        };
        Ok(Relationship {
            id: self.id,
            owner_id: self.owner_id,
            display_name: self.display_name,
            relationship_type: RelationshipType::from_str(&self.relationship_type)?,
            strength_score: self.strength_score,
            last_interaction_date,
            important_dates: serde_json::from_str(&self.important_dates)?,
            preferences: serde_json::from_str(&self.preferences)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Parse an ISO-8601 timestamp stored as TEXT
fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp '{}': {}", s, e)))
}

impl RelationshipStore {
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

    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    /// Create a new relationship for the given owner.
    ///
    /// The strength score starts at 50; only the scoring transition
    /// changes it afterwards.
    pub fn create(&self, owner_id: &str, input: NewRelationship) -> AppResult<Relationship> {
        input.validate().map_err(AppError::validation)?;

        let now = Utc::now();
        let relationship = Relationship {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            display_name: input.display_name,
            relationship_type: input.relationship_type,
            strength_score: INITIAL_STRENGTH_SCORE,
            last_interaction_date: None,
            important_dates: input.important_dates,
            preferences: input.preferences,
            created_at: now,
            updated_at: now,
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO relationships (id, owner_id, display_name, relationship_type, \
             strength_score, last_interaction_date, important_dates, preferences, \
             created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6, ?7, ?8, ?8)",
            params![
                relationship.id,
                relationship.owner_id,
                relationship.display_name,
                relationship.relationship_type.as_str(),
                relationship.strength_score,
                serde_json::to_string(&relationship.important_dates)?,
                serde_json::to_string(&relationship.preferences)?,
                now.to_rfc3339(),
            ],
        )?;

        info!(
            "Created relationship {} ({}) for owner {}",
            relationship.id, relationship.display_name, owner_id
        );
        Ok(relationship)
    }

    /// Fetch one relationship, scoped to its owner
    pub fn get(&self, owner_id: &str, id: &str) -> AppResult<Relationship> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!(
                    "SELECT {} FROM relationships WHERE id = ?1 AND owner_id = ?2",
                    RELATIONSHIP_COLUMNS
                ),
                params![id, owner_id],
                RelationshipRow::from_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    AppError::not_found(format!("relationship {}", id))
                }
                other => AppError::Sqlite(other),
            })?;
        row.into_relationship()
    }

    /// List all relationships owned by a user, oldest first
    pub fn list(&self, owner_id: &str) -> AppResult<Vec<Relationship>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM relationships WHERE owner_id = ?1 \
             ORDER BY created_at ASC, id ASC",
            RELATIONSHIP_COLUMNS
        ))?;

        let rows: Vec<RelationshipRow> = stmt
            .query_map(params![owner_id], RelationshipRow::from_row)?
            .collect::<rusqlite::Result<_>>()?;

        rows.into_iter()
            .map(RelationshipRow::into_relationship)
            .collect()
    }

    /// Update profile fields. The strength score is not reachable from
    /// here; it only moves through the scoring transition.
    pub fn update_profile(
        &self,
        owner_id: &str,
        id: &str,
        update: RelationshipUpdate,
    ) -> AppResult<Relationship> {
        update.validate().map_err(AppError::validation)?;

        let mut current = self.get(owner_id, id)?;
        if let Some(name) = update.display_name {
            current.display_name = name;
        }
        if let Some(ty) = update.relationship_type {
            current.relationship_type = ty;
        }
        if let Some(dates) = update.important_dates {
            current.important_dates = dates;
        }
        if let Some(prefs) = update.preferences {
            current.preferences = prefs;
        }
        current.updated_at = Utc::now();

        let conn = self.conn()?;
        conn.execute(
            "UPDATE relationships SET display_name = ?3, relationship_type = ?4, \
             important_dates = ?5, preferences = ?6, updated_at = ?7 \
             WHERE id = ?1 AND owner_id = ?2",
            params![
                id,
                owner_id,
                current.display_name,
                current.relationship_type.as_str(),
                serde_json::to_string(&current.important_dates)?,
                serde_json::to_string(&current.preferences)?,
                current.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(current)
    }

    /// Delete a relationship and, via cascade, its interaction logs and
    /// suggestion links
    pub fn delete(&self, owner_id: &str, id: &str) -> AppResult<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM relationships WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if deleted == 0 {
            return Err(AppError::not_found(format!("relationship {}", id)));
        }
        info!("Deleted relationship {} for owner {}", id, owner_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Interaction write paths (scoring trigger lives here)
    // ------------------------------------------------------------------

    /// Log an interaction. In one transaction: inserts the log, moves
    /// the parent's `last_interaction_date` to the log timestamp, and
    /// runs the scoring transition on that write.
    pub fn record_interaction(
        &self,
        owner_id: &str,
        input: NewInteraction,
    ) -> AppResult<(InteractionLog, Relationship)> {
        input.validate().map_err(AppError::validation)?;

        let now = Utc::now();
        let timestamp = input.timestamp.unwrap_or(now);

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let previous_score: i64 = tx
            .query_row(
                "SELECT strength_score FROM relationships \
                 WHERE id = ?1 AND owner_id = ?2",
                params![input.relationship_id, owner_id],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    AppError::not_found(format!("relationship {}", input.relationship_id))
                }
                other => AppError::Sqlite(other),
            })?;

        let log = InteractionLog {
            id: Uuid::new_v4().to_string(),
            relationship_id: input.relationship_id.clone(),
            timestamp,
            interaction_type: input.interaction_type,
            description: input.description,
        };
        tx.execute(
            "INSERT INTO interaction_logs (id, relationship_id, timestamp, \
             interaction_type, description) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                log.id,
                log.relationship_id,
                log.timestamp.to_rfc3339(),
                log.interaction_type.as_str(),
                log.description,
            ],
        )?;

        let new_score = next_score(previous_score, Some(timestamp), now);
        tx.execute(
            "UPDATE relationships SET last_interaction_date = ?3, \
             strength_score = ?4, updated_at = ?5 \
             WHERE id = ?1 AND owner_id = ?2",
            params![
                log.relationship_id,
                owner_id,
                timestamp.to_rfc3339(),
                new_score,
                now.to_rfc3339(),
            ],
        )?;

        tx.commit()?;
        drop(conn); // release before re-reading through the pool

        debug!(
            "Recorded {} interaction for relationship {}: score {} -> {}",
            log.interaction_type, log.relationship_id, previous_score, new_score
        );

        let relationship = self.get(owner_id, &log.relationship_id)?;
        Ok((log, relationship))
    }

    /// Write `last_interaction_date` directly. Fires the scoring
    /// transition even when the value is unchanged; writing None resets
    /// the score to the baseline.
    pub fn set_last_interaction(
        &self,
        owner_id: &str,
        id: &str,
        last_interaction: Option<DateTime<Utc>>,
    ) -> AppResult<Relationship> {
        let now = Utc::now();

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let previous_score: i64 = tx
            .query_row(
                "SELECT strength_score FROM relationships \
                 WHERE id = ?1 AND owner_id = ?2",
                params![id, owner_id],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    AppError::not_found(format!("relationship {}", id))
                }
                other => AppError::Sqlite(other),
            })?;

        let new_score = next_score(previous_score, last_interaction, now);
        tx.execute(
            "UPDATE relationships SET last_interaction_date = ?3, \
             strength_score = ?4, updated_at = ?5 \
             WHERE id = ?1 AND owner_id = ?2",
            params![
                id,
                owner_id,
                last_interaction.map(|dt| dt.to_rfc3339()),
                new_score,
                now.to_rfc3339(),
            ],
        )?;

        tx.commit()?;
        drop(conn); // release before re-reading through the pool

        debug!(
            "Set last interaction for relationship {}: score {} -> {}",
            id, previous_score, new_score
        );
        self.get(owner_id, id)
    }

    /// List interaction logs for one relationship, newest first
    pub fn list_interactions(
        &self,
        owner_id: &str,
        relationship_id: &str,
    ) -> AppResult<Vec<InteractionLog>> {
        // Ownership check first, so a foreign relationship id reads as missing
        self.get(owner_id, relationship_id)?;

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, relationship_id, timestamp, interaction_type, description \
             FROM interaction_logs WHERE relationship_id = ?1 \
             ORDER BY timestamp DESC, id ASC",
        )?;

        struct LogRow {
            id: String,
            relationship_id: String,
            timestamp: String,
            interaction_type: String,
            description: String,
        }

        let rows: Vec<LogRow> = stmt
            .query_map(params![relationship_id], |row| {
                Ok(LogRow {
                    id: row.get(0)?,
                    relationship_id: row.get(1)?,
                    timestamp: row.get(2)?,
                    interaction_type: row.get(3)?,
                    description: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;

        rows.into_iter()
            .map(|row| {
                Ok(InteractionLog {
                    id: row.id,
                    relationship_id: row.relationship_id,
                    timestamp: parse_timestamp(&row.timestamp)?,
                    interaction_type: InteractionType::from_str(&row.interaction_type)?,
                    description: row.description,
                })
            })
            .collect()
    }
}

/// Convenience constructor for the opaque maps in tests and callers
pub fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
