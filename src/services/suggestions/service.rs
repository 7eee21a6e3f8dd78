//! Suggestion Generation Service
//!
//! Orchestrates suggestion generation: entitlement cap check, request
//! assembly from the relationship's opaque preference context, the
//! remote provider call, and the local fallback when that call is
//! unavailable or fails. Results are always persisted through the
//! suggestion store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tracing::{info, warn};

use super::fallback::FallbackGenerator;
use super::provider::{SuggestionProvider, SuggestionRequest};
use super::store::SuggestionStore;
use crate::models::settings::AppConfig;
use crate::models::suggestion::{AiSuggestion, NewSuggestion, SuggestionType};
use crate::services::relationships::RelationshipStore;
use crate::utils::error::{AppError, AppResult};

/// Service producing and persisting AI suggestions
pub struct SuggestionService {
    store: SuggestionStore,
    relationships: RelationshipStore,
    provider: Option<Arc<dyn SuggestionProvider>>,
    config: AppConfig,
}

impl SuggestionService {
    /// Create a service. `provider` is None when no remote endpoint is
    /// configured; the fallback generator then handles everything.
    pub fn new(
        store: SuggestionStore,
        relationships: RelationshipStore,
        provider: Option<Arc<dyn SuggestionProvider>>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            relationships,
            provider,
            config,
        }
    }

    /// Generate one suggestion for the owner, optionally tied to a
    /// relationship, and persist it.
    pub async fn generate_for(
        &self,
        owner_id: &str,
        relationship_id: Option<&str>,
        suggestion_type: SuggestionType,
    ) -> AppResult<AiSuggestion> {
        self.check_daily_cap(owner_id)?;

        let request = match relationship_id {
            Some(id) => {
                let relationship = self.relationships.get(owner_id, id)?;
                SuggestionRequest {
                    suggestion_type,
                    relationship_name: Some(relationship.display_name),
                    relationship_type: Some(relationship.relationship_type),
                    preferences: relationship.preferences,
                }
            }
            None => SuggestionRequest {
                suggestion_type,
                relationship_name: None,
                relationship_type: None,
                preferences: Default::default(),
            },
        };

        let text = self.generate_text(&request).await;

        self.store.insert(NewSuggestion {
            owner_id: owner_id.to_string(),
            relationship_id: relationship_id.map(String::from),
            suggestion_type,
            suggestion_text: text,
        })
    }

    /// Call the remote provider, falling back to the local generator
    /// so callers always receive well-formed text
    async fn generate_text(&self, request: &SuggestionRequest) -> String {
        match &self.provider {
            Some(provider) => match provider.generate(request).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(
                        "Provider '{}' failed, using local fallback: {}",
                        provider.name(),
                        e
                    );
                    FallbackGenerator::generate(request)
                }
            },
            None => FallbackGenerator::generate(request),
        }
    }

    /// Enforce the daily generation cap from the entitlement config
    fn check_daily_cap(&self, owner_id: &str) -> AppResult<()> {
        let today = Utc::now().date_naive();
        let start_of_day = today
            .and_hms_opt(0, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt))
            .ok_or_else(|| AppError::internal("failed to compute start of day"))?;

        let generated_today = self.store.count_generated_since(owner_id, start_of_day)?;
        if generated_today >= self.config.daily_suggestion_cap as i64 {
            info!(
                "Owner {} hit the daily suggestion cap ({} on tier '{}')",
                owner_id, self.config.daily_suggestion_cap, self.config.subscription_tier
            );
            return Err(AppError::validation(format!(
                "daily suggestion cap reached ({} per day on the '{}' tier)",
                self.config.daily_suggestion_cap, self.config.subscription_tier
            )));
        }
        Ok(())
    }
}
