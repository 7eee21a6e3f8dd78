//! Settings Models
//!
//! Application configuration and settings data structures. The
//! subscription tier and suggestion cap are supplied by the billing
//! collaborator and only read here, never computed.

use serde::{Deserialize, Serialize};

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Subscription tier name from the billing collaborator
    pub subscription_tier: String,
    /// Suggestions a user may generate per day on the current tier
    pub daily_suggestion_cap: u32,
    /// How far ahead the notification feed looks for important dates
    #[serde(default = "default_feed_window_days")]
    pub feed_window_days: i64,
    /// Chat-completions style endpoint for suggestion generation;
    /// None means the local fallback generator is always used
    pub ai_endpoint: Option<String>,
    /// Model name sent to the AI endpoint
    pub ai_model: String,
    /// API key for the AI endpoint
    pub ai_api_key: Option<String>,
}

fn default_feed_window_days() -> i64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subscription_tier: "free".to_string(),
            daily_suggestion_cap: 3,
            feed_window_days: 30,
            ai_endpoint: None,
            ai_model: "gpt-4o-mini".to_string(),
            ai_api_key: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub subscription_tier: Option<String>,
    pub daily_suggestion_cap: Option<u32>,
    pub feed_window_days: Option<i64>,
    pub ai_endpoint: Option<Option<String>>,
    pub ai_model: Option<String>,
    pub ai_api_key: Option<Option<String>>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(tier) = update.subscription_tier {
            self.subscription_tier = tier;
        }
        if let Some(cap) = update.daily_suggestion_cap {
            self.daily_suggestion_cap = cap;
        }
        if let Some(window) = update.feed_window_days {
            self.feed_window_days = window;
        }
        if let Some(endpoint) = update.ai_endpoint {
            self.ai_endpoint = endpoint;
        }
        if let Some(model) = update.ai_model {
            self.ai_model = model;
        }
        if let Some(key) = update.ai_api_key {
            self.ai_api_key = key;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.subscription_tier.trim().is_empty() {
            return Err("subscription_tier must not be empty".to_string());
        }

        if self.feed_window_days < 1 || self.feed_window_days > 365 {
            return Err("feed_window_days must be between 1 and 365".to_string());
        }

        if self.ai_model.trim().is_empty() {
            return Err("ai_model must not be empty".to_string());
        }

        Ok(())
    }
}
