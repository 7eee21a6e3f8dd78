//! Kinkeeper - Relationship Care Backend
//!
//! Backend core for a consumer relationship-management application.
//! It includes:
//! - Owner-scoped persistence for relationships, interaction logs, and
//!   AI suggestions (SQLite)
//! - The strength scoring engine, wired into the interaction write path
//! - The derived notification feed (birthdays, anniversaries,
//!   re-engagement reminders, milestones, suggestions)
//! - The AI suggestion boundary with a local fallback generator

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::notification::{Notification, NotificationKind, Priority};
pub use models::relationship::{NewRelationship, Relationship, RelationshipType};
pub use models::settings::{AppConfig, SettingsUpdate};
pub use models::suggestion::{AiSuggestion, SuggestionType};
pub use services::notifications::NotificationService;
pub use services::relationships::RelationshipStore;
pub use services::suggestions::{SuggestionService, SuggestionStore};
pub use storage::config::ConfigService;
pub use storage::database::Database;
pub use utils::error::{AppError, AppResult};
