//! Services
//!
//! Business logic services for the application.

pub mod notifications;
pub mod relationships;
pub mod suggestions;

pub use notifications::NotificationService;
pub use relationships::RelationshipStore;
pub use suggestions::{SuggestionService, SuggestionStore};
