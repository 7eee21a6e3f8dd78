//! Notification Services
//!
//! Derived, ephemeral notification feed: upcoming-date resolution,
//! candidate derivation, ranking, and the orchestration service.

pub mod dates;
pub mod derive;
pub mod ranking;
pub mod service;

pub use dates::resolve_next_occurrence;
pub use derive::derive_notifications;
pub use ranking::rank_notifications;
pub use service::NotificationService;
