//! Relationship Services
//!
//! Owner-scoped relationship persistence and the strength scoring
//! transition that runs on its write paths.

pub mod scoring;
pub mod store;

pub use scoring::{next_score, BASELINE_SCORE, MAX_SCORE, MIN_SCORE};
pub use store::RelationshipStore;
