//! Integration Tests Module
//!
//! Cross-module tests for the relationship care backend: the scoring
//! write path, the derived notification feed, and suggestion flows.

// Scoring transitions through the real write path
mod scoring_trigger_test;

// Full feed derivation over stored state
mod feed_test;

// Suggestion generation, fallback, and feed integration
mod suggestion_flow_test;
