//! Suggestion Provider Trait
//!
//! Defines the boundary to the external AI text-generation service.
//! The rest of the system only ever sees an opaque suggestion string;
//! provider failures are classified here so the caller can decide to
//! fall back locally.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::relationship::RelationshipType;
use crate::models::suggestion::SuggestionType;

/// Errors from a suggestion provider
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Response parsing error: {message}")]
    ParseError { message: String },

    #[error("Provider not configured: {message}")]
    NotConfigured { message: String },

    #[error("{message}")]
    Other { message: String },
}

/// Result type for provider operations
pub type SuggestionResult<T> = Result<T, SuggestionError>;

/// What the provider is asked to generate.
///
/// `preferences` is the relationship's opaque key/value context; it is
/// forwarded verbatim and never interpreted on this side.
#[derive(Debug, Clone)]
pub struct SuggestionRequest {
    pub suggestion_type: SuggestionType,
    pub relationship_name: Option<String>,
    pub relationship_type: Option<RelationshipType>,
    pub preferences: BTreeMap<String, String>,
}

/// Trait implemented by suggestion text generators
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Provider name for identification and logging
    fn name(&self) -> &'static str;

    /// Generate one suggestion text for the request
    async fn generate(&self, request: &SuggestionRequest) -> SuggestionResult<String>;

    /// Check whether the provider is usable
    async fn health_check(&self) -> SuggestionResult<()>;
}

/// Map an HTTP error status from the remote endpoint to a
/// `SuggestionError`
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> SuggestionError {
    match status {
        401 | 403 => SuggestionError::AuthenticationFailed {
            message: format!("{}: invalid or missing API key", provider),
        },
        429 => SuggestionError::RateLimited {
            message: body.to_string(),
        },
        400 => SuggestionError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => SuggestionError::ServerError {
            status,
            message: body.to_string(),
        },
        _ => SuggestionError::Other {
            message: format!("{}: unexpected status {}: {}", provider, status, body),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_http_error_classification() {
        assert!(matches!(
            parse_http_error(401, "", "remote"),
            SuggestionError::AuthenticationFailed { .. }
        ));
        assert!(matches!(
            parse_http_error(429, "slow down", "remote"),
            SuggestionError::RateLimited { .. }
        ));
        assert!(matches!(
            parse_http_error(503, "overloaded", "remote"),
            SuggestionError::ServerError { status: 503, .. }
        ));
        assert!(matches!(
            parse_http_error(418, "teapot", "remote"),
            SuggestionError::Other { .. }
        ));
    }
}
