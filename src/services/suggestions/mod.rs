//! Suggestion Services
//!
//! The AI suggestion boundary: provider trait, remote HTTP provider,
//! local fallback generator, persistence, and the generation service
//! that ties them together under the entitlement cap.

pub mod fallback;
pub mod provider;
pub mod remote;
pub mod service;
pub mod store;

pub use fallback::FallbackGenerator;
pub use provider::{SuggestionError, SuggestionProvider, SuggestionRequest, SuggestionResult};
pub use remote::RemoteProvider;
pub use service::SuggestionService;
pub use store::SuggestionStore;
