//! Local Fallback Generator
//!
//! Static suggestion templates used when the remote provider is
//! unconfigured or fails. Deterministic on purpose: the derivation
//! side of the system always receives a well-formed suggestion string,
//! online or not.

use super::provider::SuggestionRequest;
use crate::models::relationship::RelationshipType;
use crate::models::suggestion::SuggestionType;

/// Template-based local generator
pub struct FallbackGenerator;

impl FallbackGenerator {
    /// Produce a suggestion without any external call
    pub fn generate(request: &SuggestionRequest) -> String {
        let name = request
            .relationship_name
            .as_deref()
            .unwrap_or("someone you care about");

        let base = match (request.suggestion_type, request.relationship_type) {
            (SuggestionType::Gift, Some(RelationshipType::Romantic)) => format!(
                "Put together a small memory box for {}: a photo, a ticket stub, and a handwritten note.",
                name
            ),
            (SuggestionType::Gift, _) => format!(
                "Pick up something small that reminded you of {} and include a note saying why.",
                name
            ),
            (SuggestionType::Activity, Some(RelationshipType::Professional)) => format!(
                "Invite {} for a coffee walk instead of a meeting room catch-up.",
                name
            ),
            (SuggestionType::Activity, _) => format!(
                "Plan a low-pressure activity with {}: a walk, a market visit, or cooking together.",
                name
            ),
            (SuggestionType::MessagePrompt, _) => format!(
                "Send {} a message about a specific moment you appreciated recently, and ask how their week is going.",
                name
            ),
            (SuggestionType::ConversationStarter, _) => format!(
                "Ask {} what they have been excited about lately, and follow up on the details.",
                name
            ),
            (SuggestionType::CommunicationFeedback, _) => format!(
                "When talking with {}, try reflecting back what you heard before responding.",
                name
            ),
        };

        // The opaque preference context can personalize the template a
        // little without being interpreted
        if let Some((key, value)) = request.preferences.iter().next() {
            format!("{} (They mentioned {}: {}.)", base, key, value)
        } else {
            base
        }
    }
}
