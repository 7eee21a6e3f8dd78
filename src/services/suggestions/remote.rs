//! Remote Suggestion Provider
//!
//! Calls a chat-completions style HTTP endpoint to generate suggestion
//! text. The endpoint, model, and API key come from the application
//! config.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{
    parse_http_error, SuggestionError, SuggestionProvider, SuggestionRequest, SuggestionResult,
};
use crate::models::suggestion::SuggestionType;

/// Remote HTTP provider
pub struct RemoteProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

impl RemoteProvider {
    /// Create a provider for the given endpoint and model
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Self {
        Self {
            endpoint,
            model,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Build the prompt describing what to suggest
    fn build_prompt(request: &SuggestionRequest) -> String {
        let ask = match request.suggestion_type {
            SuggestionType::Gift => "Suggest one thoughtful gift idea",
            SuggestionType::Activity => "Suggest one activity to do together",
            SuggestionType::MessagePrompt => "Write one short, warm message to send",
            SuggestionType::ConversationStarter => "Suggest one conversation starter",
            SuggestionType::CommunicationFeedback => {
                "Give one piece of feedback on how to communicate better"
            }
        };

        let mut prompt = String::from(ask);
        if let Some(name) = &request.relationship_name {
            prompt.push_str(&format!(" for {}", name));
        }
        if let Some(ty) = &request.relationship_type {
            prompt.push_str(&format!(" (relationship: {})", ty));
        }
        prompt.push('.');

        // Forward the opaque preference context verbatim
        if !request.preferences.is_empty() {
            prompt.push_str(" Context:");
            for (key, value) in &request.preferences {
                prompt.push_str(&format!(" {}: {}.", key, value));
            }
        }
        prompt.push_str(" Answer in two sentences or less.");
        prompt
    }

    fn build_request_body(&self, request: &SuggestionRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": 200,
            "temperature": 0.8,
            "messages": [
                {
                    "role": "system",
                    "content": "You help people maintain their personal relationships. \
                                Be specific, warm, and brief."
                },
                {
                    "role": "user",
                    "content": Self::build_prompt(request)
                }
            ]
        })
    }
}

#[async_trait]
impl SuggestionProvider for RemoteProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn generate(&self, request: &SuggestionRequest) -> SuggestionResult<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            SuggestionError::NotConfigured {
                message: "API key not configured for remote provider".to_string(),
            }
        })?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&self.build_request_body(request))
            .send()
            .await
            .map_err(|e| SuggestionError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SuggestionError::NetworkError {
                message: e.to_string(),
            })?;

        if !(200..300).contains(&status) {
            return Err(parse_http_error(status, &body, self.name()));
        }

        let parsed: CompletionResponse =
            serde_json::from_str(&body).map_err(|e| SuggestionError::ParseError {
                message: format!("Failed to parse completion response: {}", e),
            })?;

        let text = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| SuggestionError::ParseError {
                message: "Completion response contained no text".to_string(),
            })?;

        Ok(text)
    }

    async fn health_check(&self) -> SuggestionResult<()> {
        if self.api_key.is_none() {
            return Err(SuggestionError::NotConfigured {
                message: "API key not configured for remote provider".to_string(),
            });
        }
        if self.endpoint.trim().is_empty() {
            return Err(SuggestionError::NotConfigured {
                message: "Endpoint not configured for remote provider".to_string(),
            });
        }
        Ok(())
    }
}
