//! Wire types of the chat completions API.

use serde::{Serialize, Deserialize};

/// One message of the conversation sent to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role, `user` for prompts
    pub role: String,
    /// Message text
    pub content: String,
}

/// Request body of `POST /chat/completions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation, a single user message here
    pub messages: Vec<ChatMessage>,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

/// Response body; `null` and missing fields both read as absent
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    /// Generated alternatives
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
    /// Error payload some providers return alongside a 200
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// A single generated alternative
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The assistant message
    pub message: ChoiceMessage,
}

/// Assistant message of a choice
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text
    #[serde(default)]
    pub content: Option<String>,
}

/// Error object of a completion response
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Error category
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}
