/// LLM client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Everything goes through the `GenerativeModel` trait so the client can be
/// swapped for a scripted one in tests.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

pub mod chat;
pub mod gemini;
pub mod prompts;
pub mod sse;

#[cfg(test)]
pub mod testing;

pub use chat::{start_chat, ChatSession};
pub use gemini::GeminiClient;

pub const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Model identifiers and generation settings shared by every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub structured_model: String,
    pub chat_model: String,
    pub thinking_budget: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            structured_model: "gemini-2.5-pro".to_string(),
            chat_model: "gemini-2.5-flash".to_string(),
            thinking_budget: 32768,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One committed exchange entry in a multi-turn conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// A single-shot call constrained to a JSON response schema.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub model: String,
    pub prompt: String,
    pub schema: Value,
    pub thinking_budget: Option<u32>,
}

/// A chat turn: prior history plus the new user message.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub system_instruction: String,
    pub history: Vec<Turn>,
    pub message: String,
}

/// Receiving end of a streamed reply. Each item is one text delta.
/// The channel closes when the remote side finishes.
pub type ChunkReceiver = mpsc::Receiver<Result<String, LlmError>>;

/// The remote generation service.
///
/// Carried in `AppState` as `Arc<dyn GenerativeModel>`.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Returns the raw text payload of a schema-constrained call.
    async fn generate_json(&self, request: StructuredRequest) -> Result<String, LlmError>;

    /// Opens a streamed chat reply.
    async fn stream_chat(&self, request: ChatRequest) -> Result<ChunkReceiver, LlmError>;
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
        assert_eq!(Role::User.as_str(), "user");
    }

    #[test]
    fn test_default_models() {
        let models = ModelConfig::default();
        assert_eq!(models.structured_model, "gemini-2.5-pro");
        assert_eq!(models.chat_model, "gemini-2.5-flash");
        assert_eq!(models.thinking_budget, 32768);
    }
}
