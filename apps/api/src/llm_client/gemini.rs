//! Gemini REST implementation of `GenerativeModel`.
//!
//! Structured calls go to `models/{model}:generateContent` with a response
//! schema; chat goes to `models/{model}:streamGenerateContent?alt=sse`.
//! No retries and no request timeout: a call runs until the remote side answers.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::sse::SseDecoder;
use super::{
    ChatRequest, ChunkReceiver, GenerativeModel, LlmError, Role, StructuredRequest,
    JSON_MIME_TYPE,
};
use crate::config::ApiKey;

const STREAM_BUFFER: usize = 32;

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: ApiKey, base_url: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post(&self, url: &str, body: &GeminiRequest<'_>) -> Result<Response, LlmError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_json(&self, request: StructuredRequest) -> Result<String, LlmError> {
        let body = GeminiRequest {
            contents: vec![Content::text(Role::User, &request.prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: &request.schema,
                thinking_config: request.thinking_budget.map(|thinking_budget| ThinkingConfig {
                    thinking_budget,
                }),
            }),
        };

        let url = self.endpoint(&request.model, "generateContent");
        let response: GeminiResponse = self.post(&url, &body).await?.json().await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                request.model,
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0)
            );
        }

        response.text().ok_or(LlmError::EmptyContent)
    }

    async fn stream_chat(&self, request: ChatRequest) -> Result<ChunkReceiver, LlmError> {
        let mut contents: Vec<Content<'_>> = request
            .history
            .iter()
            .map(|turn| Content::text(turn.role, &turn.text))
            .collect();
        contents.push(Content::text(Role::User, &request.message));

        let body = GeminiRequest {
            contents,
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            }),
            generation_config: None,
        };

        let url = format!(
            "{}?alt=sse",
            self.endpoint(&request.model, "streamGenerateContent")
        );
        let response = self.post(&url, &body).await?;

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(pump_sse(response, tx));
        Ok(rx)
    }
}

/// Drains the SSE body into the chunk channel. Stops early if the receiver is dropped.
async fn pump_sse(response: Response, tx: mpsc::Sender<Result<String, LlmError>>) {
    let mut decoder = SseDecoder::default();
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(bytes) => {
                for payload in decoder.push(&bytes) {
                    if !forward(&tx, &payload).await {
                        return;
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(Err(LlmError::Http(e))).await;
                return;
            }
        }
    }

    if let Some(payload) = decoder.finish() {
        forward(&tx, &payload).await;
    }
}

/// Sends the text of one SSE payload. Returns false when streaming should stop.
///
/// An `error` object inside the stream ends the reply as a failure.
async fn forward(tx: &mpsc::Sender<Result<String, LlmError>>, payload: &str) -> bool {
    match serde_json::from_str::<GeminiResponse>(payload) {
        Ok(GeminiResponse {
            error: Some(error), ..
        }) => {
            warn!("Gemini stream returned {}: {}", error.code, error.message);
            let _ = tx
                .send(Err(LlmError::Api {
                    status: error.code,
                    message: error.message,
                }))
                .await;
            false
        }
        Ok(chunk) => match chunk.text() {
            Some(text) => tx.send(Ok(text)).await.is_ok(),
            None => true,
        },
        Err(e) => {
            let _ = tx.send(Err(LlmError::Parse(e))).await;
            false
        }
    }
}

fn api_error_message(body: String) -> String {
    serde_json::from_str::<GeminiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn text(role: Role, text: &'a str) -> Self {
        Self {
            role: role.as_str(),
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    /// Thought summaries are not part of the answer.
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    code: u16,
    message: String,
}

impl GeminiResponse {
    /// Concatenated answer text of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
