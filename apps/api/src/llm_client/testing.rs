//! Scripted in-process `GenerativeModel` for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatRequest, ChunkReceiver, GenerativeModel, LlmError, StructuredRequest};

pub enum ScriptedStream {
    /// Streams every chunk, then closes cleanly.
    Chunks(Vec<String>),
    /// Streams the chunks, then yields an error.
    FailAfter(Vec<String>),
    /// Fails before any chunk is produced.
    Refuse,
}

impl ScriptedStream {
    pub fn chunks(chunks: &[&str]) -> Self {
        Self::Chunks(chunks.iter().map(|c| c.to_string()).collect())
    }

    pub fn fail_after(chunks: &[&str]) -> Self {
        Self::FailAfter(chunks.iter().map(|c| c.to_string()).collect())
    }
}

/// Replies are consumed in FIFO order; an empty script fails the call.
#[derive(Default)]
pub struct ScriptedModel {
    structured: Mutex<VecDeque<Result<String, LlmError>>>,
    streams: Mutex<VecDeque<ScriptedStream>>,
    structured_calls: Mutex<Vec<StructuredRequest>>,
    chat_calls: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn push_json(&self, payload: impl Into<String>) {
        self.structured.lock().unwrap().push_back(Ok(payload.into()));
    }

    pub fn push_error(&self, error: LlmError) {
        self.structured.lock().unwrap().push_back(Err(error));
    }

    pub fn push_stream(&self, stream: ScriptedStream) {
        self.streams.lock().unwrap().push_back(stream);
    }

    pub fn structured_calls(&self) -> Vec<StructuredRequest> {
        self.structured_calls.lock().unwrap().clone()
    }

    pub fn chat_calls(&self) -> Vec<ChatRequest> {
        self.chat_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_json(&self, request: StructuredRequest) -> Result<String, LlmError> {
        self.structured_calls.lock().unwrap().push(request);
        self.structured
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }

    async fn stream_chat(&self, request: ChatRequest) -> Result<ChunkReceiver, LlmError> {
        self.chat_calls.lock().unwrap().push(request);
        let script = self.streams.lock().unwrap().pop_front();

        let (chunks, fail) = match script {
            Some(ScriptedStream::Chunks(chunks)) => (chunks, false),
            Some(ScriptedStream::FailAfter(chunks)) => (chunks, true),
            Some(ScriptedStream::Refuse) | None => {
                return Err(LlmError::Api {
                    status: 503,
                    message: "scripted refusal".to_string(),
                })
            }
        };

        let (tx, rx) = mpsc::channel(chunks.len() + 1);
        for chunk in chunks {
            tx.try_send(Ok(chunk)).expect("channel sized for script");
        }
        if fail {
            tx.try_send(Err(LlmError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            }))
            .expect("channel sized for script");
        }
        Ok(rx)
    }
}
