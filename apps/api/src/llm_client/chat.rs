//! Multi-turn chat session with streamed replies.
//!
//! A `ChatStream` mutably borrows its session, so a session can only have one
//! outstanding send at a time. History is committed only when a stream
//! finishes cleanly; a failed turn leaves the session as it was.

use std::sync::Arc;

use super::prompts::CHAT_SYSTEM_INSTRUCTION;
use super::{ChatRequest, ChunkReceiver, GenerativeModel, LlmError, Role, Turn};

pub struct ChatSession {
    llm: Arc<dyn GenerativeModel>,
    model: String,
    system_instruction: String,
    history: Vec<Turn>,
}

/// Creates a session preloaded with the assistant's system instruction.
pub fn start_chat(llm: Arc<dyn GenerativeModel>, model: impl Into<String>) -> ChatSession {
    ChatSession {
        llm,
        model: model.into(),
        system_instruction: CHAT_SYSTEM_INSTRUCTION.to_string(),
        history: Vec::new(),
    }
}

impl ChatSession {
    #[cfg(test)]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Sends a user message and returns the stream of reply chunks.
    pub async fn send_message_stream(&mut self, text: &str) -> Result<ChatStream<'_>, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            system_instruction: self.system_instruction.clone(),
            history: self.history.clone(),
            message: text.to_string(),
        };
        let receiver = self.llm.stream_chat(request).await?;

        Ok(ChatStream {
            session: self,
            receiver: Some(receiver),
            message: text.to_string(),
            reply: String::new(),
        })
    }
}

/// Single-consumer, finite, non-restartable sequence of reply chunks.
pub struct ChatStream<'a> {
    session: &'a mut ChatSession,
    receiver: Option<ChunkReceiver>,
    message: String,
    reply: String,
}

impl ChatStream<'_> {
    /// Next text delta; `None` once the reply is complete or after an error.
    pub async fn next(&mut self) -> Option<Result<String, LlmError>> {
        let receiver = self.receiver.as_mut()?;
        match receiver.recv().await {
            Some(Ok(chunk)) => {
                self.reply.push_str(&chunk);
                Some(Ok(chunk))
            }
            Some(Err(e)) => {
                self.receiver = None;
                Some(Err(e))
            }
            None => {
                self.receiver = None;
                self.commit();
                None
            }
        }
    }

    fn commit(&mut self) {
        self.session.history.push(Turn {
            role: Role::User,
            text: std::mem::take(&mut self.message),
        });
        self.session.history.push(Turn {
            role: Role::Model,
            text: std::mem::take(&mut self.reply),
        });
    }
}
