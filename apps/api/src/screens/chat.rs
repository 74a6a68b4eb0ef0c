//! Chat screen view-state.
//!
//! The transcript always starts with the assistant's greeting. A turn appends
//! the user's message and a "..." placeholder for the reply; each streamed
//! chunk replaces the placeholder with the reply so far.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::llm_client::{ChatSession, Role};
use crate::render::views::ChatView;

pub const GREETING: &str = "Hello! How can I assist you today?";
pub const PLACEHOLDER: &str = "...";
pub const APOLOGY: &str = "Sorry, I encountered an error.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatPhase {
    Idle,
    AwaitingFirstChunk,
    StreamingReply,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatRejection {
    #[error("Message cannot be empty.")]
    Empty,

    #[error("A reply is still being generated")]
    Busy,
}

/// How a turn ended, with the reply message as it now stands in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Completed(ChatMessage),
    /// The reply was replaced by the apology.
    Failed(ChatMessage),
}

#[cfg(test)]
impl TurnOutcome {
    pub fn message(&self) -> &ChatMessage {
        match self {
            TurnOutcome::Completed(message) | TurnOutcome::Failed(message) => message,
        }
    }
}

/// A started turn: the text to send and the id of its reply placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub message: String,
    pub reply_id: String,
}

#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    phase: ChatPhase,
    last_id: i64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                id: "init".to_string(),
                role: Role::Model,
                text: GREETING.to_string(),
            }],
            phase: ChatPhase::Idle,
            last_id: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn busy(&self) -> bool {
        self.phase != ChatPhase::Idle
    }

    /// Millisecond timestamp, bumped when needed so ids never repeat.
    fn next_id(&mut self) -> String {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id.to_string()
    }

    /// The message is sent exactly as typed; only emptiness is judged on trimmed text.
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn, ChatRejection> {
        if text.trim().is_empty() {
            return Err(ChatRejection::Empty);
        }
        if self.busy() {
            return Err(ChatRejection::Busy);
        }

        let user_id = self.next_id();
        self.messages.push(ChatMessage {
            id: user_id,
            role: Role::User,
            text: text.to_string(),
        });
        let reply_id = self.next_id();
        self.messages.push(ChatMessage {
            id: reply_id.clone(),
            role: Role::Model,
            text: PLACEHOLDER.to_string(),
        });
        self.phase = ChatPhase::AwaitingFirstChunk;

        Ok(PendingTurn {
            message: text.to_string(),
            reply_id,
        })
    }

    fn reply_mut(&mut self, reply_id: &str) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().rev().find(|m| m.id == reply_id)
    }

    /// Replaces the reply text with `reply_so_far` and returns the updated message.
    pub fn apply_chunk(&mut self, reply_id: &str, reply_so_far: &str) -> Option<ChatMessage> {
        if !self.busy() {
            return None;
        }
        let message = self.reply_mut(reply_id)?;
        message.text = reply_so_far.to_string();
        let updated = message.clone();
        self.phase = ChatPhase::StreamingReply;
        Some(updated)
    }

    pub fn fail_turn(&mut self, reply_id: &str) -> Option<ChatMessage> {
        self.phase = ChatPhase::Idle;
        let message = self.reply_mut(reply_id)?;
        message.text = APOLOGY.to_string();
        Some(message.clone())
    }

    pub fn finish_turn(&mut self, reply_id: &str) -> Option<ChatMessage> {
        self.phase = ChatPhase::Idle;
        self.reply_mut(reply_id).cloned()
    }
}

/// A chat screen: the remote session plus its visible transcript.
pub struct ChatRoom {
    session: tokio::sync::Mutex<ChatSession>,
    transcript: Mutex<Transcript>,
}

impl ChatRoom {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session: tokio::sync::Mutex::new(session),
            transcript: Mutex::new(Transcript::new()),
        }
    }

    fn transcript(&self) -> MutexGuard<'_, Transcript> {
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> ChatView {
        ChatView::from_transcript(&self.transcript())
    }

    pub fn begin_turn(&self, text: &str) -> Result<PendingTurn, ChatRejection> {
        self.transcript().begin_turn(text)
    }

    /// Drives a started turn to completion, calling `on_update` with the reply
    /// message after every chunk.
    pub async fn stream_reply<F>(&self, turn: PendingTurn, mut on_update: F) -> TurnOutcome
    where
        F: FnMut(&ChatMessage) + Send,
    {
        let mut session = self.session.lock().await;

        let outcome = match session.send_message_stream(&turn.message).await {
            Ok(mut stream) => {
                let mut reply = String::new();
                loop {
                    match stream.next().await {
                        Some(Ok(chunk)) => {
                            reply.push_str(&chunk);
                            let updated = self.transcript().apply_chunk(&turn.reply_id, &reply);
                            if let Some(message) = updated {
                                on_update(&message);
                            }
                        }
                        Some(Err(e)) => break Err(e),
                        None => break Ok(()),
                    }
                }
            }
            Err(e) => Err(e),
        };

        let missing = |reply_id: String| {
            warn!(reply_id = %reply_id, "Reply placeholder missing from transcript");
            ChatMessage {
                id: reply_id,
                role: Role::Model,
                text: APOLOGY.to_string(),
            }
        };

        match outcome {
            Ok(()) => {
                let finished = self.transcript().finish_turn(&turn.reply_id);
                info!(reply_id = %turn.reply_id, "Chat turn complete");
                TurnOutcome::Completed(finished.unwrap_or_else(|| missing(turn.reply_id)))
            }
            Err(e) => {
                error!("Chat error: {e}");
                let failed = self.transcript().fail_turn(&turn.reply_id);
                TurnOutcome::Failed(failed.unwrap_or_else(|| missing(turn.reply_id)))
            }
        }
    }

    #[cfg(test)]
    pub async fn send(&self, text: &str) -> Result<TurnOutcome, ChatRejection> {
        let turn = self.begin_turn(text)?;
        Ok(self.stream_reply(turn, |_| {}).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::start_chat;
    use crate::llm_client::testing::{ScriptedModel, ScriptedStream};

    fn room(model: &Arc<ScriptedModel>) -> ChatRoom {
        ChatRoom::new(start_chat(model.clone(), "gemini-2.5-flash"))
    }

    #[test]
    fn test_transcript_starts_with_greeting() {
        let transcript = Transcript::new();
        assert_eq!(
            transcript.messages(),
            &[ChatMessage {
                id: "init".to_string(),
                role: Role::Model,
                text: GREETING.to_string(),
            }]
        );
        assert_eq!(transcript.phase(), ChatPhase::Idle);
    }

    #[test]
    fn test_begin_turn_appends_user_and_placeholder() {
        let mut transcript = Transcript::new();
        let turn = transcript.begin_turn("  Hello  ").unwrap();
        assert_eq!(turn.message, "  Hello  ");

        let messages = transcript.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].text, "  Hello  ");
        assert_eq!(messages[2].text, PLACEHOLDER);
        assert_eq!(messages[2].id, turn.reply_id);
        assert_eq!(transcript.phase(), ChatPhase::AwaitingFirstChunk);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut transcript = Transcript::new();
        let mut ids = Vec::new();
        for _ in 0..3 {
            let turn = transcript.begin_turn("hi").unwrap();
            transcript.finish_turn(&turn.reply_id);
        }
        for message in &transcript.messages()[1..] {
            ids.push(message.id.parse::<i64>().unwrap());
        }
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "{ids:?}");
    }

    #[test]
    fn test_rejects_empty_and_busy() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.begin_turn("   \n"), Err(ChatRejection::Empty));
        assert_eq!(transcript.messages().len(), 1);

        transcript.begin_turn("one").unwrap();
        assert_eq!(transcript.begin_turn("two"), Err(ChatRejection::Busy));
        assert_eq!(transcript.messages().len(), 3);
    }

    #[test]
    fn test_chunks_move_to_streaming() {
        let mut transcript = Transcript::new();
        let turn = transcript.begin_turn("hi").unwrap();
        let updated = transcript.apply_chunk(&turn.reply_id, "Hi").unwrap();
        assert_eq!(updated.text, "Hi");
        assert_eq!(transcript.phase(), ChatPhase::StreamingReply);

        transcript.finish_turn(&turn.reply_id);
        assert_eq!(transcript.phase(), ChatPhase::Idle);
        assert!(transcript.apply_chunk(&turn.reply_id, "late").is_none());
    }

    #[tokio::test]
    async fn test_streamed_reply_is_concatenated() {
        let model = Arc::new(ScriptedModel::default());
        model.push_stream(ScriptedStream::chunks(&["Hi", " there!"]));
        let room = room(&model);

        let turn = room.begin_turn("Hello").unwrap();
        let mut seen = Vec::new();
        let reply = room
            .stream_reply(turn, |message| seen.push(message.text.clone()))
            .await;

        assert_eq!(
            reply,
            TurnOutcome::Completed(ChatMessage {
                id: reply.message().id.clone(),
                role: Role::Model,
                text: "Hi there!".to_string(),
            })
        );
        assert_eq!(seen, vec!["Hi", "Hi there!"]);

        let view = room.snapshot();
        assert_eq!(view.phase, ChatPhase::Idle);
        assert_eq!(view.messages.len(), 3);
        assert_eq!(view.messages[2].text, "Hi there!");
    }

    #[tokio::test]
    async fn test_stream_error_shows_apology() {
        let model = Arc::new(ScriptedModel::default());
        model.push_stream(ScriptedStream::fail_after(&["partial"]));
        let room = room(&model);

        let reply = room.send("Hello").await.unwrap();
        assert!(matches!(reply, TurnOutcome::Failed(_)));
        assert_eq!(reply.message().text, APOLOGY);
        assert_eq!(room.snapshot().phase, ChatPhase::Idle);
    }

    #[tokio::test]
    async fn test_refused_stream_shows_apology() {
        let model = Arc::new(ScriptedModel::default());
        model.push_stream(ScriptedStream::Refuse);
        let room = room(&model);

        let reply = room.send("Hello").await.unwrap();
        assert!(matches!(reply, TurnOutcome::Failed(_)));
        assert_eq!(room.snapshot().messages[2].text, APOLOGY);
    }

    #[tokio::test]
    async fn test_empty_message_makes_no_remote_call() {
        let model = Arc::new(ScriptedModel::default());
        let room = room(&model);

        assert_eq!(room.send("  ").await, Err(ChatRejection::Empty));
        assert!(model.chat_calls().is_empty());
        assert_eq!(room.snapshot().messages.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_turn_is_not_sent_as_history() {
        let model = Arc::new(ScriptedModel::default());
        model.push_stream(ScriptedStream::fail_after(&[]));
        model.push_stream(ScriptedStream::chunks(&["ok"]));
        let room = room(&model);

        room.send("first").await.unwrap();
        room.send("second").await.unwrap();

        let calls = model.chat_calls();
        assert!(calls[1].history.is_empty());
        assert_eq!(room.snapshot().messages.len(), 5);
    }
}
