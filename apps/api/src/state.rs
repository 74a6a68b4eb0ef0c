use std::sync::Arc;

use crate::llm_client::{GenerativeModel, ModelConfig};
use crate::screens::{ChatRoom, HiringSession};
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one remote model client. A scripted model is swapped in for tests.
    pub llm: Arc<dyn GenerativeModel>,
    pub models: ModelConfig,
    pub hiring: Arc<SessionStore<HiringSession>>,
    pub chats: Arc<SessionStore<ChatRoom>>,
}

impl AppState {
    pub fn new(llm: Arc<dyn GenerativeModel>, models: ModelConfig) -> Self {
        Self {
            llm,
            models,
            hiring: Arc::new(SessionStore::new()),
            chats: Arc::new(SessionStore::new()),
        }
    }
}
