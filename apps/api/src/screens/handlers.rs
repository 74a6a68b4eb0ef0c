//! Axum route handlers for the hiring and chat screens.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::start_chat;
use crate::render::views::{ChatView, HiringView};
use crate::screens::chat::{ChatMessage, ChatRoom, TurnOutcome};
use crate::screens::clipboard::{CopyTarget, MemoryClipboard};
use crate::screens::hiring::{FormUpdate, HiringSession, Tab};
use crate::screens::templates::QuickStart;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreatedHiring {
    pub id: Uuid,
    pub view: HiringView,
}

#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: Tab,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub text: String,
    pub copied: bool,
}

#[derive(Debug, Serialize)]
pub struct CreatedChat {
    pub id: Uuid,
    pub view: ChatView,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Which of the hiring screen's operations a request runs.
#[derive(Debug, Clone, Copy)]
enum HiringOperation {
    Kit,
    Onboarding,
    Analysis,
}

fn hiring_session(state: &AppState, id: Uuid) -> Result<Arc<HiringSession>, AppError> {
    state
        .hiring
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Hiring screen {id} not found")))
}

fn chat_room(state: &AppState, id: Uuid) -> Result<Arc<ChatRoom>, AppError> {
    state
        .chats
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Chat {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Hiring screen
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/hiring
pub async fn handle_create_hiring(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreatedHiring>) {
    let (id, session) = state.hiring.insert(HiringSession::new());
    info!(%id, open = state.hiring.len(), "Hiring screen created");
    (
        StatusCode::CREATED,
        Json(CreatedHiring {
            id,
            view: session.view(),
        }),
    )
}

/// GET /api/v1/hiring/:id
pub async fn handle_get_hiring(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HiringView>, AppError> {
    Ok(Json(hiring_session(&state, id)?.view()))
}

/// DELETE /api/v1/hiring/:id
pub async fn handle_delete_hiring(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .hiring
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Hiring screen {id} not found")))?;
    info!(%id, open = state.hiring.len(), "Hiring screen closed");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/hiring/:id/form
pub async fn handle_update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<FormUpdate>,
) -> Result<Json<HiringView>, AppError> {
    let session = hiring_session(&state, id)?;
    let mut screen = session.screen();
    screen.update_form(update)?;
    Ok(Json(screen.view()))
}

/// POST /api/v1/hiring/:id/quick-start/:template
pub async fn handle_quick_start(
    State(state): State<AppState>,
    Path((id, template)): Path<(Uuid, QuickStart)>,
) -> Result<Json<HiringView>, AppError> {
    let session = hiring_session(&state, id)?;
    let mut screen = session.screen();
    screen.apply_quick_start(template)?;
    Ok(Json(screen.view()))
}

/// POST /api/v1/hiring/:id/kit
pub async fn handle_generate_kit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HiringView>, AppError> {
    run_hiring_operation(state, id, HiringOperation::Kit).await
}

/// POST /api/v1/hiring/:id/onboarding
pub async fn handle_generate_onboarding(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HiringView>, AppError> {
    run_hiring_operation(state, id, HiringOperation::Onboarding).await
}

/// POST /api/v1/hiring/:id/resume-analysis
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HiringView>, AppError> {
    run_hiring_operation(state, id, HiringOperation::Analysis).await
}

/// Runs the operation on its own task so the screen always leaves its busy
/// state, even if the client goes away mid-request. A failed operation
/// answers 502; its message is also left in the screen's error slot.
async fn run_hiring_operation(
    state: AppState,
    id: Uuid,
    operation: HiringOperation,
) -> Result<Json<HiringView>, AppError> {
    let session = hiring_session(&state, id)?;

    let view = tokio::spawn(async move {
        let llm = state.llm.as_ref();
        match operation {
            HiringOperation::Kit => session.generate_kit(llm, &state.models).await,
            HiringOperation::Onboarding => session.generate_onboarding(llm, &state.models).await,
            HiringOperation::Analysis => session.analyze_resume(llm, &state.models).await,
        }
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    let failure = match operation {
        HiringOperation::Kit => &view.errors.kit,
        HiringOperation::Onboarding => &view.errors.onboarding,
        HiringOperation::Analysis => &view.errors.analysis,
    };
    if let Some(message) = failure {
        return Err(AppError::Generation(message.clone()));
    }

    match operation {
        HiringOperation::Kit => info!(%id, "Hiring kit generated"),
        HiringOperation::Onboarding => info!(%id, "Onboarding plan attached"),
        HiringOperation::Analysis => info!(%id, "Resume analysis complete"),
    }
    Ok(Json(view))
}

/// PUT /api/v1/hiring/:id/tab
pub async fn handle_select_tab(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectTabRequest>,
) -> Result<Json<HiringView>, AppError> {
    let session = hiring_session(&state, id)?;
    let mut screen = session.screen();
    screen.select_tab(request.tab)?;
    Ok(Json(screen.view()))
}

/// POST /api/v1/hiring/:id/copy/:target
///
/// The server has no system clipboard. The copy lands in a `MemoryClipboard`
/// whose contents are returned, and the browser writes them to the real clipboard.
pub async fn handle_copy(
    State(state): State<AppState>,
    Path((id, target)): Path<(Uuid, CopyTarget)>,
) -> Result<Json<CopyResponse>, AppError> {
    let session = hiring_session(&state, id)?;
    let screen = session.screen();
    let clipboard = MemoryClipboard::default();
    screen.copy(target, &clipboard)?;
    Ok(Json(CopyResponse {
        text: clipboard.last().unwrap_or_default(),
        copied: screen.copied_targets().contains(&target),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Chat screen
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/chat
pub async fn handle_create_chat(State(state): State<AppState>) -> (StatusCode, Json<CreatedChat>) {
    let room = ChatRoom::new(start_chat(
        Arc::clone(&state.llm),
        state.models.chat_model.clone(),
    ));
    let (id, room) = state.chats.insert(room);
    info!(%id, open = state.chats.len(), "Chat session started");
    (
        StatusCode::CREATED,
        Json(CreatedChat {
            id,
            view: room.snapshot(),
        }),
    )
}

/// GET /api/v1/chat/:id
pub async fn handle_get_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatView>, AppError> {
    Ok(Json(chat_room(&state, id)?.snapshot()))
}

/// DELETE /api/v1/chat/:id
pub async fn handle_delete_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .chats
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Chat {id} not found")))?;
    info!(%id, open = state.chats.len(), "Chat session closed");
    Ok(StatusCode::NO_CONTENT)
}

enum ChatEvent {
    Chunk(ChatMessage),
    Done(ChatMessage),
    Error(ChatMessage),
}

impl ChatEvent {
    fn into_sse(self) -> Event {
        let (name, message) = match self {
            ChatEvent::Chunk(message) => ("chunk", message),
            ChatEvent::Done(message) => ("done", message),
            ChatEvent::Error(message) => ("error", message),
        };
        let data = serde_json::to_string(&message).unwrap_or_default();
        Event::default().event(name).data(data)
    }
}

/// POST /api/v1/chat/:id/messages
///
/// Streams `chunk` events carrying the reply so far, then one `done` or
/// `error` event. The message is validated before the stream opens.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let room = chat_room(&state, id)?;
    let turn = room.begin_turn(&request.text)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let updates = tx.clone();
        let outcome = room
            .stream_reply(turn, move |message| {
                let _ = updates.send(ChatEvent::Chunk(message.clone()));
            })
            .await;
        let last = match outcome {
            TurnOutcome::Completed(message) => ChatEvent::Done(message),
            TurnOutcome::Failed(message) => ChatEvent::Error(message),
        };
        let _ = tx.send(last);
    });

    let stream = async_stream::stream! {
        while let Some(event) = rx.recv().await {
            yield Ok::<_, Infallible>(event.into_sse());
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
