pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::screens::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Hiring screen
        .route("/api/v1/hiring", post(handlers::handle_create_hiring))
        .route(
            "/api/v1/hiring/:id",
            get(handlers::handle_get_hiring).delete(handlers::handle_delete_hiring),
        )
        .route("/api/v1/hiring/:id/form", patch(handlers::handle_update_form))
        .route(
            "/api/v1/hiring/:id/quick-start/:template",
            post(handlers::handle_quick_start),
        )
        .route("/api/v1/hiring/:id/kit", post(handlers::handle_generate_kit))
        .route(
            "/api/v1/hiring/:id/onboarding",
            post(handlers::handle_generate_onboarding),
        )
        .route(
            "/api/v1/hiring/:id/resume-analysis",
            post(handlers::handle_analyze_resume),
        )
        .route("/api/v1/hiring/:id/tab", put(handlers::handle_select_tab))
        .route("/api/v1/hiring/:id/copy/:target", post(handlers::handle_copy))
        // Chat screen
        .route("/api/v1/chat", post(handlers::handle_create_chat))
        .route(
            "/api/v1/chat/:id",
            get(handlers::handle_get_chat).delete(handlers::handle_delete_chat),
        )
        .route(
            "/api/v1/chat/:id/messages",
            post(handlers::handle_send_message),
        )
        .with_state(state)
}
