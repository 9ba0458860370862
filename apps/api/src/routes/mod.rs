pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::captions::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless generation
        .route(
            "/api/generate-caption",
            post(handlers::handle_generate_caption),
        )
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session)
                .patch(handlers::handle_update_session)
                .delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/generate",
            post(handlers::handle_session_generate),
        )
        .route(
            "/api/v1/sessions/:id/regenerate",
            post(handlers::handle_session_regenerate),
        )
        .route(
            "/api/v1/sessions/:id/captions",
            delete(handlers::handle_clear_captions),
        )
        .route(
            "/api/v1/sessions/:id/captions/:index/favorite",
            post(handlers::handle_toggle_favorite),
        )
        .route(
            "/api/v1/sessions/:id/captions/:index/text",
            get(handlers::handle_copy_text),
        )
        .with_state(state)
}
