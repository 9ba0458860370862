//! Axum route handlers for the Caption API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::captions::limits::{char_len, character_count, limits_for, truncate_text};
use crate::captions::service::{GeneratedCaption, GenerationRequest};
use crate::captions::session::{Caption, CaptionSession};
use crate::captions::store::SessionHandle;
use crate::captions::style::{Length, Platform, StyleOptions, Tone};
use crate::errors::AppError;
use crate::llm_client::Usage;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateCaptionResponse {
    pub success: bool,
    pub captions: Vec<GeneratedCaption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Partial update of a session's form inputs. Absent fields are left alone.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    pub content: Option<String>,
    pub platform: Option<Platform>,
    pub tone: Option<Tone>,
    pub length: Option<Length>,
    pub include_hashtags: Option<bool>,
    pub include_emojis: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionView {
    #[serde(flatten)]
    pub caption: Caption,
    pub characters: usize,
    pub character_label: String,
    pub exceeds_limit: bool,
    /// Longer than the length that tends to perform best on the platform.
    pub over_recommended: bool,
    /// Caption text cut to the platform's hard limit.
    pub fitted_text: String,
}

impl CaptionView {
    fn new(caption: &Caption) -> Self {
        let limits = limits_for(&caption.platform);
        let characters = char_len(&caption.text);
        Self {
            caption: caption.clone(),
            characters,
            character_label: character_count(&caption.text),
            exceeds_limit: characters > limits.max_length,
            over_recommended: characters > limits.recommended_length,
            fitted_text: truncate_text(&caption.text, limits.max_length),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub content: String,
    #[serde(flatten)]
    pub options: StyleOptions,
    pub is_loading: bool,
    pub captions: Vec<CaptionView>,
}

impl SessionView {
    fn new(handle: &SessionHandle, session: &CaptionSession) -> Self {
        Self {
            id: handle.id,
            created_at: handle.created_at,
            content: session.content().to_string(),
            options: session.options().clone(),
            is_loading: session.is_loading(),
            captions: session.captions().iter().map(CaptionView::new).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CaptionTextResponse {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

async fn find_session(state: &AppState, id: Uuid) -> Result<Arc<SessionHandle>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

async fn render(handle: &SessionHandle) -> SessionView {
    let session = handle.session.lock().await;
    SessionView::new(handle, &session)
}

/// POST /api/generate-caption
///
/// Stateless generation: one request in, caption variants out.
pub async fn handle_generate_caption(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateCaptionResponse>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation(
            "Content description is required".to_string(),
        ));
    }

    let batch = state.captions.generate(&request).await?;

    Ok(Json(GenerateCaptionResponse {
        success: true,
        captions: batch.captions,
        usage: batch.usage,
    }))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let handle = state.sessions.create().await;
    info!("Created caption session {}", handle.id);
    (StatusCode::CREATED, Json(render(&handle).await))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find_session(&state, id).await?;
    Ok(Json(render(&handle).await))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    info!("Ended caption session {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/sessions/:id
pub async fn handle_update_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<SessionUpdate>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find_session(&state, id).await?;
    let mut session = handle.session.lock().await;

    if let Some(content) = update.content {
        session.set_content(content);
    }
    if let Some(platform) = update.platform {
        session.set_platform(platform);
    }
    if let Some(tone) = update.tone {
        session.set_tone(tone);
    }
    if let Some(length) = update.length {
        session.set_length(length);
    }
    if let Some(include) = update.include_hashtags {
        session.set_include_hashtags(include);
    }
    if let Some(include) = update.include_emojis {
        session.set_include_emojis(include);
    }

    Ok(Json(SessionView::new(&handle, &session)))
}

/// POST /api/v1/sessions/:id/generate
pub async fn handle_session_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find_session(&state, id).await?;
    Arc::clone(&handle).generate(state.captions).await?;
    Ok(Json(render(&handle).await))
}

/// POST /api/v1/sessions/:id/regenerate
pub async fn handle_session_regenerate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find_session(&state, id).await?;
    Arc::clone(&handle).regenerate(state.captions).await?;
    Ok(Json(render(&handle).await))
}

/// DELETE /api/v1/sessions/:id/captions
pub async fn handle_clear_captions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find_session(&state, id).await?;
    let mut session = handle.session.lock().await;
    session.clear();
    Ok(Json(SessionView::new(&handle, &session)))
}

/// POST /api/v1/sessions/:id/captions/:index/favorite
pub async fn handle_toggle_favorite(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<CaptionView>, AppError> {
    let handle = find_session(&state, id).await?;
    let mut session = handle.session.lock().await;
    let caption = session.toggle_favorite(index)?;
    Ok(Json(CaptionView::new(caption)))
}

/// GET /api/v1/sessions/:id/captions/:index/text
///
/// Returns the exact caption text for the client to put on its clipboard.
pub async fn handle_copy_text(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<CaptionTextResponse>, AppError> {
    let handle = find_session(&state, id).await?;
    let session = handle.session.lock().await;
    let text = session.copy_text(index)?.to_string();
    Ok(Json(CaptionTextResponse { text }))
}
