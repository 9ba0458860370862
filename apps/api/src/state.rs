use std::sync::Arc;

use crate::captions::service::CaptionService;
use crate::captions::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable caption backend. Picked at startup via CAPTION_BACKEND.
    pub captions: Arc<dyn CaptionService>,
    pub sessions: SessionStore,
}
