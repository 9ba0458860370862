use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure reported by a caption generation backend. The message is shown to the user
/// as-is, so it should read as a retryable failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<LlmError> for ServiceError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { message, .. } => ServiceError::new(message),
            other => ServiceError::new(other.to_string()),
        }
    }
}

/// Errors surfaced by the caption core. None of them leave a session unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptionError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Caption generation failed: {0}")]
    Service(#[from] ServiceError),

    #[error("No caption at index {index} (session has {len})")]
    Index { index: usize, len: usize },

    #[error("A caption generation is already in progress")]
    Busy,
}
