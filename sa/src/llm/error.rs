//! LLM error types

use thiserror::Error;

/// Errors from the schedule-parsing LLM call
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Whether the caller could reasonably retry the request
    ///
    /// The parser itself never retries; that decision belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::ApiError { status, .. } => *status == 429 || *status >= 500,
            LlmError::Network(_) => true,
            LlmError::InvalidResponse(_) => false,
            LlmError::Json(_) => false,
        }
    }
}
