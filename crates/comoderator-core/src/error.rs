//! Engine error types.

use thiserror::Error;

use comoderator_protocols::{BrowserError, EngineState};

/// Errors raised by the engine.
///
/// Join-phase kinds (`LaunchError`, `NavigationTimeout`, `SelectorNotFound`)
/// fail the join attempt. Per-tick and per-message kinds are logged or turned
/// into events and never stop monitoring.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: EngineState,
    },

    #[error("Browser launch failed: {0}")]
    LaunchError(String),

    #[error("Navigation to {url} timed out after {timeout_ms} ms")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    #[error("None of [{}] appeared within {timeout_ms} ms", .candidates.join(", "))]
    SelectorNotFound {
        candidates: Vec<String>,
        timeout_ms: u64,
    },

    #[error("Chat extraction failed: {0}")]
    ExtractionError(String),

    #[error("Answer generation failed: {0}")]
    AnswerGenerationError(String),

    #[error("Could not find chat input or send button to post message")]
    PostNotFound,

    #[error("Failed to post to chat: {0}")]
    PostError(String),

    #[error("Browser error: {0}")]
    Browser(BrowserError),
}

impl EngineError {
    /// The browser or page is gone; the session cannot continue.
    pub fn is_session_lost(&self) -> bool {
        matches!(self, EngineError::Browser(e) if e.is_connection_loss())
    }
}

impl From<BrowserError> for EngineError {
    fn from(err: BrowserError) -> Self {
        match err {
            BrowserError::LaunchFailed(msg) => EngineError::LaunchError(msg),
            BrowserError::NavigationTimeout { url, timeout_ms } => {
                EngineError::NavigationTimeout { url, timeout_ms }
            }
            BrowserError::SelectorNotFound {
                candidates,
                timeout_ms,
            } => EngineError::SelectorNotFound {
                candidates,
                timeout_ms,
            },
            other => EngineError::Browser(other),
        }
    }
}
