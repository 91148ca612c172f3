//! Browser session errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Navigation to {url} timed out after {timeout_ms} ms")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("None of [{}] appeared within {timeout_ms} ms", .candidates.join(", "))]
    SelectorNotFound {
        candidates: Vec<String>,
        timeout_ms: u64,
    },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Action failed: {0}")]
    ActionFailed(String),
}

impl BrowserError {
    /// Whether the error means the page or the browser process is gone.
    pub fn is_connection_loss(&self) -> bool {
        matches!(self, BrowserError::NotConnected)
    }
}
