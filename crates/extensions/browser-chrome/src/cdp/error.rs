//! CDP error types.

use thiserror::Error;

use comoderator_protocols::BrowserError;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Nothing answering on the debugging endpoint.
    #[error("Chrome not available at {0}")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Error object returned by the browser.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    /// The WebSocket is gone; no further commands can succeed.
    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error as WsError;
        match e {
            WsError::ConnectionClosed | WsError::AlreadyClosed => CdpError::SessionClosed,
            other => CdpError::WebSocket(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(msg) | CdpError::ChromeNotAvailable(msg) => {
                BrowserError::LaunchFailed(msg)
            }
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::ElementNotFound(msg) => BrowserError::ElementNotFound(msg),
            CdpError::JavaScript(msg) => BrowserError::JavaScript(msg),
            CdpError::SessionClosed | CdpError::WebSocket(_) => BrowserError::NotConnected,
            other => BrowserError::ActionFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_closed_is_connection_loss() {
        let err: BrowserError = CdpError::SessionClosed.into();
        assert!(err.is_connection_loss());

        let err: BrowserError = CdpError::WebSocket("reset".to_string()).into();
        assert!(err.is_connection_loss());
    }

    #[test]
    fn test_error_mapping() {
        let err: BrowserError = CdpError::JavaScript("x is not defined".to_string()).into();
        assert!(matches!(err, BrowserError::JavaScript(_)));

        let err: BrowserError = CdpError::ElementNotFound("#send".to_string()).into();
        assert!(matches!(err, BrowserError::ElementNotFound(_)));

        let err: BrowserError = CdpError::Protocol {
            code: -32000,
            message: "Could not compute box model.".to_string(),
        }
        .into();
        assert!(matches!(err, BrowserError::ActionFailed(ref m) if m.contains("box model")));
        assert!(!err.is_connection_loss());
    }

    #[test]
    fn test_websocket_closed_maps_to_session_closed() {
        let err: CdpError = tokio_tungstenite::tungstenite::Error::ConnectionClosed.into();
        assert!(matches!(err, CdpError::SessionClosed));
    }
}
