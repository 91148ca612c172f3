//! Chat extraction.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use comoderator_protocols::{BrowserSession, ChatEntry, SelectorCatalog};

use crate::error::EngineError;
use crate::scripts;

/// Reads the currently visible chat entries from the page.
#[derive(Clone)]
pub struct ChatMonitor {
    browser: Arc<dyn BrowserSession>,
    selectors: Arc<SelectorCatalog>,
}

impl ChatMonitor {
    pub fn new(browser: Arc<dyn BrowserSession>, selectors: Arc<SelectorCatalog>) -> Self {
        Self { browser, selectors }
    }

    /// Take one snapshot of the chat, in DOM order.
    ///
    /// Page-side failures are [`EngineError::ExtractionError`]; a lost
    /// browser connection is returned as [`EngineError::Browser`].
    pub async fn extract(&self) -> Result<Vec<ChatEntry>, EngineError> {
        let args = vec![
            json!(self.selectors.chat_item),
            json!(self.selectors.chat_sender),
            json!(self.selectors.chat_text),
            json!(self.selectors.chat_timestamp),
        ];

        let value = self
            .browser
            .evaluate(scripts::EXTRACT_CHAT, args)
            .await
            .map_err(|e| {
                if e.is_connection_loss() {
                    EngineError::Browser(e)
                } else {
                    EngineError::ExtractionError(e.to_string())
                }
            })?;

        if value.is_null() {
            return Ok(Vec::new());
        }

        let entries: Vec<ChatEntry> = serde_json::from_value(value).map_err(|e| {
            EngineError::ExtractionError(format!("unexpected chat snapshot: {}", e))
        })?;

        debug!("Extracted {} chat entries", entries.len());
        Ok(entries)
    }
}
