//! Answer injection into the meeting chat.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;

use comoderator_protocols::{BrowserError, BrowserSession, SelectorCatalog};

use crate::error::EngineError;
use crate::scripts;

/// Posts text into the chat.
///
/// Strategy order: each `chat_input` candidate (set value, fire input events,
/// press Enter), then a send button located by label together with a generic
/// text input.
///
/// Clones share one post lock, so at most one message is being composed on
/// the page at a time.
#[derive(Clone)]
pub struct ChatPoster {
    browser: Arc<dyn BrowserSession>,
    selectors: Arc<SelectorCatalog>,
    post_lock: Arc<Mutex<()>>,
}

impl ChatPoster {
    pub fn new(browser: Arc<dyn BrowserSession>, selectors: Arc<SelectorCatalog>) -> Self {
        Self {
            browser,
            selectors,
            post_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn post(&self, text: &str) -> Result<(), EngineError> {
        // Held from the first input lookup until Enter or the fallback click.
        let _guard = self.post_lock.lock().await;

        for selector in &self.selectors.chat_input {
            let present = match self.browser.query(selector).await {
                Ok(present) => present,
                Err(e) if e.is_connection_loss() => return Err(post_error(e)),
                Err(e) => {
                    debug!("Chat input lookup '{}' failed: {}", selector, e);
                    false
                }
            };
            if !present {
                continue;
            }

            let set = self
                .browser
                .evaluate(scripts::SET_INPUT_VALUE, vec![json!(selector), json!(text)])
                .await
                .map_err(post_error)?;
            if set.as_bool() == Some(false) {
                debug!("Chat input '{}' disappeared before it was filled", selector);
                continue;
            }

            self.browser.press_enter().await.map_err(post_error)?;
            debug!("Posted to chat via '{}'", selector);
            return Ok(());
        }

        let posted = self
            .browser
            .evaluate(
                scripts::FALLBACK_POST,
                vec![
                    json!(text),
                    json!(self.selectors.send_button_label),
                    json!(self.selectors.fallback_input),
                ],
            )
            .await
            .map_err(post_error)?;

        if posted.as_bool().unwrap_or(false) {
            debug!("Posted to chat via send button fallback");
            Ok(())
        } else {
            Err(EngineError::PostNotFound)
        }
    }
}

fn post_error(err: BrowserError) -> EngineError {
    EngineError::PostError(err.to_string())
}
