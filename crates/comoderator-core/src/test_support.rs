//! Scripted browser session shared by unit tests.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use comoderator_protocols::{BrowserError, BrowserSession};

use crate::scripts;

/// Answers `query` from a fixed set of present selectors and records every
/// interaction as a string.
///
/// Keeps a single composer the way a page does: setting the input replaces
/// its text and Enter sends whatever it holds. Every browser call yields once
/// so concurrent callers get a chance to interleave.
pub struct ScriptedSession {
    pub present: Mutex<HashSet<String>>,
    pub chat: Mutex<Result<Value, BrowserError>>,
    pub fallback_result: Mutex<bool>,
    pub calls: Mutex<Vec<String>>,
    composer: Mutex<String>,
    sent: Mutex<Vec<String>>,
}

impl ScriptedSession {
    pub fn new(present: &[&str]) -> Self {
        Self {
            present: Mutex::new(present.iter().map(|s| s.to_string()).collect()),
            chat: Mutex::new(Ok(Value::Array(Vec::new()))),
            fallback_result: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
            composer: Mutex::new(String::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Messages that actually left the composer.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

fn take_chat(slot: &Mutex<Result<Value, BrowserError>>) -> Result<Value, BrowserError> {
    match &*slot.lock() {
        Ok(value) => Ok(value.clone()),
        Err(BrowserError::NotConnected) => Err(BrowserError::NotConnected),
        Err(e) => Err(BrowserError::JavaScript(e.to_string())),
    }
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), BrowserError> {
        self.record(format!("navigate {}", url));
        Ok(())
    }

    async fn query(&self, selector: &str) -> Result<bool, BrowserError> {
        tokio::task::yield_now().await;
        Ok(self.present.lock().contains(selector))
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        self.record(format!("type {} {}", selector, text));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        self.record(format!("click {}", selector));
        Ok(())
    }

    async fn press_enter(&self) -> Result<(), BrowserError> {
        tokio::task::yield_now().await;
        self.record("enter".to_string());
        let text = std::mem::take(&mut *self.composer.lock());
        self.sent.lock().push(text);
        Ok(())
    }

    async fn evaluate(&self, function: &str, args: Vec<Value>) -> Result<Value, BrowserError> {
        tokio::task::yield_now().await;
        if function == scripts::EXTRACT_CHAT {
            self.record("extract".to_string());
            take_chat(&self.chat)
        } else if function == scripts::SET_INPUT_VALUE {
            let text = args[1].as_str().unwrap_or("");
            self.record(format!("set {} {}", args[0].as_str().unwrap_or(""), text));
            *self.composer.lock() = text.to_string();
            Ok(Value::Bool(true))
        } else if function == scripts::FALLBACK_POST {
            let text = args[0].as_str().unwrap_or("");
            self.record(format!("fallback {}", text));
            *self.composer.lock() = text.to_string();
            tokio::task::yield_now().await;
            let posted = *self.fallback_result.lock();
            if posted {
                let text = std::mem::take(&mut *self.composer.lock());
                self.sent.lock().push(text);
            }
            Ok(Value::Bool(posted))
        } else if function == scripts::CLEAR_INPUT {
            self.record(format!("clear {}", args[0].as_str().unwrap_or("")));
            Ok(Value::Bool(true))
        } else {
            Err(BrowserError::JavaScript("unknown script".to_string()))
        }
    }

    async fn close_page(&self) -> Result<(), BrowserError> {
        self.record("close_page".to_string());
        Ok(())
    }

    async fn close_browser(&self) -> Result<(), BrowserError> {
        self.record("close_browser".to_string());
        Ok(())
    }
}
