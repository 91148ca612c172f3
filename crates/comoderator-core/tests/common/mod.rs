//! Fake browser, launcher and completion provider for engine tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::broadcast::Receiver;

use comoderator_core::{scripts, AnswerGenerator, AnswerSettings, Engine, EngineConfig};
use comoderator_protocols::{
    BrowserError, BrowserLauncher, BrowserSession, ChatEntry, CompletionProvider,
    CompletionRequest, EngineEvent, LaunchOptions, ProviderError, SelectorCatalog,
};

pub const NAME_INPUT: &str = "input[name=\"name\"]";
pub const JOIN_BUTTON: &str = "button[type=\"submit\"]";
pub const CHAT_INPUT: &str = ".chat-input";

pub struct FakeBrowser {
    pub present: Mutex<HashSet<String>>,
    pub navigate_delay: Mutex<Option<Duration>>,
    pub chat: Mutex<Vec<ChatEntry>>,
    pub connection_lost: AtomicBool,
    pub fallback_available: AtomicBool,
    pub extracts: AtomicUsize,
    pub posted: Mutex<Vec<String>>,
    pub calls: Mutex<Vec<String>>,
    page_open: AtomicBool,
    browser_open: AtomicBool,
    pub page_closes: AtomicUsize,
    pub browser_closes: AtomicUsize,
}

impl FakeBrowser {
    /// A meeting page with a name field, a join button and a chat input.
    pub fn meeting() -> Arc<Self> {
        Self::with_selectors(&[NAME_INPUT, JOIN_BUTTON, CHAT_INPUT])
    }

    pub fn with_selectors(present: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            present: Mutex::new(present.iter().map(|s| s.to_string()).collect()),
            navigate_delay: Mutex::new(None),
            chat: Mutex::new(Vec::new()),
            connection_lost: AtomicBool::new(false),
            fallback_available: AtomicBool::new(false),
            extracts: AtomicUsize::new(0),
            posted: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            page_open: AtomicBool::new(true),
            browser_open: AtomicBool::new(true),
            page_closes: AtomicUsize::new(0),
            browser_closes: AtomicUsize::new(0),
        })
    }

    pub fn set_chat(&self, entries: Vec<ChatEntry>) {
        *self.chat.lock() = entries;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn posted(&self) -> Vec<String> {
        self.posted.lock().clone()
    }

    pub fn extracts(&self) -> usize {
        self.extracts.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> (usize, usize) {
        (
            self.page_closes.load(Ordering::SeqCst),
            self.browser_closes.load(Ordering::SeqCst),
        )
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }

    fn check_open(&self) -> Result<(), BrowserError> {
        if self.connection_lost.load(Ordering::SeqCst) || !self.page_open.load(Ordering::SeqCst) {
            Err(BrowserError::NotConnected)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BrowserSession for FakeBrowser {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), BrowserError> {
        self.record(format!("navigate {}", url));
        let delay = *self.navigate_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    async fn query(&self, selector: &str) -> Result<bool, BrowserError> {
        self.check_open()?;
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
        self.record("enter".to_string());
        Ok(())
    }

    async fn evaluate(&self, function: &str, args: Vec<Value>) -> Result<Value, BrowserError> {
        self.check_open()?;
        if function == scripts::EXTRACT_CHAT {
            self.extracts.fetch_add(1, Ordering::SeqCst);
            serde_json::to_value(&*self.chat.lock())
                .map_err(|e| BrowserError::JavaScript(e.to_string()))
        } else if function == scripts::SET_INPUT_VALUE {
            let text = args[1].as_str().unwrap_or_default().to_string();
            self.posted.lock().push(text);
            Ok(Value::Bool(true))
        } else if function == scripts::FALLBACK_POST {
            let available = self.fallback_available.load(Ordering::SeqCst);
            if available {
                let text = args[0].as_str().unwrap_or_default().to_string();
                self.posted.lock().push(text);
            }
            Ok(Value::Bool(available))
        } else if function == scripts::CLEAR_INPUT {
            self.record(format!("clear {}", args[0].as_str().unwrap_or_default()));
            Ok(Value::Bool(true))
        } else {
            Err(BrowserError::JavaScript("unexpected script".to_string()))
        }
    }

    async fn close_page(&self) -> Result<(), BrowserError> {
        if self.page_open.swap(false, Ordering::SeqCst) {
            self.page_closes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn close_browser(&self) -> Result<(), BrowserError> {
        if self.browser_open.swap(false, Ordering::SeqCst) {
            self.browser_closes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Hands out a fresh fake browser per launch; the latest is kept for inspection.
pub struct FakeLauncher {
    pub make: fn() -> Arc<FakeBrowser>,
    pub fail: AtomicBool,
    pub launches: AtomicUsize,
    pub latest: Mutex<Option<Arc<FakeBrowser>>>,
}

impl FakeLauncher {
    pub fn new(make: fn() -> Arc<FakeBrowser>) -> Arc<Self> {
        Arc::new(Self {
            make,
            fail: AtomicBool::new(false),
            launches: AtomicUsize::new(0),
            latest: Mutex::new(None),
        })
    }

    pub fn browser(&self) -> Arc<FakeBrowser> {
        self.latest.lock().clone().expect("no browser launched")
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self, _options: &LaunchOptions) -> Result<Arc<dyn BrowserSession>, BrowserError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(BrowserError::LaunchFailed("chrome not found".to_string()));
        }
        let browser = (self.make)();
        *self.latest.lock() = Some(browser.clone());
        Ok(browser)
    }
}

pub struct FakeProvider {
    pub reply: fn(&str) -> Result<String, ProviderError>,
    pub delay: Option<Duration>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new(reply: fn(&str) -> Result<String, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            delay: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn slow(reply: fn(&str) -> Result<String, ProviderError>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply,
            delay: Some(delay),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    fn id(&self) -> &str {
        "fake"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        self.prompts.lock().push(request.prompt.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.reply)(&request.prompt)
    }
}

pub fn engine(launcher: Arc<FakeLauncher>, provider: Arc<FakeProvider>) -> Engine {
    Engine::new(
        EngineConfig::default(),
        SelectorCatalog::default(),
        launcher,
        AnswerGenerator::new(provider, AnswerSettings::default()),
    )
}

pub fn entry(sender: &str, text: &str, at: &str) -> ChatEntry {
    ChatEntry::new(sender, text, at)
}

pub const LINK: &str = "https://zoom.us/wc/join/123456789";

/// Wait (in virtual time) for the first event matching `pred`.
pub async fn next_event(
    rx: &mut Receiver<EngineEvent>,
    pred: impl Fn(&EngineEvent) -> bool,
) -> EngineEvent {
    tokio::time::timeout(Duration::from_secs(120), async {
        loop {
            let event = rx.recv().await.expect("event bus closed");
            if pred(&event) {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for event")
}

/// All events currently buffered.
pub fn drain(rx: &mut Receiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
